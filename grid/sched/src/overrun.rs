//! Overrun handler ("burn")
//!
//! A burn occupies the processor until at least `threshold` seconds have
//! passed since the marker left by the previous burn. It never sleeps: the
//! loop re-reads the clock and issues a spin hint, nothing else. Timer ticks
//! keep arriving from interrupt context, which is what eventually ends it.
//!
//! Two seconds sources are supported. [`SecondsSource::SecondOfMinute`]
//! reads [`Clock::elapsed_seconds`], which wraps every minute: when a burn
//! straddles a minute boundary the difference goes negative and the loop can
//! stall until the seconds value climbs back over the marker, or forever if
//! the marker is 55 or above. It also keeps the reference firmware's marker
//! bookkeeping, where the marker becomes the final difference rather than a
//! timestamp. [`SecondsSource::Monotonic`] reads [`Clock::total_seconds`]
//! and stores the exit timestamp as the marker.

use core::fmt;

use grid_core::Clock;

/// Default overrun threshold in seconds
pub const DEFAULT_BURN_THRESHOLD_SECS: u32 = 5;

/// Which clock reading the burn loop compares against its marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecondsSource {
    /// Seconds field of the elapsed time, wrapping at 60
    SecondOfMinute,
    /// Whole seconds since startup
    #[default]
    Monotonic,
}

impl SecondsSource {
    /// Current reading of this source
    #[inline]
    pub fn read(self, clock: &Clock) -> i64 {
        match self {
            SecondsSource::SecondOfMinute => clock.elapsed_seconds() as i64,
            SecondsSource::Monotonic => clock.total_seconds() as i64,
        }
    }
}

impl fmt::Display for SecondsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecondsSource::SecondOfMinute => write!(f, "second-of-minute"),
            SecondsSource::Monotonic => write!(f, "monotonic"),
        }
    }
}

/// Outcome of one burn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnReport {
    /// Source reading on entry
    pub start: i64,
    /// Source reading that satisfied the threshold
    pub exit: i64,
    /// Duration printed on the serial port
    pub duration: i64,
    /// Marker left for the next burn
    pub marker: i64,
}

/// Busy-wait barrier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrunHandler {
    threshold: i64,
    source: SecondsSource,
}

impl OverrunHandler {
    pub const fn new(threshold_secs: u32, source: SecondsSource) -> Self {
        Self {
            threshold: threshold_secs as i64,
            source,
        }
    }

    pub const fn threshold(&self) -> i64 {
        self.threshold
    }

    pub const fn source(&self) -> SecondsSource {
        self.source
    }

    /// Seconds still to burn before the threshold is met
    ///
    /// Zero or negative means a burn started now would return at once.
    pub fn remaining(&self, marker: i64, clock: &Clock) -> i64 {
        self.threshold - (self.source.read(clock) - marker)
    }

    /// Whether the loop condition is already satisfied
    pub fn is_satisfied(&self, marker: i64, clock: &Clock) -> bool {
        self.remaining(marker, clock) <= 0
    }

    /// Spin until `source - marker >= threshold`, then update `marker`
    pub fn burn(&self, marker: &mut i64, clock: &Clock) -> BurnReport {
        let start = self.source.read(clock);

        let (exit, difference) = loop {
            let now = self.source.read(clock);
            let difference = now - *marker;
            if difference >= self.threshold {
                break (now, difference);
            }
            core::hint::spin_loop();
        };

        let (next, duration) = match self.source {
            SecondsSource::SecondOfMinute => (difference, self.source.read(clock) - difference),
            SecondsSource::Monotonic => (exit, exit - start),
        };
        *marker = next;

        BurnReport {
            start,
            exit,
            duration,
            marker: next,
        }
    }
}

impl Default for OverrunHandler {
    fn default() -> Self {
        Self::new(DEFAULT_BURN_THRESHOLD_SECS, SecondsSource::default())
    }
}
