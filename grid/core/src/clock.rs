//! Tick-driven wall clock
//!
//! The clock has exactly one writer, the timer interrupt (or the host
//! ticker thread) calling [`Clock::on_tick`], and one reader, the scheduler.
//! Every field is a plain atomic so the reader never blocks the writer; only
//! load and store are used, which keeps the clock usable on cores without
//! compare-and-swap.

use core::sync::atomic::{AtomicU16, AtomicU32, AtomicU8, Ordering};

use crate::time::{ClockConfig, ElapsedTime, DEFAULT_TICKS_PER_MS};

/// Elapsed-time clock advanced by periodic timer ticks
pub struct Clock {
    ticks_per_ms: u32,
    ticks: AtomicU32,
    minutes: AtomicU32,
    seconds: AtomicU8,
    milliseconds: AtomicU16,
}

impl Clock {
    /// Create a clock at zero elapsed time
    ///
    /// A `ticks_per_ms` of zero is treated as one; use
    /// [`ClockConfig::validate`] to reject it up front.
    pub const fn new(ticks_per_ms: u32) -> Self {
        Self {
            ticks_per_ms: if ticks_per_ms == 0 { 1 } else { ticks_per_ms },
            ticks: AtomicU32::new(0),
            minutes: AtomicU32::new(0),
            seconds: AtomicU8::new(0),
            milliseconds: AtomicU16::new(0),
        }
    }

    /// Create a clock from a tick configuration
    pub const fn with_config(config: &ClockConfig) -> Self {
        Self::new(config.ticks_per_ms)
    }

    /// Ticks that make up one millisecond
    pub const fn ticks_per_ms(&self) -> u32 {
        self.ticks_per_ms
    }

    /// Timer tick handler
    ///
    /// Counts raw ticks and advances the elapsed time by one millisecond
    /// every `ticks_per_ms` ticks.
    pub fn on_tick(&self) {
        let ticks = self.ticks.load(Ordering::Relaxed) + 1;
        if ticks < self.ticks_per_ms {
            self.ticks.store(ticks, Ordering::Relaxed);
            return;
        }
        self.ticks.store(0, Ordering::Relaxed);

        critical_section::with(|_| {
            let mut now = self.load();
            now.advance_millisecond();
            self.store(now);
        });
    }

    /// Seconds component of the elapsed time
    ///
    /// This wraps to zero every minute; it is not a monotonic count of
    /// seconds since startup. See [`Clock::total_seconds`] for that.
    #[inline]
    pub fn elapsed_seconds(&self) -> u32 {
        self.seconds.load(Ordering::Acquire) as u32
    }

    /// Monotonic whole seconds since startup
    pub fn total_seconds(&self) -> u64 {
        self.now().total_seconds()
    }

    /// Consistent snapshot of the elapsed time
    pub fn now(&self) -> ElapsedTime {
        critical_section::with(|_| self.load())
    }

    /// Raw ticks counted since the last millisecond boundary
    pub fn pending_ticks(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Overwrite the elapsed time and drop pending ticks
    ///
    /// Meant for bring-up and tests; the tick handler must not be running
    /// concurrently.
    pub fn set(&self, time: ElapsedTime) {
        critical_section::with(|_| {
            self.ticks.store(0, Ordering::Relaxed);
            self.store(ElapsedTime::new(time.minutes, time.seconds, time.milliseconds));
        });
    }

    /// Return to zero elapsed time
    pub fn reset(&self) {
        self.set(ElapsedTime::ZERO);
    }

    fn load(&self) -> ElapsedTime {
        ElapsedTime {
            minutes: self.minutes.load(Ordering::Acquire),
            seconds: self.seconds.load(Ordering::Acquire),
            milliseconds: self.milliseconds.load(Ordering::Acquire),
        }
    }

    fn store(&self, time: ElapsedTime) {
        self.milliseconds.store(time.milliseconds, Ordering::Release);
        self.minutes.store(time.minutes, Ordering::Release);
        self.seconds.store(time.seconds, Ordering::Release);
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_MS)
    }
}

impl core::fmt::Debug for Clock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Clock")
            .field("ticks_per_ms", &self.ticks_per_ms)
            .field("pending_ticks", &self.pending_ticks())
            .field("elapsed", &self.now())
            .finish()
    }
}
