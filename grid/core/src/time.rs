//! Elapsed time representation and tick rate configuration

use core::fmt;
use crate::{GridError, GridResult};

/// Milliseconds in one second
pub const MILLIS_PER_SECOND: u16 = 1000;

/// Seconds in one minute
pub const SECONDS_PER_MINUTE: u8 = 60;

/// Default hardware timer period in microseconds
pub const DEFAULT_TICK_PERIOD_US: u32 = 100;

/// Default number of timer ticks per millisecond
pub const DEFAULT_TICKS_PER_MS: u32 = 10;

/// Wall-clock time elapsed since startup
///
/// `milliseconds` stays below 1000 and `seconds` below 60; `minutes` is
/// unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElapsedTime {
    pub minutes: u32,
    pub seconds: u8,
    pub milliseconds: u16,
}

impl ElapsedTime {
    /// Startup value
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
        milliseconds: 0,
    };

    /// Create an elapsed time, normalising out-of-range fields
    pub const fn new(minutes: u32, seconds: u8, milliseconds: u16) -> Self {
        let carry_secs = (milliseconds / MILLIS_PER_SECOND) as u32 + seconds as u32;
        Self {
            minutes: minutes + carry_secs / SECONDS_PER_MINUTE as u32,
            seconds: (carry_secs % SECONDS_PER_MINUTE as u32) as u8,
            milliseconds: milliseconds % MILLIS_PER_SECOND,
        }
    }

    /// Advance by one millisecond, cascading into seconds and minutes
    pub fn advance_millisecond(&mut self) {
        self.milliseconds += 1;
        if self.milliseconds == MILLIS_PER_SECOND {
            self.milliseconds = 0;
            self.seconds += 1;
            if self.seconds == SECONDS_PER_MINUTE {
                self.seconds = 0;
                self.minutes = self.minutes.wrapping_add(1);
            }
        }
    }

    /// Monotonic whole seconds since startup
    pub const fn total_seconds(&self) -> u64 {
        self.minutes as u64 * SECONDS_PER_MINUTE as u64 + self.seconds as u64
    }

    /// Monotonic milliseconds since startup
    pub const fn total_millis(&self) -> u64 {
        self.total_seconds() * MILLIS_PER_SECOND as u64 + self.milliseconds as u64
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}.{:03}",
            self.minutes, self.seconds, self.milliseconds
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ElapsedTime {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{=u32}:{=u8}.{=u16}",
            self.minutes,
            self.seconds,
            self.milliseconds
        );
    }
}

/// Hardware tick configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    /// Period between timer interrupts in microseconds
    pub tick_period_us: u32,
    /// Ticks that make up one millisecond
    pub ticks_per_ms: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_period_us: DEFAULT_TICK_PERIOD_US,
            ticks_per_ms: DEFAULT_TICKS_PER_MS,
        }
    }
}

impl ClockConfig {
    /// Create a configuration from a tick period and tick count per millisecond
    pub const fn new(tick_period_us: u32, ticks_per_ms: u32) -> Self {
        Self {
            tick_period_us,
            ticks_per_ms,
        }
    }

    /// Derive the configuration from a tick period alone
    pub fn from_period_us(tick_period_us: u32) -> GridResult<Self> {
        if tick_period_us == 0 || tick_period_us > 1000 || 1000 % tick_period_us != 0 {
            return Err(GridError::InvalidTickRate);
        }
        Ok(Self::new(tick_period_us, 1000 / tick_period_us))
    }

    /// Timer interrupts per second
    pub const fn ticks_per_second(&self) -> u32 {
        self.ticks_per_ms * MILLIS_PER_SECOND as u32
    }

    /// Reject zero rates
    pub fn validate(&self) -> GridResult<()> {
        if self.tick_period_us == 0 || self.ticks_per_ms == 0 {
            Err(GridError::InvalidTickRate)
        } else {
            Ok(())
        }
    }
}
