//! Peripheral error type

use core::fmt;

/// Failure reported by a timer, console or low-power peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Zero period, zero baud rate or similar out-of-range argument
    InvalidParameter,
    /// Timer already running
    Busy,
    /// Sleep requested without an armed wake-up source
    NotInitialized,
    /// The device (or the host stream behind it) failed
    HardwareError,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidParameter => "invalid parameter",
            Self::Busy => "peripheral busy",
            Self::NotInitialized => "wake-up source not armed",
            Self::HardwareError => "device failure",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

pub type HalResult<T> = Result<T, HalError>;
