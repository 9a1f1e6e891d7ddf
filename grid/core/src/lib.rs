#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # Grid Core
//!
//! Timekeeping foundation for the slot grid scheduler: the elapsed-time
//! representation, the tick-driven [`Clock`] and the error type shared by
//! the configuration layers of the workspace.

use core::fmt;

pub mod clock;
pub mod time;

pub use clock::*;
pub use time::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the slot grid crates
pub type GridResult<T> = Result<T, GridError>;

/// Configuration errors
///
/// Scheduling itself never fails; these are only produced while validating
/// clock and scheduler settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Tick rate or tick period of zero
    InvalidTickRate,
    /// Overrun threshold of zero seconds
    InvalidThreshold,
    /// Dispatch table with no slots or no cycles
    InvalidTable,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidTickRate => write!(f, "Tick rate must be non-zero"),
            GridError::InvalidThreshold => write!(f, "Overrun threshold must be non-zero"),
            GridError::InvalidTable => write!(f, "Dispatch table must have slots and cycles"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GridError {}

#[cfg(feature = "defmt")]
impl defmt::Format for GridError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            GridError::InvalidTickRate => defmt::write!(fmt, "InvalidTickRate"),
            GridError::InvalidThreshold => defmt::write!(fmt, "InvalidThreshold"),
            GridError::InvalidTable => defmt::write!(fmt, "InvalidTable"),
        }
    }
}
