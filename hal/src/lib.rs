//! Hardware Abstraction Layer (HAL) for the slot grid scheduler
//!
//! Vendor-agnostic traits for the three peripherals the scheduler touches:
//! a serial port for diagnostic text, a periodic hardware timer that drives
//! the clock, and a low-power wait used by cooperative tasks.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod power;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use error::{HalError, HalResult};
pub use power::LowPower;
pub use timer::{Timer, TimerMode};
pub use uart::{UartConfig, UartPort};
