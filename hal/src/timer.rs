//! Hardware timer abstraction

use crate::error::HalResult;

/// Timer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Fire once, then disarm
    OneShot,
    /// Auto-reload: fire every period until stopped
    Periodic,
}

/// Periodic timer that invokes a tick handler from interrupt context
pub trait Timer: Send {
    /// Start timer with specified period in microseconds
    fn start(&mut self, period_us: u64, mode: TimerMode) -> HalResult<()>;

    /// Stop timer
    fn stop(&mut self) -> HalResult<()>;

    /// Number of expirations since the timer was started
    fn counter(&self) -> u64;

    /// Whether the timer is currently armed
    fn is_running(&self) -> bool;
}
