//! Low-power wait for POSIX: the calling thread simply sleeps

use std::thread;
use std::time::Duration;

use grid_hal::{HalError, HalResult, LowPower};

/// Thread sleep standing in for light sleep with timer wake-up
#[derive(Debug, Default)]
pub struct ThreadSleep {
    wakeup: Option<Duration>,
    sleeps: u64,
}

impl ThreadSleep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed sleeps
    pub fn sleeps(&self) -> u64 {
        self.sleeps
    }
}

impl LowPower for ThreadSleep {
    fn enable_timer_wakeup(&mut self, duration_us: u64) -> HalResult<()> {
        self.wakeup = Some(Duration::from_micros(duration_us));
        Ok(())
    }

    fn light_sleep(&mut self) -> HalResult<()> {
        // Without an armed wake-up the target would sleep forever.
        let duration = self.wakeup.take().ok_or(HalError::NotInitialized)?;
        thread::sleep(duration);
        self.sleeps += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_sleep_for_blocks() {
        let mut power = ThreadSleep::new();
        let start = Instant::now();
        power.sleep_for(20_000).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(power.sleeps(), 1);
    }

    #[test]
    fn test_sleep_without_wakeup() {
        let mut power = ThreadSleep::new();
        assert_eq!(power.light_sleep(), Err(HalError::NotInitialized));
        assert_eq!(power.sleeps(), 0);
    }
}
