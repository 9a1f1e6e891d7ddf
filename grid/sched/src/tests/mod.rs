//! Shared peripheral doubles for the scheduler tests.

mod overrun;

use std::sync::atomic::{AtomicBool, Ordering};

use grid_core::Clock;
use grid_hal::{HalError, HalResult, LowPower, UartConfig, UartPort};

/// Serial port that keeps every write as one string
#[derive(Default)]
pub(crate) struct RecordingUart {
    pub writes: Vec<String>,
    pub fail: bool,
}

impl UartPort for RecordingUart {
    fn configure(&mut self, _config: &UartConfig) -> HalResult<()> {
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> HalResult<usize> {
        if self.fail {
            return Err(HalError::Busy);
        }
        self.writes.push(String::from_utf8_lossy(data).into_owned());
        Ok(data.len())
    }

    fn flush(&mut self) -> HalResult<()> {
        Ok(())
    }
}

/// Low-power wait that returns at once and remembers the request
#[derive(Default)]
pub(crate) struct RecordingPower {
    pending: Option<u64>,
    pub sleeps: Vec<u64>,
}

impl LowPower for RecordingPower {
    fn enable_timer_wakeup(&mut self, duration_us: u64) -> HalResult<()> {
        self.pending = Some(duration_us);
        Ok(())
    }

    fn light_sleep(&mut self) -> HalResult<()> {
        let duration = self.pending.take().ok_or(HalError::NotInitialized)?;
        self.sleeps.push(duration);
        Ok(())
    }
}

/// Run `body` while another thread ticks `clock` as fast as it can
pub(crate) fn with_feeder<R>(clock: &Clock, body: impl FnOnce() -> R) -> R {
    let done = AtomicBool::new(false);
    std::thread::scope(|s| {
        s.spawn(|| {
            while !done.load(Ordering::Acquire) {
                clock.on_tick();
            }
        });
        let result = body();
        done.store(true, Ordering::Release);
        result
    })
}
