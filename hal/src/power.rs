//! Low-power wait abstraction

use crate::error::HalResult;

/// Low-power sleep with timed wake-up
///
/// The calling thread is suspended until the wake-up timer expires. On a
/// target this is a light-sleep entry; timer interrupts keep running.
pub trait LowPower: Send {
    /// Arm the wake-up timer for the next sleep
    fn enable_timer_wakeup(&mut self, duration_us: u64) -> HalResult<()>;

    /// Enter light sleep until the wake-up timer fires
    fn light_sleep(&mut self) -> HalResult<()>;

    /// Block for approximately `duration_us` microseconds in low power
    fn sleep_for(&mut self, duration_us: u64) -> HalResult<()> {
        self.enable_timer_wakeup(duration_us)?;
        self.light_sleep()
    }
}

impl<P: LowPower + ?Sized> LowPower for &mut P {
    fn enable_timer_wakeup(&mut self, duration_us: u64) -> HalResult<()> {
        (**self).enable_timer_wakeup(duration_us)
    }

    fn light_sleep(&mut self) -> HalResult<()> {
        (**self).light_sleep()
    }

    fn sleep_for(&mut self, duration_us: u64) -> HalResult<()> {
        (**self).sleep_for(duration_us)
    }
}
