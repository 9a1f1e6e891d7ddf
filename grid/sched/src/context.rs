//! Schedule cursor and per-dispatch context

use core::fmt::Write;

use grid_core::Clock;
use grid_hal::{LowPower, UartPort};

use crate::behavior::BURN_MESSAGE;
use crate::config::SchedulerConfig;
use crate::overrun::{BurnReport, OverrunHandler};

/// Position of the scheduler in its table
///
/// The inner loop of a sweep is bounded by this very value, so the overrun
/// handler ends a slot simply by moving `cycle` to the end of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleCursor {
    pub slot: usize,
    pub cycle: usize,
    cycles: usize,
}

impl ScheduleCursor {
    pub const fn new(cycles: usize) -> Self {
        Self {
            slot: 0,
            cycle: 0,
            cycles,
        }
    }

    /// Cycles per slot
    pub const fn cycles(&self) -> usize {
        self.cycles
    }

    /// Rewind to slot 0, cycle 0
    pub fn reset(&mut self) {
        self.slot = 0;
        self.cycle = 0;
    }

    /// Whether the current slot still has cycles to dispatch
    pub const fn has_cycle(&self) -> bool {
        self.cycle < self.cycles
    }

    /// Step to the next cycle, saturating at the end of the row
    pub fn advance_cycle(&mut self) {
        if self.cycle < self.cycles {
            self.cycle += 1;
        }
    }

    /// Move to the next slot at cycle 0
    pub fn advance_slot(&mut self) {
        self.slot += 1;
        self.cycle = 0;
    }

    /// Skip every remaining cycle of the current slot
    pub fn exhaust_cycles(&mut self) {
        self.cycle = self.cycles;
    }
}

/// Everything a behaviour may touch while it runs
///
/// Borrowed from the scheduler for the duration of one dispatch.
pub struct Context<'a, U, P> {
    pub(crate) clock: &'a Clock,
    pub(crate) uart: &'a mut U,
    pub(crate) power: &'a mut P,
    pub(crate) cursor: &'a mut ScheduleCursor,
    pub(crate) marker: &'a mut i64,
    pub(crate) config: &'a SchedulerConfig,
    pub(crate) overrun: &'a OverrunHandler,
    pub(crate) last_burn: &'a mut Option<BurnReport>,
}

impl<'a, U: UartPort, P: LowPower> Context<'a, U, P> {
    pub fn clock(&self) -> &Clock {
        self.clock
    }

    pub fn cursor(&self) -> &ScheduleCursor {
        self.cursor
    }

    /// Value carried from the previous burn
    pub fn marker(&self) -> i64 {
        *self.marker
    }

    pub fn task_sleep_us(&self) -> u64 {
        self.config.task_sleep_us
    }

    /// Fire-and-forget write to the serial port
    pub fn emit(&mut self, bytes: &[u8]) {
        if let Err(err) = self.uart.write(bytes) {
            log::warn!("uart write of {} bytes dropped: {}", bytes.len(), err);
        }
    }

    /// Blocking low-power wait
    pub fn sleep(&mut self, duration_us: u64) {
        if let Err(err) = self.power.sleep_for(duration_us) {
            log::warn!("low-power wait of {}us failed: {}", duration_us, err);
        }
    }

    /// Run the overrun handler and end the current slot
    pub fn burn(&mut self) {
        self.emit(BURN_MESSAGE.as_bytes());

        let report = self.overrun.burn(self.marker, self.clock);
        log::debug!(
            "burn ended at {}s after {}s, marker now {}",
            report.exit,
            report.duration,
            report.marker
        );

        let mut line: heapless::String<48> = heapless::String::new();
        // Two digits of magnitude, sign in front: -3 prints as "-03".
        let sign = if report.duration < 0 { "-" } else { "" };
        let magnitude = report.duration.unsigned_abs();
        if write!(line, "Burn time = {}{:02}s\n\n", sign, magnitude).is_ok() {
            self.emit(line.as_bytes());
        }
        *self.last_burn = Some(report);

        self.cursor.exhaust_cycles();
    }
}
