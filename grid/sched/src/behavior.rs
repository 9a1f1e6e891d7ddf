//! Schedulable behaviours

use core::fmt;

use grid_hal::{LowPower, UartPort};

use crate::context::Context;

/// Message written by the overrun handler on entry
pub const BURN_MESSAGE: &str = "I am stuck in burn \n";

/// One cell of the dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    TaskOne,
    TaskTwo,
    TaskThree,
    TaskFour,
    /// Busy-wait until the overrun threshold is met, then end the slot
    Overrun,
}

impl Behavior {
    /// Short identifier used in logs
    pub const fn name(self) -> &'static str {
        match self {
            Behavior::TaskOne => "task_one",
            Behavior::TaskTwo => "task_two",
            Behavior::TaskThree => "task_three",
            Behavior::TaskFour => "task_four",
            Behavior::Overrun => "burn_time",
        }
    }

    /// Text written to the serial port when this behaviour starts
    pub const fn message(self) -> &'static str {
        match self {
            Behavior::TaskOne => "Task one running \n",
            Behavior::TaskTwo => "Task two running \n",
            Behavior::TaskThree => "Task three running \n",
            Behavior::TaskFour => "Task four running \n",
            Behavior::Overrun => BURN_MESSAGE,
        }
    }

    pub const fn is_overrun(self) -> bool {
        matches!(self, Behavior::Overrun)
    }

    /// Execute this behaviour to completion
    ///
    /// Tasks announce themselves and then block in a low-power wait. The
    /// overrun handler spins until its threshold is met and forces the
    /// cursor past the remaining cycles of the slot.
    pub fn run<U: UartPort, P: LowPower>(self, cx: &mut Context<'_, U, P>) {
        match self {
            Behavior::Overrun => cx.burn(),
            task => {
                let sleep_us = cx.task_sleep_us();
                cx.emit(task.message().as_bytes());
                cx.sleep(sleep_us);
            }
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Behavior {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name());
    }
}
