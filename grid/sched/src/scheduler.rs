//! The slot rotation

use grid_core::{Clock, ElapsedTime, GridResult};
use grid_hal::{LowPower, UartPort};

use crate::behavior::Behavior;
use crate::config::SchedulerConfig;
use crate::context::{Context, ScheduleCursor};
use crate::overrun::{BurnReport, OverrunHandler};
use crate::table::DispatchTable;

/// Dispatch about to happen, passed to the trace hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchRecord {
    /// Zero-based index of the sweep in progress
    pub sweep: u64,
    pub slot: usize,
    pub cycle: usize,
    pub behavior: Behavior,
    pub at: ElapsedTime,
}

/// Observer invoked before every dispatch
pub type DispatchHook = fn(&DispatchRecord);

pub struct SchedulerBuilder<'c, U, P, const SLOTS: usize, const CYCLES: usize> {
    table: DispatchTable<SLOTS, CYCLES>,
    clock: &'c Clock,
    uart: U,
    power: P,
    config: SchedulerConfig,
    marker: i64,
    hook: Option<DispatchHook>,
}

impl<'c, U, P, const SLOTS: usize, const CYCLES: usize> SchedulerBuilder<'c, U, P, SLOTS, CYCLES>
where
    U: UartPort,
    P: LowPower,
{
    pub fn new(table: DispatchTable<SLOTS, CYCLES>, clock: &'c Clock, uart: U, power: P) -> Self {
        Self {
            table,
            clock,
            uart,
            power,
            config: SchedulerConfig::default(),
            marker: 0,
            hook: None,
        }
    }

    pub fn config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Marker the first burn measures against (0 at power-up)
    pub fn initial_marker(mut self, marker: i64) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_trace_hook(mut self, hook: DispatchHook) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn build(self) -> GridResult<Scheduler<'c, U, P, SLOTS, CYCLES>> {
        self.table.validate()?;
        self.config.validate()?;

        log::info!(
            "{} v{}: {}x{} table, burn threshold {}s ({}), task sleep {}us",
            self.config.name,
            self.config.version,
            SLOTS,
            CYCLES,
            self.config.burn_threshold_secs,
            self.config.seconds_source,
            self.config.task_sleep_us
        );

        Ok(Scheduler {
            overrun: self.config.overrun_handler(),
            table: self.table,
            clock: self.clock,
            uart: self.uart,
            power: self.power,
            config: self.config,
            cursor: ScheduleCursor::new(CYCLES),
            marker: self.marker,
            hook: self.hook,
            sweeps: 0,
            dispatches: 0,
            last_burn: None,
        })
    }
}

/// Cooperative scheduler walking a fixed dispatch table
///
/// Owns the cursor and the burn marker; the clock is shared with whatever
/// delivers timer ticks.
pub struct Scheduler<'c, U, P, const SLOTS: usize, const CYCLES: usize> {
    table: DispatchTable<SLOTS, CYCLES>,
    clock: &'c Clock,
    uart: U,
    power: P,
    config: SchedulerConfig,
    overrun: OverrunHandler,
    cursor: ScheduleCursor,
    marker: i64,
    hook: Option<DispatchHook>,
    sweeps: u64,
    dispatches: u64,
    last_burn: Option<BurnReport>,
}

impl<'c, U, P, const SLOTS: usize, const CYCLES: usize> Scheduler<'c, U, P, SLOTS, CYCLES>
where
    U: UartPort,
    P: LowPower,
{
    pub fn builder(
        table: DispatchTable<SLOTS, CYCLES>,
        clock: &'c Clock,
        uart: U,
        power: P,
    ) -> SchedulerBuilder<'c, U, P, SLOTS, CYCLES> {
        SchedulerBuilder::new(table, clock, uart, power)
    }

    /// Rotate through the table forever
    pub fn run(&mut self) -> ! {
        log::info!("{} scheduler running", self.config.name);
        loop {
            self.sweep();
        }
    }

    /// Run a bounded number of sweeps
    pub fn run_sweeps(&mut self, count: u64) {
        for _ in 0..count {
            self.sweep();
        }
    }

    /// One pass over every slot, cycle by cycle
    pub fn sweep(&mut self) {
        self.cursor.reset();
        while self.cursor.slot < SLOTS {
            while self.cursor.has_cycle() {
                self.dispatch_current();
                self.cursor.advance_cycle();
            }
            self.cursor.advance_slot();
        }
        self.sweeps += 1;
        log::trace!("sweep {} complete at {}", self.sweeps, self.clock.now());
    }

    fn dispatch_current(&mut self) {
        let (slot, cycle) = (self.cursor.slot, self.cursor.cycle);
        let behavior = self.table.get(slot, cycle);

        if let Some(hook) = self.hook {
            hook(&DispatchRecord {
                sweep: self.sweeps,
                slot,
                cycle,
                behavior,
                at: self.clock.now(),
            });
        }
        log::debug!("slot {} cycle {}: {}", slot, cycle, behavior);

        let mut cx = Context {
            clock: self.clock,
            uart: &mut self.uart,
            power: &mut self.power,
            cursor: &mut self.cursor,
            marker: &mut self.marker,
            config: &self.config,
            overrun: &self.overrun,
            last_burn: &mut self.last_burn,
        };
        behavior.run(&mut cx);
        self.dispatches += 1;
    }

    pub fn table(&self) -> &DispatchTable<SLOTS, CYCLES> {
        &self.table
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn clock(&self) -> &'c Clock {
        self.clock
    }

    pub fn cursor(&self) -> ScheduleCursor {
        self.cursor
    }

    /// Marker left by the most recent burn
    pub fn marker(&self) -> i64 {
        self.marker
    }

    pub fn last_burn(&self) -> Option<BurnReport> {
        self.last_burn
    }

    /// Completed sweeps
    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }

    /// Behaviours dispatched so far
    pub fn dispatches(&self) -> u64 {
        self.dispatches
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    pub fn power(&self) -> &P {
        &self.power
    }

    /// Give back the peripherals
    pub fn into_parts(self) -> (U, P) {
        (self.uart, self.power)
    }
}
