//! POSIX port for hosting the slot grid scheduler.
//!
//! Provides host implementations of the HAL traits: a ticker thread in place
//! of the hardware timer, a buffered stdout console in place of the UART and
//! thread sleep in place of light sleep. [`PosixPort`] wires the ticker to a
//! shared [`Clock`].

use std::sync::Arc;

use grid_core::{Clock, ClockConfig, GridError};
use grid_hal::{HalError, Timer, TimerMode, UartConfig, UartPort};
use thiserror::Error;

pub mod power;
pub mod serial;
pub mod time;

pub use power::ThreadSleep;
pub use serial::SerialConsole;
pub use time::HostTimer;

/// Errors raised while bringing up the host port
#[derive(Error, Debug)]
pub enum PortError {
    #[error("invalid clock configuration: {0}")]
    Config(#[from] GridError),
    #[error("peripheral error: {0}")]
    Hal(#[from] HalError),
    #[error("signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Host board: a clock and the ticker thread that drives it
pub struct PosixPort {
    config: ClockConfig,
    clock: Arc<Clock>,
    timer: HostTimer,
}

impl PosixPort {
    /// Create the clock for `config`; the ticker is not started yet
    pub fn new(config: ClockConfig) -> Result<Self, PortError> {
        config.validate()?;
        let clock = Arc::new(Clock::with_config(&config));
        let timer = HostTimer::new(Arc::clone(&clock));
        Ok(Self {
            config,
            clock,
            timer,
        })
    }

    /// Start ticking the clock in auto-reload mode
    pub fn start(&mut self) -> Result<(), PortError> {
        self.timer
            .start(self.config.tick_period_us as u64, TimerMode::Periodic)?;
        log::info!(
            "clock ticking every {}us ({} ticks/s)",
            self.config.tick_period_us,
            self.config.ticks_per_second()
        );
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), PortError> {
        self.timer.stop()?;
        Ok(())
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Handle to the clock for other threads
    pub fn shared_clock(&self) -> Arc<Clock> {
        Arc::clone(&self.clock)
    }

    pub fn timer(&self) -> &HostTimer {
        &self.timer
    }

    /// Console on standard output, configured with `config`
    pub fn console(
        &self,
        config: &UartConfig,
    ) -> Result<SerialConsole<std::io::Stdout>, PortError> {
        let mut console = SerialConsole::stdout();
        console.configure(config)?;
        Ok(console)
    }

    pub fn low_power(&self) -> ThreadSleep {
        ThreadSleep::new()
    }
}

/// Run `handler` on Ctrl-C / SIGTERM
pub fn on_interrupt<F>(handler: F) -> Result<(), PortError>
where
    F: FnMut() + Send + 'static,
{
    ctrlc::set_handler(handler)?;
    Ok(())
}
