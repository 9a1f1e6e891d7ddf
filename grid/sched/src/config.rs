//! Scheduler configuration

use grid_core::{GridError, GridResult};

use crate::overrun::{OverrunHandler, SecondsSource, DEFAULT_BURN_THRESHOLD_SECS};

/// Default low-power wait of a task in microseconds
pub const DEFAULT_TASK_SLEEP_US: u64 = 1_000_000;

/// Configuration for the slot scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub name: &'static str,
    /// Low-power wait after each task message
    pub task_sleep_us: u64,
    /// Minimum seconds between the previous burn marker and a burn exit
    pub burn_threshold_secs: u32,
    pub seconds_source: SecondsSource,
    pub version: u16,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            name: "GRID",
            task_sleep_us: DEFAULT_TASK_SLEEP_US,
            burn_threshold_secs: DEFAULT_BURN_THRESHOLD_SECS,
            seconds_source: SecondsSource::default(),
            version: 100,
        }
    }
}

impl SchedulerConfig {
    /// Creates a new scheduler configuration builder.
    pub fn builder() -> SchedulerConfigBuilder {
        SchedulerConfigBuilder::default()
    }

    /// Overrun handler described by this configuration
    pub fn overrun_handler(&self) -> OverrunHandler {
        OverrunHandler::new(self.burn_threshold_secs, self.seconds_source)
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.burn_threshold_secs == 0 {
            return Err(GridError::InvalidThreshold);
        }
        Ok(())
    }
}

/// Builder for ergonomic scheduler configuration construction.
#[derive(Debug, Clone, Default)]
pub struct SchedulerConfigBuilder {
    config: SchedulerConfig,
}

impl SchedulerConfigBuilder {
    /// Sets the scheduler name used in logs.
    pub fn name(mut self, name: &'static str) -> Self {
        self.config.name = name;
        self
    }

    /// Sets the low-power wait performed by every task.
    pub fn task_sleep_us(mut self, duration_us: u64) -> Self {
        self.config.task_sleep_us = duration_us;
        self
    }

    /// Sets the overrun threshold in seconds.
    pub fn burn_threshold_secs(mut self, secs: u32) -> Self {
        self.config.burn_threshold_secs = secs;
        self
    }

    /// Selects the clock reading used by the overrun handler.
    pub fn seconds_source(mut self, source: SecondsSource) -> Self {
        self.config.seconds_source = source;
        self
    }

    /// Sets the version number.
    pub fn version(mut self, version: u16) -> Self {
        self.config.version = version;
        self
    }

    /// Builds the scheduler configuration.
    pub fn build(self) -> SchedulerConfig {
        self.config
    }
}
