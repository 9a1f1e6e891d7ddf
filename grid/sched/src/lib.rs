#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # Grid Scheduler
//!
//! A cooperative, single-threaded scheduler that walks a fixed
//! `SLOTS × CYCLES` dispatch table forever. Each cell names one
//! [`Behavior`]: a task that prints and then sleeps in low power, or the
//! overrun handler that spins on the [`Clock`](grid_core::Clock) until a
//! minimum number of seconds has passed since the previous burn.
//!
//! ## Module Overview
//! - [`behavior`]  – The closed set of schedulable behaviours.
//! - [`table`]     – The dispatch table and the reference layout.
//! - [`context`]   – Cursor and per-dispatch context handed to behaviours.
//! - [`overrun`]   – The busy-wait burn and its seconds source.
//! - [`config`]    – Scheduler configuration and builder.
//! - [`scheduler`] – The rotation itself.

pub mod behavior;
pub mod config;
pub mod context;
pub mod overrun;
pub mod scheduler;
pub mod table;

pub use behavior::Behavior;
pub use config::{SchedulerConfig, SchedulerConfigBuilder, DEFAULT_TASK_SLEEP_US};
pub use context::{Context, ScheduleCursor};
pub use overrun::{BurnReport, OverrunHandler, SecondsSource, DEFAULT_BURN_THRESHOLD_SECS};
pub use scheduler::{DispatchHook, DispatchRecord, Scheduler, SchedulerBuilder};
pub use table::{DispatchTable, ReferenceTable, NUM_CYCLES, NUM_SLOTS, REFERENCE_TABLE};

#[cfg(test)]
mod tests;
