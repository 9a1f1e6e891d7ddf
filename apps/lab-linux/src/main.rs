use std::process;
use std::sync::{Arc, Mutex};

use anyhow::{Context as _, Result};
use clap::Parser;
use grid_core::{ClockConfig, DEFAULT_TICKS_PER_MS, DEFAULT_TICK_PERIOD_US};
use grid_hal::{UartConfig, UartPort};
use grid_posix::{on_interrupt, PosixPort};
use grid_sched::{
    Scheduler, SchedulerConfig, SecondsSource, DEFAULT_BURN_THRESHOLD_SECS, REFERENCE_TABLE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Runs the reference 4x5 slot grid on the host")]
struct Opts {
    /// Timer tick period in microseconds
    #[arg(long = "tick-us", default_value_t = DEFAULT_TICK_PERIOD_US, value_name = "US")]
    tick_us: u32,

    /// Ticks that make up one millisecond
    #[arg(long = "ticks-per-ms", default_value_t = DEFAULT_TICKS_PER_MS, value_name = "N")]
    ticks_per_ms: u32,

    /// Low-power wait after each task message
    #[arg(long = "task-sleep-ms", default_value_t = 1000, value_name = "MS")]
    task_sleep_ms: u64,

    /// Minimum seconds between burns
    #[arg(long = "burn-threshold", default_value_t = DEFAULT_BURN_THRESHOLD_SECS, value_name = "SECS")]
    burn_threshold: u32,

    /// Measure burns against the second-of-minute field (wraps every minute)
    #[arg(long = "wrapping-seconds")]
    wrapping_seconds: bool,

    /// Stop after this many sweeps instead of running forever
    #[arg(long = "sweeps", value_name = "N")]
    sweeps: Option<u64>,
}

impl Opts {
    fn clock_config(&self) -> ClockConfig {
        ClockConfig::new(self.tick_us, self.ticks_per_ms)
    }

    fn scheduler_config(&self) -> SchedulerConfig {
        let source = if self.wrapping_seconds {
            SecondsSource::SecondOfMinute
        } else {
            SecondsSource::Monotonic
        };
        SchedulerConfig::builder()
            .name("grid-lab")
            .task_sleep_us(self.task_sleep_ms.saturating_mul(1000))
            .burn_threshold_secs(self.burn_threshold)
            .seconds_source(source)
            .build()
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let opts = Opts::parse();

    let clock_config = opts.clock_config();
    if u64::from(clock_config.tick_period_us) * u64::from(clock_config.ticks_per_ms) != 1000 {
        log::warn!(
            "{}us x {} ticks is not one millisecond; the clock will drift from wall time",
            clock_config.tick_period_us,
            clock_config.ticks_per_ms
        );
    }

    let port = PosixPort::new(clock_config).context("configuring the host clock")?;
    let clock = port.shared_clock();
    let mut console = port
        .console(&UartConfig::default())
        .context("configuring the console")?;
    let power = port.low_power();
    let port = Arc::new(Mutex::new(port));

    let interrupted = Arc::clone(&port);
    on_interrupt(move || {
        if let Ok(mut port) = interrupted.lock() {
            if let Err(err) = port.stop() {
                log::error!("stopping ticker: {}", err);
            }
        }
        log::info!("interrupted, exiting");
        process::exit(130);
    })
    .context("installing the Ctrl-C handler")?;

    let banner = format!("Clock ticks/sec = {}\n\n", clock_config.ticks_per_second());
    if let Err(err) = console.write_str(&banner) {
        log::warn!("console write failed: {}", err);
    }

    lock(&port)?.start().context("starting the ticker")?;

    let mut scheduler = Scheduler::builder(REFERENCE_TABLE, &clock, console, power)
        .config(opts.scheduler_config())
        .build()
        .context("building the scheduler")?;

    match opts.sweeps {
        Some(count) => {
            scheduler.run_sweeps(count);
            lock(&port)?.stop()?;
            log::info!(
                "{} sweeps, {} dispatches, clock at {}",
                scheduler.sweeps(),
                scheduler.dispatches(),
                clock.now()
            );
            Ok(())
        }
        None => scheduler.run(),
    }
}

fn lock(port: &Mutex<PosixPort>) -> Result<std::sync::MutexGuard<'_, PosixPort>> {
    port.lock().map_err(|_| anyhow::anyhow!("host port lock poisoned"))
}
