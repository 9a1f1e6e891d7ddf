//! Scheduler running against the real ticker thread

use grid_core::ClockConfig;
use grid_hal::UartPort;
use grid_posix::{PosixPort, SerialConsole, ThreadSleep};
use grid_sched::{Behavior, DispatchTable, Scheduler, SchedulerConfig};

#[test]
fn burn_waits_for_ticker() {
    let mut port = PosixPort::new(ClockConfig::default()).unwrap();
    port.start().unwrap();

    let config = SchedulerConfig::builder()
        .task_sleep_us(10_000)
        .burn_threshold_secs(1)
        .build();
    let table = DispatchTable::new([[Behavior::TaskOne, Behavior::Overrun, Behavior::TaskTwo]]);
    let mut sched = Scheduler::builder(
        table,
        port.clock(),
        SerialConsole::new(Vec::new()),
        ThreadSleep::new(),
    )
    .config(config)
    .build()
    .unwrap();

    sched.sweep();

    let report = sched.last_burn().unwrap();
    assert!(report.exit >= 1);
    assert_eq!(sched.marker(), report.exit);
    assert_eq!(sched.power().sleeps(), 1);
    assert_eq!(sched.dispatches(), 2);

    let (mut console, _) = sched.into_parts();
    console.flush().unwrap();
    let text = String::from_utf8(console.get_ref().clone()).unwrap();
    assert!(text.starts_with("Task one running \nI am stuck in burn \nBurn time = "));
    assert!(!text.contains("Task two"));

    port.stop().unwrap();
}
