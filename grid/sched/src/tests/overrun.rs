use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use grid_core::{Clock, ElapsedTime};

use super::with_feeder;
use crate::overrun::{OverrunHandler, SecondsSource};

fn feed(clock: &Clock, ticks: u64) {
    for _ in 0..ticks {
        clock.on_tick();
    }
}

#[test]
fn burn_exits_immediately_at_five_seconds() {
    for source in [SecondsSource::SecondOfMinute, SecondsSource::Monotonic] {
        let clock = Clock::new(10);
        feed(&clock, 50_000);
        assert_eq!(clock.now(), ElapsedTime::new(0, 5, 0));

        let handler = OverrunHandler::new(5, source);
        let mut marker = 0;
        assert_eq!(handler.remaining(marker, &clock), 0);

        let report = handler.burn(&mut marker, &clock);
        assert_eq!(report.start, 5);
        assert_eq!(report.exit, 5);
        assert_eq!(report.duration, 0);
        assert_eq!(marker, 5);
    }
}

#[test]
fn second_of_minute_keeps_difference_as_marker() {
    let clock = Clock::new(10);
    clock.set(ElapsedTime::new(0, 12, 0));

    let handler = OverrunHandler::new(5, SecondsSource::SecondOfMinute);
    let mut marker = 5;
    let report = handler.burn(&mut marker, &clock);

    assert_eq!(report.exit, 12);
    assert_eq!(marker, 7);
    assert_eq!(report.duration, 5);
}

#[test]
fn monotonic_keeps_exit_time_as_marker() {
    let clock = Clock::new(10);
    clock.set(ElapsedTime::new(1, 12, 0));

    let handler = OverrunHandler::new(5, SecondsSource::Monotonic);
    let mut marker = 60;
    let report = handler.burn(&mut marker, &clock);

    assert_eq!(report.exit, 72);
    assert_eq!(marker, 72);
    assert_eq!(report.duration, 0);
}

#[test]
fn minute_wrap_stalls_second_of_minute_source() {
    let clock = Clock::new(1);
    clock.set(ElapsedTime::new(0, 58, 0));
    feed(&clock, 4_000);
    assert_eq!(clock.elapsed_seconds(), 2);

    let handler = OverrunHandler::new(5, SecondsSource::SecondOfMinute);
    // 2 - 55 = -53: nine real seconds have passed but the loop would spin on.
    assert_eq!(handler.remaining(55, &clock), 58);
    assert!(!handler.is_satisfied(55, &clock));
}

#[test]
fn minute_wrap_burn_spins_until_seconds_catch_up() {
    // Marker taken at 0:54, burn entered once the minute has wrapped.
    let clock = Clock::new(1);
    clock.set(ElapsedTime::new(1, 0, 0));
    let handler = OverrunHandler::new(5, SecondsSource::SecondOfMinute);
    let returned = AtomicBool::new(false);

    let (report, marker) = thread::scope(|s| {
        let burner = s.spawn(|| {
            let mut marker = 54;
            let report = handler.burn(&mut marker, &clock);
            returned.store(true, Ordering::Release);
            (report, marker)
        });

        // 1:08 is fourteen seconds after the marker, yet 8 - 54 < 5.
        feed(&clock, 8_000);
        thread::sleep(Duration::from_millis(50));
        let seconds = clock.elapsed_seconds();
        let stalled = !returned.load(Ordering::Acquire);

        // Only second 59 of a later minute is 5 past the marker.
        clock.set(ElapsedTime::new(1, 59, 0));
        let outcome = burner.join().unwrap();
        assert_eq!(seconds, 8);
        assert!(stalled, "burn returned after the wrap");
        outcome
    });

    assert!(returned.load(Ordering::Acquire));
    assert_eq!(report.exit, 59);
    assert_eq!(marker, 5);
    assert_eq!(report.duration, 54);
}

#[test]
fn minute_wrap_is_harmless_for_monotonic_source() {
    let clock = Clock::new(1);
    clock.set(ElapsedTime::new(0, 58, 0));
    feed(&clock, 4_000);

    let handler = OverrunHandler::new(5, SecondsSource::Monotonic);
    let mut marker = 55;
    assert_eq!(handler.remaining(marker, &clock), -2);

    let report = handler.burn(&mut marker, &clock);
    assert_eq!(report.exit, 62);
    assert_eq!(marker, 62);
}

#[test]
fn burn_waits_for_threshold_while_clock_ticks() {
    let clock = Clock::new(1);
    clock.set(ElapsedTime::new(0, 3, 0));

    let handler = OverrunHandler::new(5, SecondsSource::Monotonic);
    let mut marker = 3;
    assert!(!handler.is_satisfied(marker, &clock));

    let report = with_feeder(&clock, || handler.burn(&mut marker, &clock));

    assert_eq!(report.start, 3);
    assert!(report.exit - 3 >= 5, "exited early at {}", report.exit);
    assert_eq!(marker, report.exit);
    assert!(clock.total_seconds() >= 8);
}

#[test]
fn second_of_minute_burn_waits_from_zero() {
    let clock = Clock::new(10);
    let handler = OverrunHandler::new(5, SecondsSource::SecondOfMinute);
    let mut marker = 0;

    let report = with_feeder(&clock, || handler.burn(&mut marker, &clock));

    assert!(report.exit >= 5, "exited early at {}", report.exit);
    assert_eq!(marker, report.exit);
}

#[test]
fn default_handler() {
    let handler = OverrunHandler::default();
    assert_eq!(handler.threshold(), 5);
    assert_eq!(handler.source(), SecondsSource::Monotonic);
}
