use super::*;

#[test]
fn manual_clock_moves_only_when_told() {
    let mut clock = ManualClock::new();
    let t0 = clock.now();
    assert_eq!(clock.now(), t0);

    clock.sleep(Duration::from_millis(3));
    clock.advance(Duration::from_millis(2));
    assert_eq!(clock.now() - t0, Duration::from_millis(5));
    assert_eq!(clock.elapsed(), Duration::from_millis(5));
}

#[test]
fn stepped_clock_advances_after_each_read() {
    let mut clock = ManualClock::new().with_step(Duration::from_millis(10));
    let t0 = clock.now();
    let t1 = clock.now();
    let t2 = clock.now();
    assert_eq!(t1 - t0, Duration::from_millis(10));
    assert_eq!(t2 - t0, Duration::from_millis(20));
}

#[test]
fn system_clock_is_monotonic() {
    let mut clock = SystemClock;
    let a = clock.now();
    clock.sleep(Duration::from_millis(1));
    assert!(clock.now() > a);
}
