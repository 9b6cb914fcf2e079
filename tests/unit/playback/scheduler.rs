use std::time::{Duration, Instant};

use super::*;

fn at(t0: Instant, secs: f64) -> Instant {
    t0 + Duration::from_secs_f64(secs)
}

#[test]
fn first_tick_advances_to_frame_zero() {
    let t0 = Instant::now();
    let mut s = PlaybackScheduler::new(30, 10);
    assert_eq!(s.last_shown(), None);
    assert_eq!(s.tick(t0), PlaybackSignal::Advance(FrameIndex(0)));
    assert_eq!(s.start(), Some(t0));
    assert_eq!(s.last_shown(), Some(FrameIndex(0)));
}

#[test]
fn same_interval_yields_idle() {
    let t0 = Instant::now();
    let mut s = PlaybackScheduler::new(10, 10);
    assert_eq!(s.tick(t0), PlaybackSignal::Advance(FrameIndex(0)));
    assert_eq!(s.tick(at(t0, 0.05)), PlaybackSignal::Idle);
    assert_eq!(s.tick(at(t0, 0.099)), PlaybackSignal::Idle);
    assert_eq!(s.tick(at(t0, 0.1)), PlaybackSignal::Advance(FrameIndex(1)));
    assert_eq!(s.tick(at(t0, 0.15)), PlaybackSignal::Idle);
}

#[test]
fn slow_ticks_skip_frames() {
    let t0 = Instant::now();
    let mut s = PlaybackScheduler::new(10, 100);
    assert_eq!(s.tick(t0), PlaybackSignal::Advance(FrameIndex(0)));
    assert_eq!(s.tick(at(t0, 0.55)), PlaybackSignal::Advance(FrameIndex(5)));
    assert_eq!(s.dropped_frames(), 4);
    assert_eq!(s.tick(at(t0, 0.61)), PlaybackSignal::Advance(FrameIndex(6)));
    assert_eq!(s.dropped_frames(), 4);
}

#[test]
fn increasing_samples_never_repeat_an_advance() {
    let t0 = Instant::now();
    let mut s = PlaybackScheduler::new(24, 48);
    let mut advanced = Vec::new();
    let mut finished_at = None;
    for step in 0..400u32 {
        let secs = f64::from(step) * 0.007;
        match s.tick(at(t0, secs)) {
            PlaybackSignal::Advance(i) => advanced.push(i.0),
            PlaybackSignal::Idle => {}
            PlaybackSignal::Finished => {
                finished_at = Some(secs);
                break;
            }
        }
    }

    assert!(advanced.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(advanced.first(), Some(&0));
    assert_eq!(advanced.last(), Some(&47));

    let finished_at = finished_at.expect("scheduler should finish");
    assert!(finished_at * 24.0 >= 48.0);
    assert!((finished_at - 0.007) * 24.0 < 48.0);
}

#[test]
fn finished_is_terminal() {
    let t0 = Instant::now();
    let mut s = PlaybackScheduler::new(1, 2);
    assert_eq!(s.tick(t0), PlaybackSignal::Advance(FrameIndex(0)));
    assert_eq!(s.tick(at(t0, 2.0)), PlaybackSignal::Finished);
    assert!(s.is_finished());
    // Even a sample that maps back into range stays finished.
    assert_eq!(s.tick(at(t0, 0.5)), PlaybackSignal::Finished);
}

#[test]
fn empty_video_finishes_immediately() {
    let mut s = PlaybackScheduler::new(30, 0);
    assert_eq!(s.tick(Instant::now()), PlaybackSignal::Finished);
}

#[test]
fn reference_two_frame_example() {
    let t0 = Instant::now();
    let mut s = PlaybackScheduler::new(1, 2);
    assert_eq!(s.tick(at(t0, 0.0)), PlaybackSignal::Advance(FrameIndex(0)));
    assert_eq!(s.tick(at(t0, 1.2)), PlaybackSignal::Advance(FrameIndex(1)));
    assert_eq!(s.tick(at(t0, 2.0)), PlaybackSignal::Finished);
}
