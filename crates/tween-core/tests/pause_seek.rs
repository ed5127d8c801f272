use std::cell::Cell;
use std::rc::Rc;

use tween_core::{ManualClock, Timeline, TweenConfig, TweenState};

fn fixture() -> (Rc<ManualClock>, Timeline) {
    let clock = Rc::new(ManualClock::new());
    let timeline = Timeline::with_clock(clock.clone());
    (clock, timeline)
}

fn linear_x(duration: f64) -> TweenConfig {
    TweenConfig {
        duration,
        from: Some(TweenState::from([("x", 0.0)])),
        to: Some(TweenState::from([("x", 10.0)])),
        ..Default::default()
    }
}

#[test]
fn pause_freezes_the_timeline() {
    let (clock, timeline) = fixture();
    let run = timeline.tween(linear_x(100.0)).expect("tween");

    clock.set(20.0);
    timeline.tick();
    assert_eq!(run.tween.state().get("x"), Some(2.0));

    run.tween.pause();
    assert!(!run.tween.is_playing());
    // paused tweens are skipped during ticking, not evicted
    assert_eq!(timeline.active_count(), 1);

    clock.set(70.0);
    timeline.tick();
    assert_eq!(run.tween.state().get("x"), Some(2.0));
}

#[test]
fn resume_after_pause_matches_an_unpaused_run_at_shifted_time() {
    let (clock, timeline) = fixture();

    let paused = timeline.tween(linear_x(100.0)).expect("paused run");
    let control = timeline.tween(linear_x(100.0)).expect("control run");

    clock.set(20.0);
    timeline.tick();

    // pause one tween for 50ms, leave the control running
    paused.tween.pause();
    clock.set(70.0);
    paused.tween.resume();

    clock.set(120.0);
    timeline.tick();

    // paused tween at 120ms with a 50ms gap == control at 120 - 50 = 70ms
    let shifted = paused.tween.state().get("x").expect("x");
    assert!((shifted - 7.0).abs() < 1e-9, "expected ~7, got {shifted}");

    // drive a fresh control to 70ms for the same answer
    let (clock2, timeline2) = fixture();
    let fresh = timeline2.tween(linear_x(100.0)).expect("fresh");
    clock2.set(70.0);
    timeline2.tick();
    let unshifted = fresh.tween.state().get("x").expect("x");
    assert!((shifted - unshifted).abs() < 1e-9);
    drop(control);
}

#[test]
fn resume_is_idempotent_and_shares_the_promise() {
    let (clock, timeline) = fixture();
    let run = timeline.tween(linear_x(100.0)).expect("tween");

    clock.set(10.0);
    run.tween.pause();
    let first = run.tween.resume();
    let second = run.tween.resume();
    assert!(first.same_handle(&second));
    assert!(first.same_handle(&run.promise));
    assert_eq!(timeline.active_count(), 1);
}

#[test]
fn seek_zero_restores_the_original_state() {
    let (clock, timeline) = fixture();
    let run = timeline.tween(linear_x(100.0)).expect("tween");

    clock.set(60.0);
    timeline.tick();
    assert_eq!(run.tween.state().get("x"), Some(6.0));

    run.tween.pause();
    run.tween.seek(0.0);
    // not playing, so the seek forced one synchronous tick
    assert_eq!(run.tween.state().get("x"), Some(0.0));
    assert!(!run.tween.is_playing());
}

#[test]
fn seek_on_a_non_playing_tween_fires_step_and_repauses() {
    let (clock, timeline) = fixture();
    let steps = Rc::new(Cell::new(0u32));
    let counter = steps.clone();
    let run = timeline
        .tween(TweenConfig {
            duration: 100.0,
            from: Some(TweenState::from([("x", 0.0)])),
            to: Some(TweenState::from([("x", 10.0)])),
            step: Some(Box::new(move |_, _, _| counter.set(counter.get() + 1))),
            ..Default::default()
        })
        .expect("tween");

    run.tween.pause();
    clock.set(5.0);
    run.tween.seek(40.0);
    assert_eq!(steps.get(), 1);
    assert!((run.tween.state().get("x").unwrap() - 4.0).abs() < 1e-9);
    assert!(!run.tween.is_playing());

    // unchanged resulting timestamp: a strict no-op, no extra step
    run.tween.seek(40.0);
    assert_eq!(steps.get(), 1);

    // a playing tween only shifts its timestamp; state updates next tick
    run.tween.resume();
    run.tween.seek(80.0);
    assert_eq!(steps.get(), 1);
    timeline.tick();
    assert_eq!(steps.get(), 2);
    assert!((run.tween.state().get("x").unwrap() - 8.0).abs() < 1e-9);
}

#[test]
fn negative_seek_clamps_to_zero() {
    let (clock, timeline) = fixture();
    let run = timeline.tween(linear_x(100.0)).expect("tween");

    clock.set(30.0);
    timeline.tick();
    run.tween.pause();
    run.tween.seek(-25.0);
    assert_eq!(run.tween.state().get("x"), Some(0.0));
}

#[test]
fn seek_past_the_end_completes_a_paused_tween() {
    let (clock, timeline) = fixture();
    let run = timeline.tween(linear_x(100.0)).expect("tween");

    run.tween.pause();
    clock.set(10.0);
    run.tween.seek(150.0);
    assert!(run.promise.outcome().expect("resolved").completed);
    assert_eq!(run.tween.state().get("x"), Some(10.0));
    assert_eq!(timeline.active_count(), 0);
}

#[test]
fn seek_on_a_never_started_tween_leaves_it_unstarted() {
    let (clock, timeline) = fixture();
    let tween = timeline.new_tween();
    tween.configure(linear_x(100.0)).expect("configure");

    clock.set(5.0);
    tween.seek(40.0);
    assert!((tween.state().get("x").unwrap() - 4.0).abs() < 1e-9);
    assert!(!tween.is_playing());
    assert_eq!(timeline.active_count(), 0, "seeking must not enqueue");
    assert!(!tween.promise().is_settled());

    // still never-started, so the instance is disposable
    assert_eq!(tween.dispose(), Ok(()));
}

#[test]
fn a_seek_that_completes_leaves_no_resumable_state() {
    let (clock, timeline) = fixture();
    let run = timeline.tween(linear_x(100.0)).expect("tween");

    run.tween.pause();
    clock.set(10.0);
    run.tween.seek(150.0);
    assert!(run.promise.outcome().expect("resolved").completed);
    assert!(!run.tween.is_playing());
    assert_eq!(timeline.active_count(), 0);

    // resuming a completed run is a no-op, not a re-queue
    let promise = run.tween.resume();
    assert!(promise.same_handle(&run.promise));
    assert_eq!(timeline.active_count(), 0);
    assert!(!run.tween.is_playing());
    clock.set(200.0);
    timeline.tick();
    assert_eq!(run.tween.state().get("x"), Some(10.0));

    // a stopped instance is also disposable
    assert_eq!(run.tween.dispose(), Ok(()));
}

#[test]
fn delay_holds_the_start_values_then_runs() {
    let (clock, timeline) = fixture();
    let run = timeline
        .tween(TweenConfig {
            delay: 50.0,
            duration: 100.0,
            from: Some(TweenState::from([("x", 0.0)])),
            to: Some(TweenState::from([("x", 10.0)])),
            ..Default::default()
        })
        .expect("tween");

    // inside the delay window the state stays at the original values
    clock.set(30.0);
    timeline.tick();
    assert_eq!(run.tween.state().get("x"), Some(0.0));
    assert!(run.tween.is_playing());

    // progress counts from the end of the delay window
    clock.set(80.0);
    timeline.tick();
    let x = run.tween.state().get("x").expect("x");
    assert!((x - 3.0).abs() < 1e-9, "expected ~3, got {x}");

    clock.set(150.0);
    timeline.tick();
    assert_eq!(run.tween.state().get("x"), Some(10.0));
    assert!(run.promise.outcome().expect("resolved").completed);
}
