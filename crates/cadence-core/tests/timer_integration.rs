//! End-to-end engine behavior through the public API, driven by the manual
//! clock.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

use cadence_core::{EventKind, ManualClock, Sequence, SequenceTimer, Step, TimerEvent};

fn timer_with(steps: Vec<Step>) -> (SequenceTimer, ManualClock, Receiver<TimerEvent>) {
    let clock = ManualClock::new();
    let timer = SequenceTimer::new(Arc::new(clock.clone()));
    let events = timer.subscribe();
    timer.load(Sequence::new(steps));
    (timer, clock, events)
}

fn drain(events: &Receiver<TimerEvent>) -> Vec<TimerEvent> {
    std::iter::from_fn(|| events.try_recv().ok()).collect()
}

fn kinds(events: &Receiver<TimerEvent>) -> Vec<EventKind> {
    drain(events).iter().map(TimerEvent::kind).collect()
}

#[test]
fn loaded_sequence_starts_idle_at_first_step() {
    let (timer, _clock, _events) = timer_with(vec![Step::new("warm", 45), Step::new("steep", 60)]);
    let snap = timer.snapshot();
    assert_eq!(snap.current_index, 0);
    assert_eq!(snap.remaining_seconds, 45);
    assert_eq!(snap.current_step.unwrap().name, "warm");
    assert!(!snap.is_running);
}

#[test]
fn single_step_completes_on_the_last_tick() {
    let d = 7;
    let (timer, clock, events) = timer_with(vec![Step::new("only", d)]);
    timer.start();
    let mut completions = 0;
    for tick in 1..=d {
        clock.advance();
        let newly = drain(&events)
            .iter()
            .filter(|e| e.kind() == EventKind::Completed)
            .count();
        if tick < d {
            assert_eq!(newly, 0, "no completion before tick {d}");
        } else {
            assert_eq!(newly, 1, "exactly one completion on tick {d}");
        }
        completions += newly;
    }
    assert_eq!(completions, 1);
    assert!(!timer.is_running());
}

#[test]
fn remaining_announcements_fire_at_tens_and_final_five_once_each() {
    let (timer, clock, _all) = timer_with(vec![Step::new("steep", 25)]);
    let announced = timer.subscribe_to(EventKind::RemainingAnnounced);
    timer.start();
    clock.advance_by(25);
    let values: Vec<u64> = std::iter::from_fn(|| announced.try_recv().ok())
        .map(|e| match e {
            TimerEvent::RemainingAnnounced { seconds, .. } => seconds,
            other => panic!("unexpected {:?}", other.kind()),
        })
        .collect();
    assert_eq!(values, vec![20, 10, 5, 4, 3, 2, 1]);
}

#[test]
fn loop_target_runs_the_sequence_that_many_times() {
    let (timer, clock, _all) = timer_with(vec![Step::new("work", 5), Step::new("rest", 5)]);
    timer.set_loop_count(3);
    let changes = timer.subscribe_to(EventKind::StepChanged);
    let done = timer.subscribe_to(EventKind::Completed);
    timer.start();
    clock.advance_by(30);

    let change_snaps: Vec<(usize, u32)> = std::iter::from_fn(|| changes.try_recv().ok())
        .map(|e| {
            let s = e.snapshot().unwrap().clone();
            (s.current_index, s.current_loop)
        })
        .collect();
    // Two advances per pass boundary to "rest", two rewinds back to "work".
    assert_eq!(
        change_snaps,
        vec![(1, 1), (0, 2), (1, 2), (0, 3), (1, 3)]
    );
    let completions: Vec<TimerEvent> = std::iter::from_fn(|| done.try_recv().ok()).collect();
    assert_eq!(completions.len(), 1);
    let final_snap = completions[0].snapshot().unwrap();
    assert_eq!(final_snap.current_loop, 3);
    assert!(!final_snap.is_running);
    assert!(!timer.is_running());
}

#[test]
fn auto_repeat_never_completes() {
    let (timer, clock, _all) = timer_with(vec![Step::new("jump", 2), Step::new("rest", 1)]);
    timer.set_loop_count(2);
    timer.set_auto_repeat(true);
    let done = timer.subscribe_to(EventKind::Completed);
    let changes = timer.subscribe_to(EventKind::StepChanged);
    timer.start();
    clock.advance_by(100);
    assert!(done.try_recv().is_err(), "auto-repeat must not complete");
    assert!(timer.is_running());
    let change_count = std::iter::from_fn(|| changes.try_recv().ok()).count();
    // One pass is 3 seconds and holds 2 step changes.
    assert!(change_count > 60, "step changes keep flowing, got {change_count}");
}

#[test]
fn disabling_auto_repeat_lets_the_sequence_finish() {
    let (timer, clock, _all) = timer_with(vec![Step::new("work", 2)]);
    timer.set_auto_repeat(true);
    let done = timer.subscribe_to(EventKind::Completed);
    timer.start();
    clock.advance_by(5);
    assert!(done.try_recv().is_err());
    timer.set_auto_repeat(false);
    // Takes effect at the next pass-completion check.
    clock.advance_by(2);
    assert_eq!(std::iter::from_fn(|| done.try_recv().ok()).count(), 1);
}

#[test]
fn reset_then_start_replays_the_fresh_run() {
    let steps = || {
        vec![
            Step::new("one", 2),
            Step::new("two", 1),
            Step::new("three", 2),
        ]
    };
    let observe = |timer: &SequenceTimer, clock: &ManualClock| -> Vec<(EventKind, u64, usize)> {
        let events = timer.subscribe();
        timer.start();
        clock.advance_by(5);
        drain(&events)
            .iter()
            .map(|e| {
                let snap = e.snapshot();
                (
                    e.kind(),
                    snap.map(|s| s.remaining_seconds).unwrap_or_default(),
                    snap.map(|s| s.current_index).unwrap_or_default(),
                )
            })
            .collect()
    };

    let (fresh, fresh_clock, _e1) = timer_with(steps());
    let expected = observe(&fresh, &fresh_clock);

    let (reused, reused_clock, _e2) = timer_with(steps());
    reused.start();
    reused_clock.advance_by(3);
    reused.pause();
    reused.reset();
    let replay = observe(&reused, &reused_clock);

    assert_eq!(replay, expected);
}

#[test]
fn double_start_yields_one_tick_per_second() {
    let (timer, clock, _all) = timer_with(vec![Step::new("a", 10)]);
    let ticks = timer.subscribe_to(EventKind::Tick);
    timer.start();
    timer.start();
    // Both calls emit at most one immediate tick event between them.
    assert_eq!(std::iter::from_fn(|| ticks.try_recv().ok()).count(), 1);
    clock.advance_by(4);
    assert_eq!(std::iter::from_fn(|| ticks.try_recv().ok()).count(), 4);
}

#[test]
fn zero_duration_first_step_advances_immediately() {
    let (timer, clock, events) = timer_with(vec![Step::new("instant", 0), Step::new("real", 3)]);
    timer.start();
    drain(&events);
    clock.advance();
    assert_eq!(
        kinds(&events),
        vec![
            EventKind::Tick,
            EventKind::TickSound,
            EventKind::Beep,
            EventKind::StepChanged,
            EventKind::SpeechRequested,
        ]
    );
    assert_eq!(timer.snapshot().current_index, 1);
}

#[test]
fn per_tick_emission_order_is_fixed() {
    // Announcement tick.
    let (timer, clock, events) = timer_with(vec![Step::new("a", 11), Step::new("b", 1)]);
    timer.start();
    drain(&events);
    clock.advance();
    assert_eq!(
        kinds(&events),
        vec![
            EventKind::Tick,
            EventKind::TickSound,
            EventKind::RemainingAnnounced,
        ]
    );

    // Plain tick.
    clock.advance();
    assert_eq!(kinds(&events), vec![EventKind::Tick, EventKind::TickSound]);

    // Boundary tick with a following step.
    clock.advance_by(8);
    drain(&events);
    clock.advance();
    assert_eq!(
        kinds(&events),
        vec![
            EventKind::Tick,
            EventKind::TickSound,
            EventKind::Beep,
            EventKind::StepChanged,
            EventKind::SpeechRequested,
        ]
    );

    // Completion tick.
    clock.advance();
    assert_eq!(
        kinds(&events),
        vec![
            EventKind::Tick,
            EventKind::TickSound,
            EventKind::Beep,
            EventKind::Completed,
        ]
    );
}

#[test]
fn speech_request_carries_the_new_step_name() {
    let (timer, clock, _all) = timer_with(vec![Step::new("first", 1), Step::new("second", 1)]);
    let speech = timer.subscribe_to(EventKind::SpeechRequested);
    timer.start();
    clock.advance();
    match speech.try_recv().unwrap() {
        TimerEvent::SpeechRequested { text, .. } => assert_eq!(text, "second"),
        other => panic!("unexpected {:?}", other.kind()),
    }
}
