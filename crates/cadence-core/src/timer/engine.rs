//! Sequence timer engine.
//!
//! The engine is a tick-based state machine: it owns no time source of its
//! own, but registers a repeating one-second callback with the [`Clock`] it
//! was given when started, and cancels that registration when paused.
//!
//! ## State
//!
//! ```text
//! load -> idle -> start -> running -> (pause | completion) -> idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let timer = SequenceTimer::new(Arc::new(SystemClock));
//! let events = timer.subscribe();
//! timer.load(sequence);
//! timer.start();
//! for event in events { /* render, beep, speak */ }
//! ```
//!
//! All inputs are normalized rather than rejected; no method here fails.

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, TickGuard};
use super::sequence::{Sequence, Step};
use crate::events::{EventBus, EventKind, TimerEvent};

/// Read-only, point-in-time copy of the timer state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub steps: Vec<Step>,
    pub current_index: usize,
    pub current_step: Option<Step>,
    pub remaining_seconds: u64,
    pub total_loops: u32,
    pub current_loop: u32,
    pub is_running: bool,
}

struct Inner {
    steps: Vec<Step>,
    current_index: usize,
    remaining_seconds: u64,
    total_loops: u32,
    current_loop: u32,
    auto_repeat: bool,
    /// Last remaining value announced for the current step; cleared on every
    /// step change, reset and load so each step announces each value once.
    last_announced: Option<u64>,
    /// Live tick registration. `Some` iff the timer is running.
    ticker: Option<Box<dyn TickGuard>>,
    /// Bumped whenever the registration changes; a callback whose generation
    /// no longer matches belongs to a cancelled registration and is ignored.
    generation: u64,
}

/// Counts down through a sequence of steps on a one-second tick, announcing
/// transitions and optionally looping the whole sequence.
///
/// Cloning yields another handle to the same timer. All methods take `&self`
/// and are safe to call from event-handling threads.
#[derive(Clone)]
pub struct SequenceTimer {
    clock: Arc<dyn Clock>,
    inner: Arc<Mutex<Inner>>,
    bus: EventBus,
}

impl SequenceTimer {
    /// Create an idle timer with an empty sequence.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Arc::new(Mutex::new(Inner {
                steps: Vec::new(),
                current_index: 0,
                remaining_seconds: 0,
                total_loops: 1,
                current_loop: 1,
                auto_repeat: false,
                last_announced: None,
                ticker: None,
                generation: 0,
            })),
            bus: EventBus::new(),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Stream of every event, in emission order.
    pub fn subscribe(&self) -> Receiver<TimerEvent> {
        self.bus.subscribe()
    }

    /// Stream of one event kind.
    pub fn subscribe_to(&self, kind: EventKind) -> Receiver<TimerEvent> {
        self.bus.subscribe_to(kind)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.inner.lock().unwrap().ticker.is_some()
    }

    pub fn current_step(&self) -> Option<Step> {
        let inner = self.inner.lock().unwrap();
        inner.steps.get(inner.current_index).cloned()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().unwrap().snapshot()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the sequence with a private copy of `sequence` and fully
    /// reset: first step current, loop counter rewound, announcement marker
    /// cleared. Loading while running pauses first; loading an empty
    /// sequence leaves the timer idle.
    pub fn load(&self, sequence: Sequence) {
        let mut inner = self.inner.lock().unwrap();
        inner.halt();
        inner.steps = sequence.into_steps();
        inner.rewind();
        let event = TimerEvent::Tick {
            snapshot: inner.snapshot(),
            at: Utc::now(),
        };
        self.bus.emit(event);
    }

    /// Begin ticking. No-op while already running or when the sequence is
    /// empty. A remaining count left at zero (after a prior completion) is
    /// re-initialized from the current step. Emits an immediate tick event
    /// reflecting the running state.
    pub fn start(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.ticker.is_some() || inner.steps.is_empty() {
            return;
        }
        if inner.remaining_seconds == 0 {
            inner.remaining_seconds = inner.steps[inner.current_index].seconds;
        }
        inner.generation = inner.generation.wrapping_add(1);
        let generation = inner.generation;
        let shared = Arc::clone(&self.inner);
        let bus = self.bus.clone();
        let guard = self
            .clock
            .every_second(Box::new(move || Inner::on_tick(&shared, &bus, generation)));
        inner.ticker = Some(guard);
        let event = TimerEvent::Tick {
            snapshot: inner.snapshot(),
            at: Utc::now(),
        };
        self.bus.emit(event);
    }

    /// Cancel the tick registration and stop. Idempotent; state is kept so
    /// `start` resumes where the timer left off.
    pub fn pause(&self) {
        self.inner.lock().unwrap().halt();
    }

    /// Alias for [`SequenceTimer::pause`].
    pub fn stop(&self) {
        self.pause();
    }

    /// Pause if running, rewind to the first step and the first loop, and
    /// emit a tick event reflecting the rewound state.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.halt();
        inner.rewind();
        let event = TimerEvent::Tick {
            snapshot: inner.snapshot(),
            at: Utc::now(),
        };
        self.bus.emit(event);
    }

    /// Set the target number of full passes. Values below 1 clamp to 1; the
    /// loop counter restarts at 1. Running state is untouched.
    pub fn set_loop_count(&self, n: i64) {
        let mut inner = self.inner.lock().unwrap();
        inner.total_loops = n.clamp(1, u32::MAX as i64) as u32;
        inner.current_loop = 1;
    }

    /// When enabled the sequence repeats indefinitely, regardless of the
    /// loop target. Takes effect at the next pass-completion check.
    pub fn set_auto_repeat(&self, enabled: bool) {
        self.inner.lock().unwrap().auto_repeat = enabled;
    }
}

impl Inner {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            steps: self.steps.clone(),
            current_index: self.current_index,
            current_step: self.steps.get(self.current_index).cloned(),
            remaining_seconds: self.remaining_seconds,
            total_loops: self.total_loops,
            current_loop: self.current_loop,
            is_running: self.ticker.is_some(),
        }
    }

    /// Cancel the tick registration, if any. The handle is cleared and the
    /// generation bumped before anything else so a callback that already
    /// fired cannot land in the reset state.
    fn halt(&mut self) {
        if let Some(guard) = self.ticker.take() {
            guard.cancel();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Rewind to the first step of the first loop. Does not touch the loop
    /// target or the auto-repeat flag.
    fn rewind(&mut self) {
        self.current_index = 0;
        self.remaining_seconds = self.steps.first().map(|s| s.seconds).unwrap_or(0);
        self.current_loop = 1;
        self.last_announced = None;
    }

    /// One second of progress. Runs on the clock's callback; bails out when
    /// the registration it belongs to has been cancelled.
    fn on_tick(inner: &Arc<Mutex<Inner>>, bus: &EventBus, generation: u64) {
        let mut s = inner.lock().unwrap();
        if s.ticker.is_none() || s.generation != generation {
            return;
        }

        s.remaining_seconds = s.remaining_seconds.saturating_sub(1);
        bus.emit(TimerEvent::Tick {
            snapshot: s.snapshot(),
            at: Utc::now(),
        });
        bus.emit(TimerEvent::TickSound {
            snapshot: s.snapshot(),
            at: Utc::now(),
        });

        if s.remaining_seconds > 0 {
            // Announce at positive multiples of 10 and every second in the
            // final 5, once per distinct value per step.
            let rs = s.remaining_seconds;
            let on_ten = rs % 10 == 0;
            let final_five = rs <= 5;
            if (on_ten || final_five) && s.last_announced != Some(rs) {
                s.last_announced = Some(rs);
                bus.emit(TimerEvent::RemainingAnnounced {
                    seconds: rs,
                    snapshot: s.snapshot(),
                    at: Utc::now(),
                });
            }
            return;
        }

        bus.emit(TimerEvent::Beep {
            snapshot: s.snapshot(),
            at: Utc::now(),
        });

        if s.current_index + 1 < s.steps.len() {
            s.current_index += 1;
            s.remaining_seconds = s.steps[s.current_index].seconds;
            s.last_announced = None;
            bus.emit(TimerEvent::StepChanged {
                snapshot: s.snapshot(),
                at: Utc::now(),
            });
            bus.emit(TimerEvent::SpeechRequested {
                text: s.steps[s.current_index].name.clone(),
                at: Utc::now(),
            });
        } else if s.auto_repeat || s.current_loop < s.total_loops {
            s.current_loop += 1;
            s.current_index = 0;
            s.remaining_seconds = s.steps.first().map(|st| st.seconds).unwrap_or(0);
            s.last_announced = None;
            bus.emit(TimerEvent::StepChanged {
                snapshot: s.snapshot(),
                at: Utc::now(),
            });
            if let Some(first) = s.steps.first() {
                bus.emit(TimerEvent::SpeechRequested {
                    text: first.name.clone(),
                    at: Utc::now(),
                });
            }
        } else {
            s.halt();
            bus.emit(TimerEvent::Completed {
                snapshot: s.snapshot(),
                at: Utc::now(),
            });
        }
    }
}
