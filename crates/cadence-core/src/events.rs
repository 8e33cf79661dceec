//! Timer event model and subscription bus.
//!
//! Every externally observable mutation of the engine is published as a
//! [`TimerEvent`]. Within one tick events come out in a fixed order: tick,
//! tick-sound, remaining-announcement, beep, step-change, speech-request,
//! completion. Consumers may rely on that order (the CLI pauses the timer on
//! a step change before the speech cue that follows it).

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Snapshot;

/// Discriminant used to subscribe to a single event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Tick,
    TickSound,
    RemainingAnnounced,
    Beep,
    StepChanged,
    SpeechRequested,
    Completed,
}

/// An engine event plus the state snapshot it was emitted under.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    /// One second elapsed (also emitted once on start and on reset).
    Tick {
        snapshot: Snapshot,
        at: DateTime<Utc>,
    },
    /// A short tick sound may be played; fires every second while running.
    TickSound {
        snapshot: Snapshot,
        at: DateTime<Utc>,
    },
    /// The remaining time in the current step should be read out.
    RemainingAnnounced {
        seconds: u64,
        snapshot: Snapshot,
        at: DateTime<Utc>,
    },
    /// A step or pass boundary was reached.
    Beep {
        snapshot: Snapshot,
        at: DateTime<Utc>,
    },
    /// The current step changed (advance or loop restart).
    StepChanged {
        snapshot: Snapshot,
        at: DateTime<Utc>,
    },
    /// Freeform text the presentation layer should speak.
    SpeechRequested { text: String, at: DateTime<Utc> },
    /// The final pass finished and the timer stopped itself.
    Completed {
        snapshot: Snapshot,
        at: DateTime<Utc>,
    },
}

impl TimerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            TimerEvent::Tick { .. } => EventKind::Tick,
            TimerEvent::TickSound { .. } => EventKind::TickSound,
            TimerEvent::RemainingAnnounced { .. } => EventKind::RemainingAnnounced,
            TimerEvent::Beep { .. } => EventKind::Beep,
            TimerEvent::StepChanged { .. } => EventKind::StepChanged,
            TimerEvent::SpeechRequested { .. } => EventKind::SpeechRequested,
            TimerEvent::Completed { .. } => EventKind::Completed,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            TimerEvent::Tick { snapshot, .. }
            | TimerEvent::TickSound { snapshot, .. }
            | TimerEvent::RemainingAnnounced { snapshot, .. }
            | TimerEvent::Beep { snapshot, .. }
            | TimerEvent::StepChanged { snapshot, .. }
            | TimerEvent::Completed { snapshot, .. } => Some(snapshot),
            TimerEvent::SpeechRequested { .. } => None,
        }
    }
}

struct Subscriber {
    filter: Option<EventKind>,
    sender: Sender<TimerEvent>,
}

/// Multi-subscriber event fan-out.
///
/// Each subscription gets its own channel; a subscriber whose receiver has
/// been dropped is pruned on the next emit, so teardown is just dropping the
/// receiver.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every event.
    pub fn subscribe(&self) -> Receiver<TimerEvent> {
        self.attach(None)
    }

    /// Subscribe to one event kind.
    pub fn subscribe_to(&self, kind: EventKind) -> Receiver<TimerEvent> {
        self.attach(Some(kind))
    }

    fn attach(&self, filter: Option<EventKind>) -> Receiver<TimerEvent> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap()
            .push(Subscriber { filter, sender });
        receiver
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    pub(crate) fn emit(&self, event: TimerEvent) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|sub| match sub.filter {
            Some(kind) if kind != event.kind() => true,
            _ => sub.sender.send(event.clone()).is_ok(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_event() -> TimerEvent {
        TimerEvent::Tick {
            snapshot: Snapshot::default(),
            at: Utc::now(),
        }
    }

    fn beep_event() -> TimerEvent {
        TimerEvent::Beep {
            snapshot: Snapshot::default(),
            at: Utc::now(),
        }
    }

    #[test]
    fn all_subscribers_receive_in_emission_order() {
        let bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        bus.emit(tick_event());
        bus.emit(beep_event());
        for rx in [a, b] {
            assert_eq!(rx.try_recv().unwrap().kind(), EventKind::Tick);
            assert_eq!(rx.try_recv().unwrap().kind(), EventKind::Beep);
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn kind_filter_only_sees_matching_events() {
        let bus = EventBus::new();
        let beeps = bus.subscribe_to(EventKind::Beep);
        bus.emit(tick_event());
        bus.emit(beep_event());
        assert_eq!(beeps.try_recv().unwrap().kind(), EventKind::Beep);
        assert!(beeps.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_is_pruned_on_emit() {
        let bus = EventBus::new();
        let keep = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);
        bus.emit(tick_event());
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.try_recv().unwrap().kind(), EventKind::Tick);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&beep_event()).unwrap();
        assert!(json.contains(r#""type":"beep""#));
    }
}
