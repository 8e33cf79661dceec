//! Tick scheduling primitive.
//!
//! The engine does not own a time source. It is handed a [`Clock`] and asks it
//! for a repeating one-second callback when started; pausing cancels the
//! registration through the returned [`TickGuard`].
//!
//! Cancellation stops future callbacks but cannot recall one already in
//! flight on another thread. The engine therefore tags every registration
//! with a generation counter and ignores callbacks from stale registrations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A repeating one-second callback source.
pub trait Clock: Send + Sync {
    /// Register `tick` to fire once per second until the guard is cancelled
    /// or dropped.
    fn every_second(&self, tick: Box<dyn FnMut() + Send>) -> Box<dyn TickGuard>;
}

/// Handle to a live tick registration. Dropping the guard cancels it.
pub trait TickGuard: Send {
    fn cancel(self: Box<Self>);
}

struct CancelFlag(Arc<AtomicBool>);

impl TickGuard for CancelFlag {
    fn cancel(self: Box<Self>) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl Drop for CancelFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Wall-clock ticker backed by a thread sleeping one second per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn every_second(&self, mut tick: Box<dyn FnMut() + Send>) -> Box<dyn TickGuard> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        thread::spawn(move || loop {
            thread::sleep(Duration::from_secs(1));
            if flag.load(Ordering::SeqCst) {
                break;
            }
            tick();
        });
        Box::new(CancelFlag(cancelled))
    }
}

struct Slot {
    tick: Box<dyn FnMut() + Send>,
    cancelled: Arc<AtomicBool>,
}

/// Deterministic clock for tests: ticks fire only when [`ManualClock::advance`]
/// is called.
#[derive(Clone, Default)]
pub struct ManualClock {
    slots: Arc<Mutex<Vec<Slot>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate one second passing: fire every live registration once.
    pub fn advance(&self) {
        // Take the slots out so callbacks can register new schedules without
        // re-entering the lock.
        let mut active: Vec<Slot> = {
            let mut slots = self.slots.lock().unwrap();
            slots.drain(..).collect()
        };
        for slot in &mut active {
            if !slot.cancelled.load(Ordering::SeqCst) {
                (slot.tick)();
            }
        }
        let mut slots = self.slots.lock().unwrap();
        let added: Vec<Slot> = slots.drain(..).collect();
        slots.extend(
            active
                .into_iter()
                .filter(|s| !s.cancelled.load(Ordering::SeqCst))
                .chain(added),
        );
    }

    /// Simulate `n` seconds passing.
    pub fn advance_by(&self, n: u64) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Number of registrations that have not been cancelled.
    pub fn active_registrations(&self) -> usize {
        self.slots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| !s.cancelled.load(Ordering::SeqCst))
            .count()
    }
}

impl Clock for ManualClock {
    fn every_second(&self, tick: Box<dyn FnMut() + Send>) -> Box<dyn TickGuard> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.slots.lock().unwrap().push(Slot {
            tick,
            cancelled: Arc::clone(&cancelled),
        });
        Box::new(CancelFlag(cancelled))
    }
}
