//! Terminal implementations of the core's audio capability seams.

use std::io::Write;

use cadence_core::{Announcer, Tone};

/// Tone output through the terminal bell. A terminal has no pitch or
/// duration control, so the parameters are accepted and ignored.
pub struct TerminalTone {
    enabled: bool,
}

impl TerminalTone {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Tone for TerminalTone {
    fn play(&self, _duration_ms: u64, _frequency_hz: u32) {
        if !self.enabled {
            return;
        }
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

/// Speech as printed lines. `speak` returns once the line is flushed, which
/// is the terminal's version of an utterance finishing.
pub struct TerminalAnnouncer {
    enabled: bool,
}

impl TerminalAnnouncer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Announcer for TerminalAnnouncer {
    fn speak(&self, text: &str) {
        if !self.enabled {
            return;
        }
        println!(">> {text}");
    }
}
