//! Run a sequence in the terminal.
//!
//! The engine only emits events; everything audible or visible happens here:
//! the live countdown line, bell beeps, printed "speech", the 3-2-1 start
//! ceremony and the pause-announce-resume dance around step changes.

use std::error::Error;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;

use cadence_core::phrase::{format_clock, spoken_duration};
use cadence_core::{
    data_dir, Announcer, Config, FilePresetStore, PresetRepository, Sequence, SequenceTimer,
    Snapshot, SystemClock, ThemeCatalog, ThemeError, TimerEvent, Tone,
};

use crate::audio::{TerminalAnnouncer, TerminalTone};

#[derive(Args)]
pub struct RunArgs {
    /// Preset name to run
    pub preset: String,
    /// Resolve the preset in the user store instead of the theme catalog
    #[arg(long)]
    pub custom: bool,
    /// Theme id to resolve the preset in (defaults to the configured theme)
    #[arg(long)]
    pub theme: Option<String>,
    /// Number of full passes over the sequence
    #[arg(long)]
    pub loops: Option<u32>,
    /// Repeat indefinitely until interrupted
    #[arg(long)]
    pub auto_repeat: bool,
    /// Disable spoken announcements (also skips the start countdown)
    #[arg(long)]
    pub no_voice: bool,
    /// Disable the boundary beep
    #[arg(long)]
    pub no_beep: bool,
    /// Play a short tick every second
    #[arg(long)]
    pub tick_sound: bool,
    /// Print raw events as JSON lines instead of the live display
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let config = Config::load_or_default();
    let (name, sequence) = resolve_sequence(&args, &config)?;
    if sequence.is_empty() {
        return Err(format!("preset '{name}' has no steps").into());
    }

    let loops = args.loops.unwrap_or(config.timer.loops);
    let auto_repeat = args.auto_repeat || config.timer.auto_repeat;
    let beep = !args.no_beep && config.audio.beep_enabled && !args.json;
    let tick_sound = (args.tick_sound || config.audio.tick_enabled) && !args.json;
    let voice = !args.no_voice && config.audio.voice_enabled && !args.json;

    let timer = SequenceTimer::new(Arc::new(SystemClock));
    let events = timer.subscribe();
    timer.load(sequence.clone());
    timer.set_loop_count(loops as i64);
    timer.set_auto_repeat(auto_repeat);

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        let handle = timer.clone();
        ctrlc::set_handler(move || {
            handle.pause();
            interrupted.store(true, Ordering::SeqCst);
        })?;
    }

    let mut session = RunSession {
        json: args.json,
        name,
        auto_repeat,
        timer: timer.clone(),
        tone: TerminalTone::new(beep),
        announcer: TerminalAnnouncer::new(voice),
        tick_sound,
        voice,
        previous_step: None,
    };

    if !args.json {
        session.print_step_list(&sequence);
    }
    session.start_ceremony(&sequence);
    timer.start();

    loop {
        match events.recv_timeout(Duration::from_millis(200)) {
            Ok(event) => {
                if session.handle(event)? {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if interrupted.load(Ordering::SeqCst) {
                    if !args.json {
                        println!();
                        println!(
                            "paused at {}",
                            format_clock(timer.snapshot().remaining_seconds)
                        );
                    }
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok(())
}

fn resolve_sequence(args: &RunArgs, config: &Config) -> Result<(String, Sequence), Box<dyn Error>> {
    if args.custom {
        let store = FilePresetStore::open()?;
        let sequence = store
            .get(&args.preset)
            .ok_or_else(|| format!("user preset '{}' not found", args.preset))?;
        return Ok((args.preset.clone(), sequence));
    }

    let dir = data_dir()?;
    let catalog = ThemeCatalog::load_or_builtin(&dir.join("themes.json"));
    let theme = match &args.theme {
        // An explicitly requested theme must exist; the configured default
        // may fall back to the catalog's own default.
        Some(id) => catalog
            .theme(id)
            .ok_or_else(|| ThemeError::UnknownTheme(id.clone()))?,
        None => catalog
            .theme(&config.default_theme)
            .or_else(|| catalog.default_theme())
            .ok_or("theme catalog is empty")?,
    };
    let preset = theme.preset(&dir, &args.preset)?;
    Ok((preset.name.clone(), preset.sequence()))
}

struct RunSession {
    json: bool,
    name: String,
    auto_repeat: bool,
    timer: SequenceTimer,
    tone: TerminalTone,
    announcer: TerminalAnnouncer,
    tick_sound: bool,
    voice: bool,
    /// Step that was current before the latest step change, for the
    /// "«previous» finished" phrase.
    previous_step: Option<String>,
}

impl RunSession {
    fn print_step_list(&self, sequence: &Sequence) {
        println!(
            "{}  ({} total)",
            self.name,
            format_clock(sequence.total_seconds())
        );
        for (idx, step) in sequence.steps().iter().enumerate() {
            println!(
                "  {}. {}  {}",
                idx + 1,
                step.name,
                format_clock(step.seconds)
            );
        }
        println!();
    }

    /// Announce the run, count down from three, introduce the first step.
    fn start_ceremony(&self, sequence: &Sequence) {
        if !self.voice {
            return;
        }
        self.announcer.speak(&format!("{} starting", self.name));
        for n in (1..=3u32).rev() {
            self.announcer.speak(&n.to_string());
            self.tone.tick();
            std::thread::sleep(Duration::from_secs(1));
        }
        if let Some(first) = sequence.first() {
            self.announcer
                .speak(&format!("{}, {}", first.name, spoken_duration(first.seconds)));
        }
    }

    /// Returns true when the run is over.
    fn handle(&mut self, event: TimerEvent) -> Result<bool, Box<dyn Error>> {
        if self.json {
            println!("{}", serde_json::to_string(&event)?);
            return Ok(matches!(event, TimerEvent::Completed { .. }));
        }

        match event {
            TimerEvent::Tick { snapshot, .. } => self.render_line(&snapshot),
            TimerEvent::TickSound { .. } => {
                if self.tick_sound {
                    self.tone.tick();
                }
            }
            TimerEvent::RemainingAnnounced { seconds, .. } => {
                if self.voice {
                    println!();
                    self.announcer
                        .speak(&format!("{} left", spoken_duration(seconds)));
                }
            }
            TimerEvent::Beep { .. } => self.tone.beep(),
            TimerEvent::StepChanged { snapshot, .. } => {
                self.previous_step = previous_of(&snapshot);
                println!();
                self.render_line(&snapshot);
            }
            TimerEvent::SpeechRequested { text, .. } => {
                self.announce_step_change(&text);
            }
            TimerEvent::Completed { .. } => {
                println!();
                // Completion fanfare: two tones, then the sequence name.
                self.tone.play(220, 1200);
                self.tone.play(220, 1000);
                self.announcer.speak(&format!("{} finished", self.name));
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Hold the timer while the step-change cue plays and resume only if it
    /// was running when the cue began, so a pause that landed during the
    /// announcement sticks.
    fn announce_step_change(&mut self, step_name: &str) {
        if !self.voice {
            return;
        }
        let was_running = self.timer.is_running();
        self.timer.pause();
        let snapshot = self.timer.snapshot();
        let duration = snapshot
            .current_step
            .as_ref()
            .map(|s| spoken_duration(s.seconds));
        let phrase = match (self.previous_step.take(), duration) {
            (Some(prev), Some(d)) => format!("{prev} finished. Next: {step_name}, {d}"),
            (None, Some(d)) => format!("Next: {step_name}, {d}"),
            _ => format!("Next: {step_name}"),
        };
        self.announcer.speak(&phrase);
        if was_running {
            self.timer.start();
        }
    }

    fn render_line(&self, snapshot: &Snapshot) {
        let step_name = snapshot
            .current_step
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("-");
        let pass = if self.auto_repeat {
            format!("  pass {}", snapshot.current_loop)
        } else if snapshot.total_loops > 1 {
            format!("  pass {}/{}", snapshot.current_loop, snapshot.total_loops)
        } else {
            String::new()
        };
        print!(
            "\r[{}/{}] {}  {}{}   ",
            snapshot.current_index + 1,
            snapshot.steps.len(),
            step_name,
            format_clock(snapshot.remaining_seconds),
            pass
        );
        let _ = std::io::stdout().flush();
    }
}

/// Name of the step before the current one, wrapping at pass boundaries.
fn previous_of(snapshot: &Snapshot) -> Option<String> {
    if snapshot.steps.is_empty() {
        return None;
    }
    let idx = if snapshot.current_index == 0 {
        snapshot.steps.len() - 1
    } else {
        snapshot.current_index - 1
    };
    snapshot.steps.get(idx).map(|s| s.name.clone())
}
