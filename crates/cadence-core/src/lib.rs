//! # Cadence Core Library
//!
//! Core logic for Cadence, a step-sequence countdown timer: pick a named
//! sequence of named, timed steps (brew pours, workout sets, tea steeps) and
//! the timer counts each step down in order, announcing transitions and
//! optionally looping the whole sequence. All operations are available
//! through the standalone CLI binary; any GUI would be a thin layer over
//! this same library.
//!
//! ## Architecture
//!
//! - **Timer engine**: a tick-based state machine. The engine registers a
//!   repeating one-second callback with an injected [`Clock`] while running
//!   and publishes typed events on its bus; it performs no I/O and produces
//!   no sound itself.
//! - **Events**: every observable mutation is published as a [`TimerEvent`]
//!   carrying a read-only [`Snapshot`]; subscribers each get their own
//!   channel.
//! - **Storage**: JSON-based user preset repository and TOML configuration.
//! - **Themes**: catalog of ready-made presets, loaded from JSON with a
//!   built-in fallback.
//!
//! ## Key Components
//!
//! - [`SequenceTimer`]: the countdown state machine
//! - [`FilePresetStore`]: user preset persistence
//! - [`ThemeCatalog`]: bundled and user-provided preset collections
//! - [`Config`]: application configuration
//! - [`Tone`] / [`Announcer`]: audio capability seams for presentation layers

pub mod audio;
pub mod error;
pub mod events;
pub mod phrase;
pub mod storage;
pub mod theme;
pub mod timer;

pub use audio::{Announcer, Tone};
pub use error::{ConfigError, CoreError, StoreError, ThemeError};
pub use events::{EventBus, EventKind, TimerEvent};
pub use storage::{data_dir, Config, FilePresetStore, PresetRepository};
pub use theme::{Preset, Theme, ThemeCatalog};
pub use timer::{
    Clock, ManualClock, Sequence, SequenceTimer, Snapshot, Step, SystemClock, TickGuard,
};
