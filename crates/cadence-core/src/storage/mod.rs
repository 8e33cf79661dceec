mod config;
mod presets;

pub use config::{AudioConfig, Config, TimerConfig};
pub use presets::{FilePresetStore, PresetRepository};

use std::path::PathBuf;

/// Returns `~/.config/cadence[-dev]/` based on CADENCE_ENV.
///
/// Set CADENCE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CADENCE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("cadence-dev")
    } else {
        base_dir.join("cadence")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
