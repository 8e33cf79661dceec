//! Theme catalog inspection.

use clap::Subcommand;

use cadence_core::phrase::format_clock;
use cadence_core::{data_dir, ThemeCatalog, ThemeError};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// List catalog themes
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show a theme's presets
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let dir = data_dir()?;
    let catalog = ThemeCatalog::load_or_builtin(&dir.join("themes.json"));
    match action {
        ThemeAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                for theme in &catalog.themes {
                    let marker = if theme.id == catalog.default_theme_id {
                        "*"
                    } else {
                        " "
                    };
                    println!("{marker} {}  {}", theme.id, theme.name);
                    if !theme.description.is_empty() {
                        println!("    {}", theme.description);
                    }
                }
            }
        }
        ThemeAction::Show { id, json } => {
            let theme = catalog
                .theme(&id)
                .ok_or_else(|| ThemeError::UnknownTheme(id.clone()))?;
            let presets = theme.load_presets(&dir)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&presets)?);
            } else {
                println!("{}  {}", theme.id, theme.name);
                if !theme.usage.is_empty() {
                    println!("{}", theme.usage);
                }
                for preset in &presets {
                    println!(
                        "  {}  ({} steps, {})",
                        preset.name,
                        preset.steps.len(),
                        format_clock(preset.total_seconds())
                    );
                }
            }
        }
    }
    Ok(())
}
