//! Theme catalog: named collections of ready-made presets.
//!
//! A catalog is a JSON file (`themes.json` in the data directory) listing
//! themes; each theme carries its presets inline or points at a separate
//! preset file. Catalog data is authored by hand, so loading normalizes
//! defensively instead of failing: themes get generated ids when blank,
//! nameless presets and steps are dropped, presets with no surviving steps
//! are dropped, and an unknown default theme id falls back to the first
//! theme. A missing or unreadable catalog falls back to the built-in theme.

mod builtin;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::timer::{Sequence, Step};

/// A named, ready-made sequence shipped by a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Preset {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    pub fn sequence(&self) -> Sequence {
        Sequence::new(self.steps.clone())
    }

    pub fn total_seconds(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.seconds))
    }
}

/// One theme: metadata plus presets, inline or in a side file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub usage: String,
    /// Preset file relative to the catalog's directory, used when no inline
    /// presets are present.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub presets: Vec<Preset>,
}

/// Shapes a theme preset file may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum PresetFile {
    List(Vec<Preset>),
    Wrapped { presets: Vec<Preset> },
}

impl Theme {
    /// Resolve this theme's presets: inline ones win, otherwise the side
    /// file is read relative to `base_dir`. A theme with neither yields an
    /// empty list.
    pub fn load_presets(&self, base_dir: &Path) -> Result<Vec<Preset>, ThemeError> {
        if !self.presets.is_empty() {
            return Ok(self.presets.clone());
        }
        let Some(file) = self.file.as_deref().map(str::trim).filter(|f| !f.is_empty()) else {
            return Ok(Vec::new());
        };
        let path = base_dir.join(file);
        let content = std::fs::read_to_string(&path).map_err(|source| ThemeError::ReadFailed {
            path: path.clone(),
            source,
        })?;
        let parsed: PresetFile =
            serde_json::from_str(&content).map_err(|source| ThemeError::ParseFailed {
                path: path.clone(),
                source,
            })?;
        let presets = match parsed {
            PresetFile::List(presets) | PresetFile::Wrapped { presets } => presets,
        };
        Ok(normalize_presets(presets))
    }

    /// Find a preset by exact name.
    pub fn preset(&self, base_dir: &Path, name: &str) -> Result<Preset, ThemeError> {
        self.load_presets(base_dir)?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ThemeError::UnknownPreset {
                theme: self.id.clone(),
                preset: name.to_string(),
            })
    }
}

/// The full theme catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeCatalog {
    #[serde(default)]
    pub default_theme_id: String,
    #[serde(default)]
    pub themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// The catalog bundled with the application.
    pub fn builtin() -> Self {
        let theme = builtin::default_theme();
        Self {
            default_theme_id: theme.id.clone(),
            themes: vec![theme],
        }
    }

    /// Load and normalize a catalog file.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let mut catalog: ThemeCatalog =
            serde_json::from_str(&content).map_err(|source| ThemeError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;
        catalog.normalize();
        Ok(catalog)
    }

    /// Load a catalog file, falling back to the built-in catalog when the
    /// file is missing, unreadable, or lists no themes.
    pub fn load_or_builtin(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) if !catalog.themes.is_empty() => catalog,
            _ => Self::builtin(),
        }
    }

    pub fn theme(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    /// The configured default theme, or the first theme as a fallback.
    pub fn default_theme(&self) -> Option<&Theme> {
        self.theme(&self.default_theme_id).or_else(|| self.themes.first())
    }

    fn normalize(&mut self) {
        for (idx, theme) in self.themes.iter_mut().enumerate() {
            theme.id = theme.id.trim().to_string();
            if theme.id.is_empty() {
                theme.id = format!("theme_{}", idx + 1);
            }
            theme.name = theme.name.trim().to_string();
            if theme.name.is_empty() {
                theme.name = theme.id.clone();
            }
            theme.presets = normalize_presets(std::mem::take(&mut theme.presets));
        }
        let default_exists = self.themes.iter().any(|t| t.id == self.default_theme_id);
        if !default_exists {
            self.default_theme_id = self
                .themes
                .first()
                .map(|t| t.id.clone())
                .unwrap_or_default();
        }
    }
}

/// Drop nameless presets and steps; drop presets left with no steps.
fn normalize_presets(presets: Vec<Preset>) -> Vec<Preset> {
    presets
        .into_iter()
        .filter_map(|p| {
            let name = p.name.trim().to_string();
            if name.is_empty() {
                return None;
            }
            let steps: Vec<Step> = p
                .steps
                .into_iter()
                .filter_map(|s| {
                    let step_name = s.name.trim().to_string();
                    if step_name.is_empty() {
                        None
                    } else {
                        Some(Step::new(step_name, s.seconds))
                    }
                })
                .collect();
            if steps.is_empty() {
                return None;
            }
            Some(Preset { name, steps })
        })
        .collect()
}
