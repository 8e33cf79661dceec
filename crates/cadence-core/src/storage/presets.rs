//! User-defined preset storage.
//!
//! Presets the user builds (as opposed to the ones a theme ships) live in a
//! single JSON file in the data directory, a map of preset name to step
//! list. The repository trait is what the presentation layer is handed; the
//! engine never touches preset storage.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::data_dir;
use crate::error::StoreError;
use crate::timer::Sequence;

/// Preset store file name.
const PRESETS_FILE: &str = "presets.json";

/// Named-sequence repository.
pub trait PresetRepository {
    fn get(&self, name: &str) -> Option<Sequence>;
    fn list(&self) -> Vec<String>;
    fn save(&mut self, name: &str, sequence: Sequence) -> Result<(), StoreError>;
    fn delete(&mut self, name: &str) -> Result<(), StoreError>;
}

/// JSON-file-backed preset repository.
///
/// The whole store is held in memory and rewritten on every mutation; preset
/// files are tiny. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FilePresetStore {
    path: PathBuf,
    presets: BTreeMap<String, Sequence>,
}

impl FilePresetStore {
    /// Open the store in the data directory.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|source| StoreError::ReadFailed {
            path: PathBuf::from(PRESETS_FILE),
            source,
        })?;
        Self::open_at(dir.join(PRESETS_FILE))
    }

    /// Open a store at an explicit path.
    pub fn open_at(path: PathBuf) -> Result<Self, StoreError> {
        let presets = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                StoreError::ParseFailed {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StoreError::ReadFailed {
                    path: path.clone(),
                    source,
                })
            }
        };
        Ok(Self { path, presets })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.presets)?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}

impl PresetRepository for FilePresetStore {
    fn get(&self, name: &str) -> Option<Sequence> {
        self.presets.get(name).cloned()
    }

    fn list(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }

    fn save(&mut self, name: &str, sequence: Sequence) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if sequence.is_empty() {
            return Err(StoreError::EmptySequence(name.to_string()));
        }
        self.presets.insert(name.to_string(), sequence);
        self.persist()
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        if self.presets.remove(name).is_none() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Step;

    fn store_in(dir: &tempfile::TempDir) -> FilePresetStore {
        FilePresetStore::open_at(dir.path().join(PRESETS_FILE)).unwrap()
    }

    fn brew() -> Sequence {
        Sequence::new(vec![Step::new("Bloom", 30), Step::new("Pour", 60)])
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list().is_empty());
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn save_then_reopen_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.save("morning brew", brew()).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.list(), vec!["morning brew".to_string()]);
        assert_eq!(reopened.get("morning brew").unwrap(), brew());
    }

    #[test]
    fn save_rejects_degenerate_presets() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        assert!(matches!(
            store.save("  ", brew()),
            Err(StoreError::EmptyName)
        ));
        assert!(matches!(
            store.save("empty", Sequence::default()),
            Err(StoreError::EmptySequence(_))
        ));
    }

    #[test]
    fn delete_removes_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.save("brew", brew()).unwrap();
        store.delete("brew").unwrap();
        assert!(store.list().is_empty());
        assert!(matches!(
            store.delete("brew"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn corrupt_file_surfaces_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PRESETS_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FilePresetStore::open_at(path),
            Err(StoreError::ParseFailed { .. })
        ));
    }

    #[test]
    fn listing_is_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.save("zeta", brew()).unwrap();
        store.save("alpha", brew()).unwrap();
        assert_eq!(store.list(), vec!["alpha".to_string(), "zeta".to_string()]);
    }
}
