//! Project save/load
//!
//! Projects are opaque blobs keyed by a project key. The editor only saves on
//! an explicit user action.

use std::collections::HashMap;
use std::path::PathBuf;

use shared::{SceneDescription, SceneObject};

use super::SceneStore;
use crate::error::PersistenceError;

/// Key/value storage for project scenes
pub trait ProjectStore {
    fn save(&mut self, key: &str, objects: &[SceneObject]) -> Result<(), PersistenceError>;

    /// `Ok(None)` when nothing was ever saved under `key`
    fn load(&self, key: &str) -> Result<Option<Vec<SceneObject>>, PersistenceError>;
}

/// Keys become file names, so only a safe subset is allowed
pub fn validate_key(key: &str) -> Result<(), PersistenceError> {
    let ok = !key.is_empty()
        && key.len() <= 128
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey(key.to_string()))
    }
}

/// JSON files, one per project, in a directory
pub struct FileProjectStore {
    root: PathBuf,
}

impl FileProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store under the platform data directory
    pub fn in_data_dir() -> Result<Self, PersistenceError> {
        directories::ProjectDirs::from("com", "blockstudio", "block-studio")
            .map(|dirs| Self::new(dirs.data_dir().join("projects")))
            .ok_or(PersistenceError::NoDataDir)
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl ProjectStore for FileProjectStore {
    fn save(&mut self, key: &str, objects: &[SceneObject]) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root)?;
        let scene = SceneDescription::new(objects.to_vec());
        let json = serde_json::to_string_pretty(&scene)?;
        std::fs::write(&path, json)?;
        tracing::info!("Saved project '{}' to {}", key, path.display());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Vec<SceneObject>>, PersistenceError> {
        let path = self.path_for(key)?;
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let scene: SceneDescription = serde_json::from_str(&json)?;
        Ok(Some(scene.objects))
    }
}

/// In-memory store, used by the harness and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryProjectStore {
    projects: HashMap<String, Vec<SceneObject>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl ProjectStore for MemoryProjectStore {
    fn save(&mut self, key: &str, objects: &[SceneObject]) -> Result<(), PersistenceError> {
        validate_key(key)?;
        self.projects.insert(key.to_string(), objects.to_vec());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Vec<SceneObject>>, PersistenceError> {
        validate_key(key)?;
        Ok(self.projects.get(key).cloned())
    }
}

impl SceneStore {
    /// Write the live collection under `key`
    pub fn save_to(&mut self, store: &mut dyn ProjectStore, key: &str) -> Result<(), PersistenceError> {
        self.end_gesture();
        store.save(key, &self.scene.objects)
    }

    /// Replace the collection with the one saved under `key`.
    /// Returns `false` (and leaves the scene alone) if there is none.
    pub fn load_from(&mut self, store: &dyn ProjectStore, key: &str) -> Result<bool, PersistenceError> {
        match store.load(key)? {
            Some(objects) => {
                self.set_scene(SceneDescription::new(objects));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
