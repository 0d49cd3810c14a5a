//! Persistent client-side state: the last received report metadata and display preferences.
//!
//! [`MetadataStore`] owns the typed contract (`load`/`save` for metadata, `load_preferences`/
//! `save_preferences` for the theme flag) and delegates raw string storage to any
//! [`KeyValueStore`] backend. [`MemoryStore`] is the in-process backend used in tests;
//! [`FileStore`] keeps one file per key in a directory.

use crate::model::{Preferences, ReportMetadata};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

pub const METADATA_KEY: &str = "report_metadata";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid store key {key:?}: keys are ASCII alphanumerics, `_`, `-` and `.`")]
    InvalidKey { key: String },

    #[error("store I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode value for `{key}`: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch == '.');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
        })
    }
}

/// String key-value persistence, the moral equivalent of a browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: IndexMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.shift_remove(key);
        Ok(())
    }
}

/// Directory-backed store. Each key maps to a file of the same name; writes go through a
/// temporary file and a rename so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!("{key}.tmp"));
        std::fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetadataStore<S> {
    backend: S,
}

impl<S: KeyValueStore> MetadataStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Returns the stored metadata, or `None` if nothing was stored or the stored value no longer
    /// decodes. Read and decode failures are logged, not returned.
    pub fn load(&self) -> Option<ReportMetadata> {
        let raw = match self.backend.get(METADATA_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stored report metadata");
                return None;
            }
        };
        match serde_json::from_str::<ReportMetadata>(&raw) {
            Ok(metadata) => Some(metadata),
            Err(err) => {
                tracing::warn!(error = %err, "stored report metadata is corrupt; treating as absent");
                None
            }
        }
    }

    pub fn save(&mut self, metadata: &ReportMetadata) -> Result<(), StoreError> {
        let raw = serde_json::to_string(metadata).map_err(|source| StoreError::Encode {
            key: METADATA_KEY,
            source,
        })?;
        tracing::debug!(
            pages = metadata.pages.len(),
            bytes = raw.len(),
            "saving report metadata"
        );
        self.backend.set(METADATA_KEY, &raw)
    }

    /// Forgets the stored metadata. Preferences are kept.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.remove(METADATA_KEY)
    }

    pub fn load_preferences(&self) -> Preferences {
        match self.backend.get(THEME_KEY) {
            Ok(Some(literal)) => Preferences::from_theme_literal(&literal),
            Ok(None) => Preferences::default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stored theme preference");
                Preferences::default()
            }
        }
    }

    pub fn save_preferences(&mut self, prefs: Preferences) -> Result<(), StoreError> {
        self.backend.set(THEME_KEY, prefs.theme_literal())
    }
}
