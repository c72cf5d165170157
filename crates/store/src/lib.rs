//! Whole-document JSON persistence.
//!
//! Each named document is a single serialized structure in its own file,
//! rewritten in full on every save. Loading a missing or unreadable document
//! materializes its default on disk and returns it. There is no locking:
//! every request performs its own independent load/modify/save, so two
//! concurrent writers can race on the same document and the later save wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Store-level error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Document store rooted at a data directory; document `foo` lives in
/// `<root>/foo.json`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open a store, creating the data directory when absent.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the document already exists on disk.
    pub fn exists(&self, doc: &str) -> bool {
        self.path(doc).is_file()
    }

    /// Load a document, materializing the serialized default when the file
    /// is missing or holds invalid JSON.
    pub fn load<T>(&self, doc: &str) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        match fs::read_to_string(self.path(doc)) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(value),
                Err(err) => {
                    warn!("document '{doc}' is unreadable ({err}), resetting to default");
                    self.init_default(doc)
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => self.init_default(doc),
            Err(err) => Err(err.into()),
        }
    }

    /// Full rewrite of a document.
    pub fn save<T: Serialize>(&self, doc: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(self.path(doc), raw)?;
        Ok(())
    }

    fn init_default<T>(&self, doc: &str) -> Result<T, StoreError>
    where
        T: Serialize + Default,
    {
        let value = T::default();
        self.save(doc, &value)?;
        Ok(value)
    }

    fn path(&self, doc: &str) -> PathBuf {
        self.root.join(format!("{doc}.json"))
    }
}
