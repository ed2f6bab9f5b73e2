//! JSON persistence of questionnaires and feedback.
//!
//! Writes report every failure. Reads never fail: a missing, unreadable or
//! malformed file is logged and treated as "nothing saved".

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::{Feedback, Questionnaire, Storage};

/// Error type for saving.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Pretty-printed JSON with the wire field names.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn save_questionnaire<S: Storage>(
    storage: &S,
    name: &str,
    questionnaire: &Questionnaire,
) -> Result<(), PersistenceError> {
    save(storage, name, questionnaire)?;
    info!(file = name, questions = questionnaire.len(), "questionnaire saved");
    Ok(())
}

pub fn save_feedback<S: Storage>(
    storage: &S,
    name: &str,
    feedback: &Feedback,
) -> Result<(), PersistenceError> {
    save(storage, name, feedback)?;
    info!(file = name, responses = feedback.len(), "feedback saved");
    Ok(())
}

pub fn load_questionnaire<S: Storage>(storage: &S, name: &str) -> Option<Questionnaire> {
    load(storage, name)
}

pub fn load_feedback<S: Storage>(storage: &S, name: &str) -> Option<Feedback> {
    load(storage, name)
}

fn save<S: Storage, T: Serialize>(storage: &S, name: &str, value: &T) -> Result<(), PersistenceError> {
    let json = to_json(value)?;
    storage
        .write_text(name, &json)
        .map_err(|err| PersistenceError::Storage(err.into()))
}

fn load<S: Storage, T: DeserializeOwned>(storage: &S, name: &str) -> Option<T> {
    let json = match storage.read_text(name) {
        Ok(json) => json,
        Err(err) => {
            let err: anyhow::Error = err.into();
            warn!(file = name, error = %err, "nothing loaded");
            return None;
        }
    };
    match from_json(&json) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(file = name, error = %err, "ignoring malformed file");
            None
        }
    }
}

/// Files in one directory. The directory is created on first write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl Storage for FileStorage {
    type Error = anyhow::Error;

    fn write_text(&self, name: &str, content: &str) -> Result<(), Self::Error> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;
        let path = self.path(name);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }

    fn read_text(&self, name: &str) -> Result<String, Self::Error> {
        let path = self.path(name);
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {}", path.display()))
    }
}

/// Storage kept in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content stored under `name`.
    pub fn get(&self, name: &str) -> Option<String> {
        self.files.borrow().get(name).cloned()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("No file named '{0}'")]
pub struct MissingFile(String);

impl Storage for MemoryStorage {
    type Error = MissingFile;

    fn write_text(&self, name: &str, content: &str) -> Result<(), Self::Error> {
        self.files
            .borrow_mut()
            .insert(name.to_string(), content.to_string());
        Ok(())
    }

    fn read_text(&self, name: &str) -> Result<String, Self::Error> {
        self.get(name).ok_or_else(|| MissingFile(name.to_string()))
    }
}
