//! Account settings kept between runs.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use crate::PreferenceStore;

/// One field of the user's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    SecondName,
    PhoneNumber,
    Height,
    Weight,
    Age,
}

impl ProfileField {
    pub const ALL: [ProfileField; 6] = [
        ProfileField::FirstName,
        ProfileField::SecondName,
        ProfileField::PhoneNumber,
        ProfileField::Height,
        ProfileField::Weight,
        ProfileField::Age,
    ];

    /// The preference key the field is stored under.
    pub fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstname",
            Self::SecondName => "secondname",
            Self::PhoneNumber => "phonenumber",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Age => "age",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::SecondName => "Second name",
            Self::PhoneNumber => "Phone number",
            Self::Height => "Height",
            Self::Weight => "Weight",
            Self::Age => "Age",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The user's account settings. Values are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub first_name: String,
    pub second_name: String,
    pub phone_number: String,
    pub height: String,
    pub weight: String,
    pub age: String,
}

impl Profile {
    /// Read every field; absent keys become empty strings.
    pub fn load<P: PreferenceStore>(store: &P) -> Self {
        let mut profile = Self::default();
        for field in ProfileField::ALL {
            *profile.field_mut(field) = store.get(field.key()).unwrap_or_default();
        }
        profile
    }

    /// Write every field and flush the store.
    pub fn save<P: PreferenceStore>(&self, store: &mut P) -> Result<(), P::Error> {
        for field in ProfileField::ALL {
            store.set(field.key(), self.field(field));
        }
        store.flush()
    }

    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::SecondName => &self.second_name,
            ProfileField::PhoneNumber => &self.phone_number,
            ProfileField::Height => &self.height,
            ProfileField::Weight => &self.weight,
            ProfileField::Age => &self.age,
        }
    }

    pub fn field_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::SecondName => &mut self.second_name,
            ProfileField::PhoneNumber => &mut self.phone_number,
            ProfileField::Height => &mut self.height,
            ProfileField::Weight => &mut self.weight,
            ProfileField::Age => &mut self.age,
        }
    }
}

/// Preferences stored as a flat TOML table of strings.
#[derive(Debug, Clone)]
pub struct TomlPreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl TomlPreferences {
    /// Open the file at `path`. A missing or malformed file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "ignoring malformed preferences");
                BTreeMap::new()
            }),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no preferences yet");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for TomlPreferences {
    type Error = anyhow::Error;

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content =
            toml::to_string(&self.values).context("Failed to serialize preferences to TOML")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))?;
        debug!(path = %self.path.display(), "preferences flushed");
        Ok(())
    }
}

/// Preferences that live only as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    type Error = std::convert::Infallible;

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
