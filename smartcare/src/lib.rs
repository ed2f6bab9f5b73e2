//! # smartcare
//!
//! Questionnaire sessions for smart space clients. Backend-agnostic.
//!
//! A questionnaire is fetched from a smart space node, every question is
//! turned into a [`Widget`], the user fills the widgets in through a
//! presentation backend, and the result is collected as a [`Feedback`] that
//! can be saved as JSON or published back to the node.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use smartcare::{Config, FeedbackHeader, FileStorage, Session};
//!
//! let config = Config::load_from(&Config::default_path()?)?;
//! let storage = FileStorage::new(config.storage.data_dir());
//!
//! let Some(questionnaire) =
//!     smartcare::load_questionnaire(&storage, &config.storage.questionnaire_file)
//! else {
//!     return Ok(());
//! };
//! let mut session = match smartcare::load_feedback(&storage, &config.storage.feedback_file) {
//!     Some(feedback) => Session::resume(questionnaire, feedback),
//!     None => Session::start(questionnaire, config.feedback.clone()),
//! };
//!
//! session.run(&backend)?;
//! smartcare::save_feedback(&storage, &config.storage.feedback_file, session.feedback())?;
//! ```
//!
//! ## Answer types
//!
//! | Type | Widget | Captured as |
//! |------|--------|-------------|
//! | `Text` | text field | one item holding the typed text |
//! | `BipolarQuestion`, `ContinuousScale` | slider | one item holding the value |
//! | `SingleChoise`, `Dichotomous`, `GuttmanScale`, `LikertScale` | single choice | the selected item |
//! | `MultipleChoise` | multiple choice | every selected item |
//! | anything else | single choice | not captured |
//!
//! ## Backends
//!
//! Backends are separate crates that implement `QuestionnaireBackend`:
//! - `smartcare-dialoguer` - CLI prompts via dialoguer

// Re-export all types from smartcare-types
pub use smartcare_types::*;

pub mod reconcile;
pub use reconcile::{CaptureOutcome, SkipReason};

mod config;
pub use config::{Config, NodeConfig, StorageConfig};

mod session;
pub use session::{FeedbackHeader, Session, fetch_questionnaire};

mod persistence;
pub use persistence::{
    FileStorage, MemoryStorage, MissingFile, PersistenceError, from_json, load_feedback,
    load_questionnaire, save_feedback, save_questionnaire, to_json,
};

mod preferences;
pub use preferences::{MemoryPreferences, Profile, ProfileField, TomlPreferences};

// In-memory node and scripted answers for running sessions without a network or a user
mod test_node;
pub use test_node::{Scripted, ScriptedBackend, StaticHandle, StaticNode, StaticNodeError};
