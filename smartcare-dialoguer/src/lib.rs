//! # smartcare-dialoguer
//!
//! Dialoguer backend for smartcare questionnaires.
//!
//! This crate presents questionnaire widgets as command-line prompts using the
//! `dialoguer` library. Questions are asked one after another in a classic CLI
//! wizard style; earlier answers are pre-selected.
//!
//! ## Example
//!
//! ```rust,ignore
//! use smartcare::{FeedbackHeader, Session, SmartCareError};
//! use smartcare_dialoguer::DialoguerBackend;
//!
//! fn main() -> Result<(), SmartCareError> {
//!     let mut session = Session::start(questionnaire, FeedbackHeader::default());
//!     session.run(&DialoguerBackend::new())?;
//!     println!("{} questions answered", session.feedback().len());
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{DialoguerBackend, DialoguerError};
