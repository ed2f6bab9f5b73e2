//! Core types for the smartcare crate.
//!
//! This crate provides the foundational types for questionnaires and their feedback:
//! - `Questionnaire`, `Question`, `Answer` and `AnswerItem` - The questionnaire definition
//! - `Feedback`, `Response` and `ResponseItem` - What the user replied
//! - `AnswerType` and `TypeTag` - Decoded answer types used for dispatch
//! - `Widget` - Presentation-agnostic controls built from answers
//! - `SmartSpace`, `Storage`, `PreferenceStore` and `QuestionnaireBackend` traits

mod answer_type;
pub use answer_type::{AnswerType, TypeTag, type_fragment};

mod answer;
pub use answer::{Answer, AnswerItem, extract_number};

mod question;
pub use question::Question;

mod questionnaire;
pub use questionnaire::{OutlineEntry, Questionnaire};

mod feedback;
pub use feedback::{Feedback, Response, ResponseItem};

mod widget;
pub use widget::{ChoiceOption, Interaction, Widget, WidgetBody};

mod error;
pub use error::{ReconcileError, SmartCareError};

mod traits;
pub use traits::{PreferenceStore, QuestionnaireBackend, SmartSpace, Storage};
