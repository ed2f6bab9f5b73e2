use crate::{Feedback, Interaction, Questionnaire, SmartCareError, Widget};

/// A smart space information-sharing node that serves questionnaires.
///
/// Calls are synchronous and treated as atomic: they either succeed or fail
/// without leaving partial state behind.
pub trait SmartSpace {
    /// Descriptor of a joined node.
    type Handle;

    /// The error type for this node.
    type Error: Into<anyhow::Error>;

    /// Join the smart space `name` at `address:port`.
    fn connect(&self, name: &str, address: &str, port: u16) -> Result<Self::Handle, Self::Error>;

    /// Leave the smart space.
    fn disconnect(&self, handle: Self::Handle) -> Result<(), Self::Error>;

    /// Read the questionnaire published in the smart space, if there is one.
    fn fetch_questionnaire(&self, handle: &Self::Handle)
    -> Result<Option<Questionnaire>, Self::Error>;

    /// Publish a completed feedback to the smart space.
    fn publish_feedback(&self, handle: &Self::Handle, feedback: &Feedback)
    -> Result<(), Self::Error>;
}

/// Flat text persistence keyed by file name.
pub trait Storage {
    /// The error type for this storage.
    type Error: Into<anyhow::Error>;

    /// Replace the content stored under `name`.
    fn write_text(&self, name: &str, content: &str) -> Result<(), Self::Error>;

    /// Read the content stored under `name`.
    fn read_text(&self, name: &str) -> Result<String, Self::Error>;
}

/// String key/value preferences, such as the user's profile fields.
pub trait PreferenceStore {
    /// The error type for this store.
    type Error: Into<anyhow::Error>;

    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`. Takes effect on the next [`PreferenceStore::flush`].
    fn set(&mut self, key: &str, value: &str);

    /// Persist pending changes.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Trait for presentation backends that let a user fill in a questionnaire.
///
/// The backend only renders widgets and reports what the user did; restoring
/// prior answers and capturing new ones is done by the core around each call.
pub trait QuestionnaireBackend {
    /// The error type for this backend.
    type Error: Into<SmartCareError>;

    /// Called once before the first widget is presented.
    fn begin(&self, _questionnaire: &Questionnaire) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Present one widget and let the user change its state in place.
    ///
    /// # Returns
    /// * `Ok(Interaction::Committed)` if the new state should be captured
    /// * `Ok(Interaction::Unchanged)` if the user skipped the question
    /// * `Err` on cancellation or backend failure
    fn present(&self, widget: &mut Widget) -> Result<Interaction, Self::Error>;

    /// Called once after the last widget, with the resulting feedback.
    fn finish(&self, _feedback: &Feedback) -> Result<(), Self::Error> {
        Ok(())
    }
}
