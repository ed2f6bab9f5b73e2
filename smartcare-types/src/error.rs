/// Error type for questionnaire sessions.
#[derive(Debug, thiserror::Error)]
pub enum SmartCareError {
    /// User cancelled the questionnaire (Ctrl+C, closed window, etc.)
    #[error("Questionnaire cancelled by user")]
    Cancelled,

    /// The smart space node could not be joined.
    #[error("Cannot join smart space at {address}:{port}")]
    NodeUnavailable {
        address: String,
        port: u16,
        #[source]
        source: anyhow::Error,
    },

    /// The node was joined but holds no questionnaire.
    #[error("Smart space holds no questionnaire")]
    NoQuestionnaire,

    /// Capture failed for a widget.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// Backend-specific failure (I/O, UI framework crash, node protocol, etc.)
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl SmartCareError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Error type for capturing widget state into feedback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    /// The widget refers to a question that is not part of the questionnaire.
    #[error("No question with uri '{0}' in the questionnaire")]
    UnknownQuestion(String),
}
