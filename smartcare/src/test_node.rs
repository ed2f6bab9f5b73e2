//! Stand-ins for the smart space and for a user.
//!
//! `StaticNode` serves a fixed questionnaire without any network, and
//! `ScriptedBackend` fills in widgets from pre-configured answers. Both are
//! useful for testing and for running a session without user interaction.
//!
//! # Example
//!
//! ```rust,ignore
//! use smartcare::{FeedbackHeader, NodeConfig, ScriptedBackend, Session, StaticNode};
//!
//! let node = StaticNode::new(questionnaire);
//! let questionnaire = smartcare::fetch_questionnaire(&node, &NodeConfig::default())?;
//!
//! let mut session = Session::start(questionnaire, FeedbackHeader::default());
//! session.run(
//!     &ScriptedBackend::new()
//!         .with_text("q-name", "Alice")
//!         .with_selection("q-smoke", vec![1]),
//! )?;
//! ```

use std::cell::{Cell, Ref, RefCell};
use std::collections::HashMap;

use crate::{
    Feedback, Interaction, Questionnaire, QuestionnaireBackend, SmartCareError, SmartSpace, Widget,
};

/// An in-memory smart space node.
#[derive(Debug, Default)]
pub struct StaticNode {
    questionnaire: Option<Questionnaire>,
    refuse: bool,
    joined: Cell<usize>,
    published: RefCell<Vec<Feedback>>,
}

/// Error type for StaticNode.
#[derive(Debug, thiserror::Error)]
pub enum StaticNodeError {
    #[error("Connection refused by '{name}' at {address}:{port}")]
    Refused {
        name: String,
        address: String,
        port: u16,
    },
}

/// Handle returned by [`StaticNode::connect`].
#[derive(Debug)]
pub struct StaticHandle {
    _private: (),
}

impl StaticNode {
    /// A node serving `questionnaire`.
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self {
            questionnaire: Some(questionnaire),
            ..Self::default()
        }
    }

    /// A node that accepts connections but holds no questionnaire.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Make every connection attempt fail.
    pub fn refusing(mut self) -> Self {
        self.refuse = true;
        self
    }

    /// Feedback published so far, oldest first.
    pub fn published(&self) -> Ref<'_, Vec<Feedback>> {
        self.published.borrow()
    }

    /// Number of open connections.
    pub fn joined(&self) -> usize {
        self.joined.get()
    }
}

impl SmartSpace for StaticNode {
    type Handle = StaticHandle;
    type Error = StaticNodeError;

    fn connect(&self, name: &str, address: &str, port: u16) -> Result<Self::Handle, Self::Error> {
        if self.refuse {
            return Err(StaticNodeError::Refused {
                name: name.to_string(),
                address: address.to_string(),
                port,
            });
        }
        self.joined.set(self.joined.get() + 1);
        Ok(StaticHandle { _private: () })
    }

    fn disconnect(&self, _handle: Self::Handle) -> Result<(), Self::Error> {
        self.joined.set(self.joined.get().saturating_sub(1));
        Ok(())
    }

    fn fetch_questionnaire(
        &self,
        _handle: &Self::Handle,
    ) -> Result<Option<Questionnaire>, Self::Error> {
        Ok(self.questionnaire.clone())
    }

    fn publish_feedback(&self, _handle: &Self::Handle, feedback: &Feedback) -> Result<(), Self::Error> {
        self.published.borrow_mut().push(feedback.clone());
        Ok(())
    }
}

/// A scripted answer for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted {
    Text(String),
    Value(i64),
    Selection(Vec<usize>),
    Cancel,
}

/// A backend that answers from a script keyed by question identifier.
///
/// Questions without a script entry are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    answers: HashMap<String, Scripted>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(mut self, question_uri: impl Into<String>, answer: Scripted) -> Self {
        self.answers.insert(question_uri.into(), answer);
        self
    }

    /// Type `text` into a text field.
    pub fn with_text(self, question_uri: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_answer(question_uri, Scripted::Text(text.into()))
    }

    /// Move a slider to `value`.
    pub fn with_value(self, question_uri: impl Into<String>, value: i64) -> Self {
        self.with_answer(question_uri, Scripted::Value(value))
    }

    /// Select exactly the options at `indices`.
    pub fn with_selection(self, question_uri: impl Into<String>, indices: Vec<usize>) -> Self {
        self.with_answer(question_uri, Scripted::Selection(indices))
    }

    /// Cancel the questionnaire when this question comes up.
    pub fn with_cancel(self, question_uri: impl Into<String>) -> Self {
        self.with_answer(question_uri, Scripted::Cancel)
    }
}

impl QuestionnaireBackend for ScriptedBackend {
    type Error = SmartCareError;

    fn present(&self, widget: &mut Widget) -> Result<Interaction, Self::Error> {
        let Some(answer) = self.answers.get(&widget.question_uri) else {
            return Ok(Interaction::Unchanged);
        };

        let applied = match answer {
            Scripted::Text(text) => widget.set_text(text.as_str()),
            Scripted::Value(value) => widget.set_value(*value),
            Scripted::Selection(indices) => {
                widget.set_selection(indices);
                !widget.options().is_empty()
            }
            Scripted::Cancel => return Err(SmartCareError::Cancelled),
        };

        Ok(if applied {
            Interaction::Committed
        } else {
            Interaction::Unchanged
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::materialize;
    use crate::{Answer, AnswerItem, Question};

    #[test]
    fn node_balances_connections() {
        let node = StaticNode::new(Questionnaire::new("qn"));
        let handle = node.connect("X", "localhost", 10010).unwrap();
        assert_eq!(node.joined(), 1);

        let fetched = node.fetch_questionnaire(&handle).unwrap();
        assert_eq!(fetched.map(|q| q.uri), Some("qn".to_string()));

        node.disconnect(handle).unwrap();
        assert_eq!(node.joined(), 0);
    }

    #[test]
    fn refusing_node() {
        let node = StaticNode::empty().refusing();
        let err = node.connect("X", "localhost", 1).unwrap_err();
        assert_eq!(err.to_string(), "Connection refused by 'X' at localhost:1");
    }

    #[test]
    fn script_mismatch_is_unchanged() {
        let question = Question::new(
            "q",
            "Name?",
            Answer::new("a", "http://x#Text").with_item(AnswerItem::new("t", "0", "")),
        );
        let mut widget = materialize(&question);
        let backend = ScriptedBackend::new().with_value("q", 3);

        assert_eq!(backend.present(&mut widget).unwrap(), Interaction::Unchanged);
        assert_eq!(widget.text(), Some(""));
    }
}
