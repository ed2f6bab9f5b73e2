use serde::{Deserialize, Serialize};

use crate::{Answer, AnswerType};

/// A single question of a questionnaire.
///
/// Every question has exactly one answer definition; there is no such thing
/// as a question without an answer type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier of the question. Responses are keyed by it.
    #[serde(default)]
    uri: String,

    /// The text shown to the user.
    #[serde(default)]
    description: String,

    /// What kind of reply this question accepts.
    answer: Answer,
}

impl Question {
    /// Create a new question.
    pub fn new(uri: impl Into<String>, description: impl Into<String>, answer: Answer) -> Self {
        Self {
            uri: uri.into(),
            description: description.into(),
            answer,
        }
    }

    /// Get the question identifier.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Get the display text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the answer definition.
    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    /// Get a mutable reference to the answer definition.
    pub fn answer_mut(&mut self) -> &mut Answer {
        &mut self.answer
    }

    /// Replace the answer definition.
    pub fn set_answer(&mut self, answer: Answer) {
        self.answer = answer;
    }

    /// Shortcut for `self.answer().kind()`.
    pub fn answer_type(&self) -> AnswerType {
        self.answer.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnswerItem;

    #[test]
    fn set_answer_replaces_definition() {
        let mut question = Question::new("q1", "Name?", Answer::new("a1", "http://x#Text"));
        assert_eq!(question.answer_type(), AnswerType::Text);

        question.set_answer(
            Answer::new("a2", "http://x#LikertScale").with_item(AnswerItem::new("l1", "1", "Low")),
        );
        assert_eq!(question.answer().uri, "a2");
        assert_eq!(question.answer_type(), AnswerType::LikertScale);
        assert_eq!(question.uri(), "q1");
    }
}
