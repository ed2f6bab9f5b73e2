use serde::{Deserialize, Serialize};

use crate::AnswerItem;

/// The captured value(s) of one answer.
///
/// Single-value answers link one synthesized [`AnswerItem`] holding the live
/// value; choice answers link one snapshot per selected option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseItem {
    /// Identifier, seeded from the answer's identifier.
    pub uri: String,

    /// Free-form channel metadata for text-backed replies.
    pub text_item: String,

    /// Free-form channel metadata for file-backed replies.
    pub file_uri: String,

    /// Snapshots of what the user chose or typed.
    #[serde(default)]
    pub linked_items: Vec<AnswerItem>,
}

impl ResponseItem {
    pub fn new(
        uri: impl Into<String>,
        text_item: impl Into<String>,
        file_uri: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            text_item: text_item.into(),
            file_uri: file_uri.into(),
            linked_items: Vec::new(),
        }
    }

    /// Append a snapshot.
    pub fn link(&mut self, item: AnswerItem) {
        self.linked_items.push(item);
    }

    /// Check whether a snapshot with the given identifier is linked.
    pub fn links(&self, uri: &str) -> bool {
        self.linked_items.iter().any(|item| item.uri == uri)
    }
}

/// A user's reply to one question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Response {
    /// Identifier of this response. Equal to `question_uri` unless built
    /// with [`Response::with_uri`].
    pub uri: String,

    /// The question being answered.
    pub question_uri: String,

    /// Captured values. Capture keeps exactly one item per response.
    #[serde(default)]
    pub response_items: Vec<ResponseItem>,
}

impl Response {
    /// Create a response to `question_uri`, using the same identifier for
    /// the response itself.
    pub fn new(question_uri: impl Into<String>) -> Self {
        let question_uri = question_uri.into();
        Self {
            uri: question_uri.clone(),
            question_uri,
            response_items: Vec::new(),
        }
    }

    /// Create a response whose identifier differs from the question's.
    pub fn with_uri(uri: impl Into<String>, question_uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            question_uri: question_uri.into(),
            response_items: Vec::new(),
        }
    }

    pub fn add_response_item(&mut self, item: ResponseItem) {
        self.response_items.push(item);
    }

    /// Drop every captured item.
    pub fn clear(&mut self) {
        self.response_items.clear();
    }

    /// The first captured item, if any.
    pub fn first_item(&self) -> Option<&ResponseItem> {
        self.response_items.first()
    }

    /// Check whether any item links a snapshot with the given identifier.
    pub fn links(&self, answer_item_uri: &str) -> bool {
        self.response_items
            .iter()
            .any(|item| item.links(answer_item_uri))
    }
}

/// A complete submission: every response of one questionnaire session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feedback {
    pub uri: String,

    /// Who answered.
    pub person_uri: String,

    /// Which questionnaire was answered.
    pub questionnaire_uri: String,

    /// One entry per question the user interacted with, in capture order.
    #[serde(default)]
    pub responses: Vec<Response>,
}

impl Feedback {
    /// Create an empty feedback.
    pub fn new(
        uri: impl Into<String>,
        person_uri: impl Into<String>,
        questionnaire_uri: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            person_uri: person_uri.into(),
            questionnaire_uri: questionnaire_uri.into(),
            responses: Vec::new(),
        }
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }

    pub fn set_person_uri(&mut self, person_uri: impl Into<String>) {
        self.person_uri = person_uri.into();
    }

    pub fn set_questionnaire_uri(&mut self, questionnaire_uri: impl Into<String>) {
        self.questionnaire_uri = questionnaire_uri.into();
    }

    /// Append a response at the end.
    pub fn add_response(&mut self, response: Response) {
        self.responses.push(response);
    }

    /// Get the responses.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Find the response with the given identifier.
    pub fn response(&self, uri: &str) -> Option<&Response> {
        self.responses.iter().find(|r| r.uri == uri)
    }

    /// Mutable variant of [`Feedback::response`].
    pub fn response_mut(&mut self, uri: &str) -> Option<&mut Response> {
        self.responses.iter_mut().find(|r| r.uri == uri)
    }

    /// Drop every response, keeping the identifiers.
    pub fn reset(&mut self) {
        self.responses.clear();
    }

    /// Check if no question has been answered yet.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }
}
