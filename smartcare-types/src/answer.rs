use serde::{Deserialize, Serialize};

use crate::{AnswerType, TypeTag};

/// One selectable option or numeric bound within an [`Answer`].
///
/// Items may carry nested sub-answers, which allows hierarchical answer
/// structures (an option that opens a follow-up answer of its own).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerItem {
    /// Identifier of the option in the smart space.
    #[serde(default)]
    pub uri: String,

    /// Relevance weight. Stored as text, interpreted numerically by scales.
    #[serde(default)]
    pub item_score: String,

    /// Display label.
    #[serde(default)]
    pub item_text: String,

    /// Nested answers attached to this option.
    #[serde(default)]
    pub sub_answers: Vec<Answer>,
}

impl AnswerItem {
    /// Create an item without sub-answers.
    pub fn new(
        uri: impl Into<String>,
        item_score: impl Into<String>,
        item_text: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            item_score: item_score.into(),
            item_text: item_text.into(),
            sub_answers: Vec::new(),
        }
    }

    /// A copy of this item carrying `text` instead of its label.
    ///
    /// Used for single-value responses, where the snapshot keeps the
    /// canonical option's identity but holds the user's live value.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            uri: self.uri.clone(),
            item_score: self.item_score.clone(),
            item_text: text.into(),
            sub_answers: Vec::new(),
        }
    }

    /// Append a sub-answer.
    pub fn add_sub_answer(&mut self, answer: Answer) {
        self.sub_answers.push(answer);
    }

    /// Numeric value embedded in the label, e.g. `"Max: 100bpm"` yields `100`.
    ///
    /// Every non-digit character is discarded before parsing. Returns `None`
    /// when no digits remain or the number does not fit.
    pub fn extract_number(&self) -> Option<i64> {
        extract_number(&self.item_text)
    }
}

/// Strip every non-digit character from `text` and parse what is left.
pub fn extract_number(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// The definition of the replies a question accepts: a type and its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Identifier of the answer in the smart space.
    #[serde(default)]
    pub uri: String,

    /// Type IRI, decoded once into an [`AnswerType`].
    #[serde(rename = "type", default)]
    pub type_tag: TypeTag,

    /// Options in display order. Widgets index into this list by position.
    #[serde(default)]
    pub items: Vec<AnswerItem>,
}

impl Answer {
    /// Create an answer with no items.
    pub fn new(uri: impl Into<String>, type_iri: impl Into<TypeTag>) -> Self {
        Self {
            uri: uri.into(),
            type_tag: type_iri.into(),
            items: Vec::new(),
        }
    }

    /// Builder-style variant of [`Answer::add_item`].
    pub fn with_item(mut self, item: AnswerItem) -> Self {
        self.items.push(item);
        self
    }

    /// Append an option at the end of the list.
    pub fn add_item(&mut self, item: AnswerItem) {
        self.items.push(item);
    }

    /// The decoded answer type.
    pub fn kind(&self) -> AnswerType {
        self.type_tag.kind()
    }

    /// The short type name (fragment of the type IRI).
    pub fn type_name(&self) -> &str {
        self.type_tag.name()
    }

    pub fn items(&self) -> &[AnswerItem] {
        &self.items
    }

    /// Option at position `index`, if present.
    pub fn item(&self, index: usize) -> Option<&AnswerItem> {
        self.items.get(index)
    }

    /// Option with the given identifier.
    pub fn item_by_uri(&self, uri: &str) -> Option<&AnswerItem> {
        self.items.iter().find(|item| item.uri == uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_number_strips_non_digits() {
        let item = AnswerItem::new("max", "1", "Max: 100bpm");
        assert_eq!(item.extract_number(), Some(100));
    }

    #[test]
    fn extract_number_joins_scattered_digits() {
        assert_eq!(extract_number("1 to 5"), Some(15));
    }

    #[test]
    fn extract_number_without_digits() {
        assert_eq!(extract_number("none"), None);
        assert_eq!(extract_number(""), None);
    }

    #[test]
    fn extract_number_overflow_is_none() {
        assert_eq!(extract_number("99999999999999999999999"), None);
    }

    #[test]
    fn with_text_keeps_identity() {
        let mut item = AnswerItem::new("a1", "3", "Label");
        item.add_sub_answer(Answer::new("sub", "http://x#Text"));

        let snapshot = item.with_text("typed value");
        assert_eq!(snapshot.uri, "a1");
        assert_eq!(snapshot.item_score, "3");
        assert_eq!(snapshot.item_text, "typed value");
        assert!(snapshot.sub_answers.is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let mut item = AnswerItem::new("a1", "1", "One");
        item.add_sub_answer(Answer::new("sub", "http://x#Text"));

        let mut copy = item.clone();
        copy.sub_answers[0].add_item(AnswerItem::new("s1", "0", "nested"));

        assert!(item.sub_answers[0].items.is_empty());
        assert_eq!(copy.sub_answers[0].items.len(), 1);
    }

    #[test]
    fn answer_lookup() {
        let answer = Answer::new("ans", "http://x#SingleChoise")
            .with_item(AnswerItem::new("a1", "1", "One"))
            .with_item(AnswerItem::new("a2", "2", "Two"));

        assert_eq!(answer.kind(), AnswerType::SingleChoice);
        assert_eq!(answer.type_name(), "SingleChoise");
        assert_eq!(answer.item(1).map(|i| i.uri.as_str()), Some("a2"));
        assert!(answer.item(2).is_none());
        assert_eq!(
            answer.item_by_uri("a1").map(|i| i.item_text.as_str()),
            Some("One")
        );
    }

    #[test]
    fn json_field_names() {
        let answer = Answer::new("ans", "http://x#Text").with_item(AnswerItem::new("a", "0", ""));
        let json = serde_json::to_value(&answer).unwrap();

        assert_eq!(json["uri"], "ans");
        assert_eq!(json["type"], "http://x#Text");
        assert_eq!(json["items"][0]["itemScore"], "0");
        assert_eq!(json["items"][0]["itemText"], "");
        assert!(json["items"][0]["subAnswers"].as_array().unwrap().is_empty());
    }

    #[test]
    fn missing_type_is_unknown() {
        let answer: Answer = serde_json::from_str(r#"{"uri": "ans"}"#).unwrap();
        assert_eq!(answer.kind(), AnswerType::Unknown);
        assert!(answer.items.is_empty());
    }
}
