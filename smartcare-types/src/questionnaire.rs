use serde::{Deserialize, Serialize};

use crate::{Answer, AnswerItem, Question};

/// A questionnaire: an identifier and its questions in display order.
///
/// Identifier uniqueness is not enforced here; the smart space is expected
/// to hand out distinct question identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Questionnaire {
    /// Identifier of the questionnaire in the smart space.
    pub uri: String,

    /// All questions, in the order they are shown.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Questionnaire {
    /// Create an empty questionnaire.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            questions: Vec::new(),
        }
    }

    /// Append a question at the end.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// Builder-style variant of [`Questionnaire::add_question`].
    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Find a question by identifier.
    pub fn question(&self, uri: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.uri() == uri)
    }

    /// Check if the questionnaire has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Flatten the question tree (questions, answers, items and nested
    /// sub-answers) in depth-first display order.
    pub fn outline(&self) -> Vec<OutlineEntry<'_>> {
        let mut entries = Vec::new();
        for question in &self.questions {
            entries.push(OutlineEntry::Question(question));
            outline_answer(question.answer(), 1, &mut entries);
        }
        entries
    }
}

/// One line of [`Questionnaire::outline`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineEntry<'a> {
    Question(&'a Question),
    Answer { depth: usize, answer: &'a Answer },
    Item { depth: usize, item: &'a AnswerItem },
}

impl OutlineEntry<'_> {
    /// Nesting depth; questions are at depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Question(_) => 0,
            Self::Answer { depth, .. } | Self::Item { depth, .. } => *depth,
        }
    }
}

fn outline_answer<'a>(answer: &'a Answer, depth: usize, entries: &mut Vec<OutlineEntry<'a>>) {
    entries.push(OutlineEntry::Answer { depth, answer });
    for item in &answer.items {
        entries.push(OutlineEntry::Item {
            depth: depth + 1,
            item,
        });
        for sub in &item.sub_answers {
            outline_answer(sub, depth + 2, entries);
        }
    }
}
