use tracing::debug;

use crate::{
    Answer, AnswerType, Feedback, Questionnaire, ReconcileError, Response, ResponseItem, Widget,
    WidgetBody,
};

/// What [`capture`] did to the feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A new response was appended.
    Created,

    /// The existing response was cleared and refilled.
    Replaced,

    /// Nothing was written.
    Skipped(SkipReason),
}

/// Why a capture did not touch the feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The answer type is not recognized; such answers are display-only.
    UnknownAnswerType,

    /// A single-value answer has no item to take identity from.
    MissingCanonicalItem,

    /// Nothing is selected and there is no earlier response to overwrite.
    NothingSelected,

    /// The widget kind does not fit the answer type.
    WidgetMismatch,
}

/// Record the state of `widget` in `feedback`.
///
/// The question is looked up by the widget's question identifier. If the
/// feedback already has a response for it, that response is cleared and
/// receives the new item, so capturing twice never accumulates items.
/// Otherwise a new response (identifier = question identifier) is appended.
///
/// A choice widget with an empty selection only overwrites an existing
/// response; it does not create one.
pub fn capture(
    questionnaire: &Questionnaire,
    feedback: &mut Feedback,
    widget: &Widget,
) -> Result<CaptureOutcome, ReconcileError> {
    let question = questionnaire
        .question(&widget.question_uri)
        .ok_or_else(|| ReconcileError::UnknownQuestion(widget.question_uri.clone()))?;

    let item = match response_item(question.answer(), widget) {
        Ok(item) => item,
        Err(reason) => {
            debug!(question = question.uri(), ?reason, "capture skipped");
            return Ok(CaptureOutcome::Skipped(reason));
        }
    };

    let outcome = match feedback.response_mut(question.uri()) {
        Some(response) => {
            response.clear();
            response.add_response_item(item);
            CaptureOutcome::Replaced
        }
        None if item.linked_items.is_empty() => CaptureOutcome::Skipped(SkipReason::NothingSelected),
        None => {
            let mut response = Response::new(question.uri());
            response.add_response_item(item);
            feedback.add_response(response);
            CaptureOutcome::Created
        }
    };

    debug!(question = question.uri(), ?outcome, "captured widget");
    Ok(outcome)
}

/// Build the response item for the current widget state.
fn response_item(answer: &Answer, widget: &Widget) -> Result<ResponseItem, SkipReason> {
    let kind = answer.kind();
    if kind.is_unknown() {
        return Err(SkipReason::UnknownAnswerType);
    }

    let mut item = ResponseItem::new(answer.uri.as_str(), answer.type_name(), "");

    match &widget.body {
        WidgetBody::TextField { value } if kind == AnswerType::Text => {
            let canonical = answer.item(0).ok_or(SkipReason::MissingCanonicalItem)?;
            item.link(canonical.with_text(value.as_str()));
        }
        WidgetBody::Slider { value, .. } if kind.is_slider() => {
            let canonical = answer.item(0).ok_or(SkipReason::MissingCanonicalItem)?;
            item.link(canonical.with_text(value.to_string()));
        }
        WidgetBody::Choice { options, .. } if kind.is_multi_value() => {
            for option in options.iter().filter(|o| o.selected) {
                if let Some(selected) = answer.item(option.index) {
                    item.link(selected.clone());
                }
            }
        }
        _ => return Err(SkipReason::WidgetMismatch),
    }

    Ok(item)
}
