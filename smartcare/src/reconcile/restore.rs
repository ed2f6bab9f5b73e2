use tracing::debug;

use crate::{AnswerItem, AnswerType, Feedback, Question, Response, Widget, WidgetBody};

/// Mark `widget` with the answer `feedback` already holds for `question`.
///
/// The response is found by comparing its identifier with the question's.
/// Text and slider widgets take the first linked value of the first response
/// item; choice widgets select option `j` when any response item links an
/// item with the identifier of `answer.items[j]`.
///
/// Missing response items, missing linked items and unparsable slider values
/// count as "no match" and leave the widget as it is. Feedback is never
/// modified.
///
/// Returns `true` if the widget state was taken from the feedback.
pub fn restore(feedback: &Feedback, question: &Question, widget: &mut Widget) -> bool {
    let Some(response) = feedback.response(question.uri()) else {
        return false;
    };
    let answer = question.answer();
    let kind = answer.kind();

    let restored = match &mut widget.body {
        _ if kind.is_unknown() => false,
        WidgetBody::TextField { value } if kind == AnswerType::Text => {
            match first_linked(response) {
                Some(item) => {
                    *value = item.item_text.clone();
                    true
                }
                None => false,
            }
        }
        WidgetBody::Slider { value, max, .. } if kind.is_slider() => {
            match first_linked(response).and_then(|item| item.item_text.trim().parse::<i64>().ok())
            {
                Some(saved) => {
                    *value = saved.clamp(0, (*max).max(0));
                    true
                }
                None => false,
            }
        }
        WidgetBody::Choice { options, .. } if kind.is_multi_value() => {
            for option in options.iter_mut() {
                option.selected = answer
                    .item(option.index)
                    .is_some_and(|item| response.links(&item.uri));
            }
            true
        }
        _ => false,
    };

    debug!(question = question.uri(), restored, "restored widget");
    restored
}

fn first_linked(response: &Response) -> Option<&AnswerItem> {
    response.first_item()?.linked_items.first()
}
