use tracing::debug;

use crate::{Answer, AnswerItem, AnswerType, ChoiceOption, Question, Widget, WidgetBody};

/// Number of equal intervals a continuous scale is divided into for labels.
pub const CONTINUOUS_STEP_COUNT: i64 = 10;

/// Slider maximum used when an answer does not define one.
pub const DEFAULT_SLIDER_MAX: i64 = 100;

/// Build the widget for a question.
///
/// Choice answers get one option per item, in item order, so that option
/// `j` always corresponds to `answer.items[j]`. Slider answers read their
/// initial value from `items[0]` and their maximum from `items[1]`.
/// Unrecognized answer types are shown as a single-choice list.
pub fn materialize(question: &Question) -> Widget {
    let answer = question.answer();
    let kind = answer.kind();

    let body = match kind {
        AnswerType::Text => WidgetBody::TextField {
            value: String::new(),
        },
        AnswerType::BipolarQuestion | AnswerType::ContinuousScale => slider(answer, kind),
        AnswerType::MultipleChoice
        | AnswerType::SingleChoice
        | AnswerType::Dichotomous
        | AnswerType::GuttmanScale
        | AnswerType::LikertScale
        | AnswerType::Unknown => choice(answer, kind.allows_multiple()),
    };

    debug!(question = question.uri(), answer_type = %kind, "materialized widget");
    Widget::new(question.uri(), question.description(), kind, body)
}

fn choice(answer: &Answer, multiple: bool) -> WidgetBody {
    let options = answer
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| ChoiceOption {
            index,
            uri: item.uri.clone(),
            label: item.item_text.clone(),
            selected: false,
        })
        .collect();
    WidgetBody::Choice { multiple, options }
}

fn slider(answer: &Answer, kind: AnswerType) -> WidgetBody {
    let max = answer
        .item(1)
        .and_then(AnswerItem::extract_number)
        .unwrap_or(DEFAULT_SLIDER_MAX);
    let value = answer
        .item(0)
        .and_then(AnswerItem::extract_number)
        .unwrap_or(0)
        .min(max);
    let ticks = match kind {
        AnswerType::ContinuousScale => ticks(max, CONTINUOUS_STEP_COUNT),
        _ => Vec::new(),
    };
    WidgetBody::Slider { value, max, ticks }
}

/// Tick labels for a range `0..=max` split into `step_count` intervals.
///
/// Tick `i` is `(max / step_count) * i` with integer division, for
/// `i` in `0..=step_count`.
pub fn ticks(max: i64, step_count: i64) -> Vec<i64> {
    if step_count <= 0 {
        return Vec::new();
    }
    let step = max / step_count;
    (0..=step_count).map(|i| step * i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(type_tag: &str, items: &[(&str, &str)]) -> Question {
        let mut answer = Answer::new("ans", format!("http://oss.fruct.org/smartcare#{type_tag}"));
        for (uri, text) in items {
            answer.add_item(AnswerItem::new(*uri, "1", *text));
        }
        Question::new("q1", "How are you?", answer)
    }

    #[test]
    fn text_becomes_empty_field() {
        let widget = materialize(&question("Text", &[("t", "")]));
        assert_eq!(widget.answer_type, AnswerType::Text);
        assert_eq!(widget.text(), Some(""));
        assert_eq!(widget.prompt, "How are you?");
    }

    #[test]
    fn choice_options_follow_item_order() {
        let widget = materialize(&question(
            "SingleChoise",
            &[("a1", "Good"), ("a2", "Fine"), ("a3", "Bad")],
        ));

        let options = widget.options();
        assert_eq!(options.len(), 3);
        for (j, option) in options.iter().enumerate() {
            assert_eq!(option.index, j);
            assert!(!option.selected);
        }
        assert_eq!(options[1].uri, "a2");
        assert_eq!(options[1].label, "Fine");
        assert!(matches!(
            widget.body,
            WidgetBody::Choice {
                multiple: false,
                ..
            }
        ));
    }

    #[test]
    fn multiple_choice_allows_many() {
        let widget = materialize(&question("MultipleChoise", &[("a1", "x"), ("a2", "y")]));
        assert!(matches!(widget.body, WidgetBody::Choice { multiple: true, .. }));
    }

    #[test]
    fn unknown_type_renders_as_single_choice() {
        let widget = materialize(&question("Ranking", &[("a1", "x")]));
        assert_eq!(widget.answer_type, AnswerType::Unknown);
        assert!(matches!(
            widget.body,
            WidgetBody::Choice {
                multiple: false,
                ..
            }
        ));
    }

    #[test]
    fn bipolar_reads_bounds_from_items() {
        let widget = materialize(&question(
            "BipolarQuestion",
            &[("left", "Now: 30"), ("right", "Max: 100bpm")],
        ));
        assert_eq!(
            widget.body,
            WidgetBody::Slider {
                value: 30,
                max: 100,
                ticks: Vec::new()
            }
        );
    }

    #[test]
    fn continuous_scale_has_ticks() {
        let widget = materialize(&question(
            "ContinuousScale",
            &[("min", "0"), ("max", "Max: 100bpm")],
        ));
        let WidgetBody::Slider { ticks, max, .. } = &widget.body else {
            panic!("expected slider, got {:?}", widget.body);
        };
        assert_eq!(*max, 100);
        assert_eq!(ticks, &vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    }

    #[test]
    fn slider_without_items_uses_defaults() {
        let widget = materialize(&question("BipolarQuestion", &[]));
        assert_eq!(widget.value(), Some(0));
        assert!(matches!(
            widget.body,
            WidgetBody::Slider { max: DEFAULT_SLIDER_MAX, .. }
        ));
    }

    #[test]
    fn slider_value_is_clamped_to_max() {
        let widget = materialize(&question("BipolarQuestion", &[("v", "80"), ("m", "50")]));
        assert_eq!(widget.value(), Some(50));
    }

    #[test]
    fn ticks_use_integer_steps() {
        assert_eq!(ticks(100, 10), vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        assert_eq!(ticks(25, 10), vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20]);
        assert!(ticks(100, 0).is_empty());
    }
}
