//! Presentation-agnostic controls.
//!
//! A [`Widget`] is what a backend renders for one question. Backends mutate
//! the widget state in place; the core then captures that state back into a
//! [`Feedback`](crate::Feedback).

use crate::AnswerType;

/// A renderable control for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    /// The question this widget belongs to.
    pub question_uri: String,

    /// The question text.
    pub prompt: String,

    /// The answer type the widget was built for.
    pub answer_type: AnswerType,

    /// Control state.
    pub body: WidgetBody,
}

/// The control state of a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetBody {
    /// Free text input.
    TextField { value: String },

    /// A list of options. `multiple` allows more than one selection.
    Choice {
        multiple: bool,
        options: Vec<ChoiceOption>,
    },

    /// A numeric slider over `0..=max`. `ticks` holds the labels for
    /// continuous scales and is empty otherwise.
    Slider { value: i64, max: i64, ticks: Vec<i64> },
}

/// One option of a choice widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Position in the answer's item list.
    pub index: usize,

    /// Identifier of the answer item.
    pub uri: String,

    /// Display label.
    pub label: String,

    pub selected: bool,
}

/// What happened when a backend presented a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// The user committed a value; the widget state should be captured.
    Committed,

    /// The user moved on without committing anything.
    Unchanged,
}

impl Widget {
    pub fn new(
        question_uri: impl Into<String>,
        prompt: impl Into<String>,
        answer_type: AnswerType,
        body: WidgetBody,
    ) -> Self {
        Self {
            question_uri: question_uri.into(),
            prompt: prompt.into(),
            answer_type,
            body,
        }
    }

    /// Current text, for text fields.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            WidgetBody::TextField { value } => Some(value),
            _ => None,
        }
    }

    /// Current slider position, for sliders.
    pub fn value(&self) -> Option<i64> {
        match &self.body {
            WidgetBody::Slider { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Options of a choice widget; empty for other kinds.
    pub fn options(&self) -> &[ChoiceOption] {
        match &self.body {
            WidgetBody::Choice { options, .. } => options,
            _ => &[],
        }
    }

    /// Positions of all selected options, in order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.options()
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.index)
            .collect()
    }

    /// Replace the text of a text field. Returns `false` for other kinds.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.body {
            WidgetBody::TextField { value } => {
                *value = text.into();
                true
            }
            _ => false,
        }
    }

    /// Move a slider, clamping to `0..=max`. Returns `false` for other kinds.
    pub fn set_value(&mut self, new_value: i64) -> bool {
        match &mut self.body {
            WidgetBody::Slider { value, max, .. } => {
                *value = new_value.clamp(0, (*max).max(0));
                true
            }
            _ => false,
        }
    }

    /// Select the option at `index`. Single-selection widgets drop any
    /// previous selection. Returns `false` if there is no such option.
    pub fn select(&mut self, index: usize) -> bool {
        let WidgetBody::Choice { multiple, options } = &mut self.body else {
            return false;
        };
        if index >= options.len() {
            return false;
        }
        if !*multiple {
            for option in options.iter_mut() {
                option.selected = false;
            }
        }
        options[index].selected = true;
        true
    }

    /// Flip the selection of the option at `index`.
    pub fn toggle(&mut self, index: usize) -> bool {
        let selected = match self.options().get(index) {
            Some(option) => option.selected,
            None => return false,
        };
        if selected {
            if let WidgetBody::Choice { options, .. } = &mut self.body {
                options[index].selected = false;
            }
            true
        } else {
            self.select(index)
        }
    }

    /// Replace the whole selection with `indices`; out-of-range positions are
    /// ignored. Single-selection widgets keep the last valid index only.
    pub fn set_selection(&mut self, indices: &[usize]) {
        if let WidgetBody::Choice { options, .. } = &mut self.body {
            for option in options.iter_mut() {
                option.selected = false;
            }
        }
        for &index in indices {
            self.select(index);
        }
    }
}
