//! Dialoguer backend implementation for QuestionnaireBackend trait.

use dialoguer::{FuzzySelect, Input, MultiSelect, Select, theme::ColorfulTheme};
use smartcare::{
    ChoiceOption, Feedback, Interaction, Questionnaire, QuestionnaireBackend, SmartCareError,
    Widget, WidgetBody,
};
use thiserror::Error;
use tracing::debug;

/// Single-choice lists longer than this get a fuzzy search prompt.
const FUZZY_THRESHOLD: usize = 10;

/// Error type for the Dialoguer backend.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the questionnaire (e.g., pressed Ctrl+C or Escape).
    #[error("Questionnaire cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

impl From<DialoguerError> for SmartCareError {
    fn from(err: DialoguerError) -> Self {
        match err {
            DialoguerError::Cancelled => SmartCareError::Cancelled,
            other => SmartCareError::backend(other),
        }
    }
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn interrupted(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// Dialoguer backend for interactive CLI prompts.
///
/// This backend uses the `dialoguer` library to present questions
/// to the user in a command-line interface with colorful themes.
#[derive(Debug, Default, Clone)]
pub struct DialoguerBackend {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerBackend {
    /// Create a new Dialoguer backend with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a backend with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn ask_text(&self, prompt: &str, value: &mut String) -> Result<Interaction, DialoguerError> {
        let mut _theme;
        let mut builder: Input<String>;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Input::with_theme(&_theme);
        } else {
            builder = Input::new();
        }

        builder = builder.with_prompt(prompt).allow_empty(true);
        if !value.is_empty() {
            builder = builder.with_initial_text(value.clone());
        }

        let text = builder.interact_text().map_err(interrupted)?;
        if text.is_empty() && value.is_empty() {
            return Ok(Interaction::Unchanged);
        }
        *value = text;
        Ok(Interaction::Committed)
    }

    fn ask_slider(
        &self,
        prompt: &str,
        value: &mut i64,
        max: i64,
        ticks: &[i64],
    ) -> Result<Interaction, DialoguerError> {
        if !ticks.is_empty() {
            let labels: Vec<String> = ticks.iter().map(i64::to_string).collect();
            println!("  {}", labels.join(" | "));
        }

        loop {
            let mut _theme;
            let mut builder: Input<i64>;
            if self.colorful {
                _theme = ColorfulTheme::default();
                builder = Input::with_theme(&_theme);
            } else {
                builder = Input::new();
            }

            builder = builder
                .with_prompt(format!("{prompt} (0-{max})"))
                .default(*value);

            let result = builder.interact_text().map_err(interrupted)?;

            if result < 0 {
                println!("Error: Value must be at least 0");
                continue;
            }
            if result > max {
                println!("Error: Value must be at most {max}");
                continue;
            }

            *value = result;
            return Ok(Interaction::Committed);
        }
    }

    fn ask_one(
        &self,
        prompt: &str,
        options: &mut [ChoiceOption],
    ) -> Result<Interaction, DialoguerError> {
        let items: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        let current = options.iter().position(|o| o.selected);

        let _theme;
        let result = if items.len() > FUZZY_THRESHOLD {
            let mut builder: FuzzySelect;
            if self.colorful {
                _theme = ColorfulTheme::default();
                builder = FuzzySelect::with_theme(&_theme);
            } else {
                builder = FuzzySelect::new();
            }
            builder = builder.with_prompt(prompt).items(&items);
            if let Some(index) = current {
                builder = builder.default(index);
            }
            builder.interact()
        } else {
            let mut builder: Select;
            if self.colorful {
                _theme = ColorfulTheme::default();
                builder = Select::with_theme(&_theme);
            } else {
                builder = Select::new();
            }
            builder = builder.with_prompt(prompt).items(&items);
            if let Some(index) = current {
                builder = builder.default(index);
            }
            builder.interact()
        };
        let selection = result.map_err(interrupted)?;

        for option in options.iter_mut() {
            option.selected = option.index == selection;
        }
        Ok(Interaction::Committed)
    }

    fn ask_any(
        &self,
        prompt: &str,
        options: &mut [ChoiceOption],
    ) -> Result<Interaction, DialoguerError> {
        let items: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        let defaults: Vec<bool> = options.iter().map(|o| o.selected).collect();

        let mut builder: MultiSelect;
        let _theme;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = MultiSelect::with_theme(&_theme);
        } else {
            builder = MultiSelect::new();
        }

        builder = builder
            .with_prompt(prompt)
            .items(&items)
            .defaults(&defaults);

        let selections = builder.interact().map_err(interrupted)?;

        for option in options.iter_mut() {
            option.selected = selections.contains(&option.index);
        }
        Ok(Interaction::Committed)
    }
}

impl QuestionnaireBackend for DialoguerBackend {
    type Error = DialoguerError;

    fn begin(&self, questionnaire: &Questionnaire) -> Result<(), Self::Error> {
        println!("{} ({} questions)", questionnaire.uri, questionnaire.len());
        println!();
        Ok(())
    }

    fn present(&self, widget: &mut Widget) -> Result<Interaction, Self::Error> {
        debug!(question = %widget.question_uri, answer_type = %widget.answer_type, "prompting");
        let prompt = widget.prompt.clone();

        match &mut widget.body {
            WidgetBody::TextField { value } => self.ask_text(&prompt, value),
            WidgetBody::Slider { value, max, ticks } => {
                self.ask_slider(&prompt, value, *max, ticks)
            }
            WidgetBody::Choice { options, .. } if options.is_empty() => {
                println!("{prompt} (no options)");
                Ok(Interaction::Unchanged)
            }
            WidgetBody::Choice {
                multiple: true,
                options,
            } => self.ask_any(&prompt, options),
            WidgetBody::Choice {
                multiple: false,
                options,
            } => self.ask_one(&prompt, options),
        }
    }

    fn finish(&self, feedback: &Feedback) -> Result<(), Self::Error> {
        println!();
        println!("{} questions answered", feedback.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_creation() {
        let _backend = DialoguerBackend::new();
        let _plain = DialoguerBackend::plain();
    }

    #[test]
    fn error_types() {
        let err = DialoguerError::Cancelled;
        assert_eq!(err.to_string(), "Questionnaire cancelled by user");
    }

    #[test]
    fn cancellation_maps_to_session_error() {
        let err: SmartCareError = DialoguerError::Cancelled.into();
        assert!(err.is_cancelled());

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err: SmartCareError = DialoguerError::Dialoguer(dialoguer::Error::IO(io)).into();
        assert!(matches!(err, SmartCareError::Backend(_)));
    }

    #[test]
    fn interrupt_is_cancel() {
        let io = std::io::Error::new(std::io::ErrorKind::Interrupted, "ctrl-c");
        assert!(matches!(
            interrupted(dialoguer::Error::IO(io)),
            DialoguerError::Cancelled
        ));
    }
}
