//! Reconciliation between questions, widgets and feedback.
//!
//! Every question goes through the same cycle:
//! 1. [`materialize`] builds a widget from the question's answer definition.
//! 2. [`restore`] marks the widget with what an existing feedback already holds.
//! 3. A backend lets the user change the widget.
//! 4. [`capture`] writes the widget state back into the feedback.
//!
//! Dispatch is on [`AnswerType`](crate::AnswerType): single-value types
//! (`Text`, `BipolarQuestion`, `ContinuousScale`) keep one synthesized item,
//! choice types keep one snapshot per selected option.

mod capture;
mod materialize;
mod restore;

pub use capture::{CaptureOutcome, SkipReason, capture};
pub use materialize::{CONTINUOUS_STEP_COUNT, DEFAULT_SLIDER_MAX, materialize, ticks};
pub use restore::restore;
