//! A questionnaire being filled in.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::NodeConfig;
use crate::reconcile::{self, CaptureOutcome};
use crate::{
    Feedback, Interaction, Questionnaire, QuestionnaireBackend, ReconcileError, SmartCareError,
    SmartSpace, Widget,
};

/// The identifiers every new feedback starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackHeader {
    pub uri: String,
    pub person_uri: String,
    pub questionnaire_uri: String,
}

impl Default for FeedbackHeader {
    fn default() -> Self {
        Self {
            uri: "1 test".to_string(),
            person_uri: "Student".to_string(),
            questionnaire_uri: "feedback".to_string(),
        }
    }
}

impl FeedbackHeader {
    /// An empty feedback carrying this header.
    pub fn feedback(&self) -> Feedback {
        Feedback::new(
            self.uri.as_str(),
            self.person_uri.as_str(),
            self.questionnaire_uri.as_str(),
        )
    }

    fn of(feedback: &Feedback) -> Self {
        Self {
            uri: feedback.uri.clone(),
            person_uri: feedback.person_uri.clone(),
            questionnaire_uri: feedback.questionnaire_uri.clone(),
        }
    }
}

/// One questionnaire and the feedback collected for it.
///
/// All reconciliation goes through a session, so there is exactly one owner
/// of the questionnaire and the feedback at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    questionnaire: Questionnaire,
    feedback: Feedback,
    header: FeedbackHeader,
}

impl Session {
    /// Start with an empty feedback.
    pub fn start(questionnaire: Questionnaire, header: FeedbackHeader) -> Self {
        Self {
            feedback: header.feedback(),
            questionnaire,
            header,
        }
    }

    /// Continue with a feedback saved earlier.
    pub fn resume(questionnaire: Questionnaire, feedback: Feedback) -> Self {
        Self {
            header: FeedbackHeader::of(&feedback),
            questionnaire,
            feedback,
        }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn into_feedback(self) -> Feedback {
        self.feedback
    }

    /// Widget for the question `uri`, marked with the recorded answer.
    pub fn widget(&self, uri: &str) -> Option<Widget> {
        let question = self.questionnaire.question(uri)?;
        let mut widget = reconcile::materialize(question);
        reconcile::restore(&self.feedback, question, &mut widget);
        Some(widget)
    }

    /// Widgets for every question, in questionnaire order.
    pub fn widgets(&self) -> Vec<Widget> {
        self.questionnaire
            .questions()
            .iter()
            .map(|question| {
                let mut widget = reconcile::materialize(question);
                reconcile::restore(&self.feedback, question, &mut widget);
                widget
            })
            .collect()
    }

    /// Record the state of `widget` in the feedback.
    pub fn commit(&mut self, widget: &Widget) -> Result<CaptureOutcome, ReconcileError> {
        reconcile::capture(&self.questionnaire, &mut self.feedback, widget)
    }

    /// Throw away every answer and start over with the same header.
    pub fn reset(&mut self) {
        info!(responses = self.feedback.len(), "resetting feedback");
        self.feedback = self.header.feedback();
    }

    /// Present every question through `backend`, in order.
    ///
    /// Each widget is restored from the feedback before it is shown and
    /// captured when the backend reports a commit. On error (including
    /// cancellation) everything captured so far stays in the session.
    pub fn run<B: QuestionnaireBackend>(&mut self, backend: &B) -> Result<(), SmartCareError> {
        backend
            .begin(&self.questionnaire)
            .map_err(Into::<SmartCareError>::into)?;

        for question in &self.questionnaire.questions {
            let mut widget = reconcile::materialize(question);
            reconcile::restore(&self.feedback, question, &mut widget);

            match backend
                .present(&mut widget)
                .map_err(Into::<SmartCareError>::into)?
            {
                Interaction::Committed => {
                    let outcome =
                        reconcile::capture(&self.questionnaire, &mut self.feedback, &widget)?;
                    debug!(question = question.uri(), ?outcome, "committed");
                }
                Interaction::Unchanged => {
                    debug!(question = question.uri(), "left unchanged");
                }
            }
        }

        backend.finish(&self.feedback).map_err(Into::into)
    }

    /// Replace the questionnaire with the one the node currently serves.
    ///
    /// The feedback is kept; responses are matched to the new questions by
    /// identifier. On failure the session is left as it was.
    pub fn reload_from<N: SmartSpace>(
        &mut self,
        node: &N,
        config: &NodeConfig,
    ) -> Result<(), SmartCareError> {
        self.questionnaire = fetch_questionnaire(node, config)?;
        Ok(())
    }

    /// Send the feedback to the node.
    pub fn publish<N: SmartSpace>(&self, node: &N, config: &NodeConfig) -> Result<(), SmartCareError> {
        let handle = join(node, config)?;
        let published = node
            .publish_feedback(&handle, &self.feedback)
            .map_err(SmartCareError::backend);
        leave(node, handle);
        published?;

        info!(responses = self.feedback.len(), "feedback published");
        Ok(())
    }
}

/// Join the node, read its questionnaire and leave again.
pub fn fetch_questionnaire<N: SmartSpace>(
    node: &N,
    config: &NodeConfig,
) -> Result<Questionnaire, SmartCareError> {
    let handle = join(node, config)?;
    let fetched = node
        .fetch_questionnaire(&handle)
        .map_err(SmartCareError::backend);
    leave(node, handle);

    let questionnaire = fetched?.ok_or(SmartCareError::NoQuestionnaire)?;
    info!(
        uri = %questionnaire.uri,
        questions = questionnaire.len(),
        "questionnaire fetched"
    );
    Ok(questionnaire)
}

fn join<N: SmartSpace>(node: &N, config: &NodeConfig) -> Result<N::Handle, SmartCareError> {
    info!(
        name = %config.name,
        address = %config.address,
        port = config.port,
        "joining smart space"
    );
    node.connect(&config.name, &config.address, config.port)
        .map_err(|err| SmartCareError::NodeUnavailable {
            address: config.address.clone(),
            port: config.port,
            source: err.into(),
        })
}

fn leave<N: SmartSpace>(node: &N, handle: N::Handle) {
    if let Err(err) = node.disconnect(handle) {
        let err: anyhow::Error = err.into();
        warn!(error = %err, "failed to leave smart space");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_node::{ScriptedBackend, StaticNode};
    use crate::{Answer, AnswerItem, Question};

    fn questionnaire(uri: &str) -> Questionnaire {
        Questionnaire::new(uri)
            .with_question(Question::new(
                "q-name",
                "Name?",
                Answer::new("a-name", "http://x#Text").with_item(AnswerItem::new("t", "0", "")),
            ))
            .with_question(Question::new(
                "q-smoke",
                "Do you smoke?",
                Answer::new("a-smoke", "http://x#Dichotomous")
                    .with_item(AnswerItem::new("yes", "1", "Yes"))
                    .with_item(AnswerItem::new("no", "0", "No")),
            ))
    }

    #[test]
    fn start_uses_header() {
        let session = Session::start(questionnaire("qn"), FeedbackHeader::default());
        let feedback = session.feedback();

        assert_eq!(feedback.uri, "1 test");
        assert_eq!(feedback.person_uri, "Student");
        assert_eq!(feedback.questionnaire_uri, "feedback");
        assert!(feedback.is_empty());
    }

    #[test]
    fn commit_then_widget_restores() {
        let mut session = Session::start(questionnaire("qn"), FeedbackHeader::default());
        let mut widget = session.widget("q-smoke").unwrap();
        widget.select(1);
        session.commit(&widget).unwrap();

        let again = session.widget("q-smoke").unwrap();
        assert_eq!(again.selected_indices(), vec![1]);
        assert!(session.widget("q-missing").is_none());
    }

    #[test]
    fn reset_keeps_header() {
        let header = FeedbackHeader {
            person_uri: "Alice".to_string(),
            ..FeedbackHeader::default()
        };
        let mut session = Session::start(questionnaire("qn"), header);
        let mut widget = session.widget("q-name").unwrap();
        widget.set_text("Alice");
        session.commit(&widget).unwrap();

        session.reset();
        assert!(session.feedback().is_empty());
        assert_eq!(session.feedback().person_uri, "Alice");
    }

    #[test]
    fn resume_reset_keeps_saved_header() {
        let feedback = Feedback::new("f-9", "Bob", "qn");
        let mut session = Session::resume(questionnaire("qn"), feedback);
        session.reset();
        assert_eq!(session.feedback().uri, "f-9");
        assert_eq!(session.feedback().person_uri, "Bob");
    }

    #[test]
    fn run_captures_committed_widgets() {
        let mut session = Session::start(questionnaire("qn"), FeedbackHeader::default());
        let backend = ScriptedBackend::new()
            .with_text("q-name", "Alice")
            .with_selection("q-smoke", vec![0]);

        session.run(&backend).unwrap();

        let feedback = session.feedback();
        assert_eq!(feedback.len(), 2);
        let name = &feedback.response("q-name").unwrap().response_items[0];
        assert_eq!(name.linked_items[0].item_text, "Alice");
        assert!(feedback.response("q-smoke").unwrap().links("yes"));
    }

    #[test]
    fn run_keeps_progress_on_cancel() {
        let mut session = Session::start(questionnaire("qn"), FeedbackHeader::default());
        let backend = ScriptedBackend::new()
            .with_text("q-name", "Alice")
            .with_cancel("q-smoke");

        let err = session.run(&backend).unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(session.feedback().len(), 1);
    }

    #[test]
    fn reload_replaces_questionnaire() {
        let mut session = Session::start(questionnaire("old"), FeedbackHeader::default());
        let node = StaticNode::new(questionnaire("new"));

        session.reload_from(&node, &NodeConfig::default()).unwrap();
        assert_eq!(session.questionnaire().uri, "new");
    }

    #[test]
    fn failed_connect_leaves_session() {
        let mut session = Session::start(questionnaire("old"), FeedbackHeader::default());
        let before = session.clone();
        let node = StaticNode::new(questionnaire("new")).refusing();

        let err = session.reload_from(&node, &NodeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SmartCareError::NodeUnavailable { port: 10010, .. }
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn empty_node_is_reported() {
        let mut session = Session::start(questionnaire("old"), FeedbackHeader::default());
        let node = StaticNode::empty();

        let err = session.reload_from(&node, &NodeConfig::default()).unwrap_err();
        assert!(matches!(err, SmartCareError::NoQuestionnaire));
        assert_eq!(session.questionnaire().uri, "old");
    }

    #[test]
    fn publish_sends_feedback() {
        let mut session = Session::start(questionnaire("qn"), FeedbackHeader::default());
        let mut widget = session.widget("q-name").unwrap();
        widget.set_text("Alice");
        session.commit(&widget).unwrap();

        let node = StaticNode::new(questionnaire("qn"));
        session.publish(&node, &NodeConfig::default()).unwrap();

        let published = node.published();
        assert_eq!(published.len(), 1);
        assert_eq!(&published[0], session.feedback());
    }

    #[test]
    fn into_feedback_hands_over_answers() {
        let mut session = Session::start(questionnaire("qn"), FeedbackHeader::default());
        let mut widget = session.widget("q-smoke").unwrap();
        widget.select(0);
        session.commit(&widget).unwrap();

        let feedback = session.into_feedback();
        assert_eq!(feedback.len(), 1);
        assert!(feedback.response("q-smoke").unwrap().links("yes"));
    }
}
