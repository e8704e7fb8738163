//! Final review assembly and hand-off.

use serde::Serialize;

use crate::error::SubmitError;
use crate::models::{ReviewSubject, ToneScale};
use crate::prompt::resolve_question;
use crate::store::FormSnapshot;

/// One question as it appears in the submitted review
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedSection {
    pub question: String,
    pub initial_feedback: String,
    pub tone: Option<ToneScale>,
    pub refined_feedback: Option<String>,
}

/// Everything the form collected, in a shape ready for downstream storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub subject: ReviewSubject,
    pub topics: Vec<String>,
    pub feedback_sections: Vec<SubmittedSection>,
    /// Refined answers joined into one review, if any exist
    pub review: Option<String>,
}

impl Submission {
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        let name = &snapshot.subject().name;
        Self {
            subject: snapshot.subject().clone(),
            topics: snapshot.topics().to_vec(),
            feedback_sections: snapshot
                .sections()
                .iter()
                .map(|s| SubmittedSection {
                    question: resolve_question(&s.question, name),
                    initial_feedback: s.initial_feedback.clone(),
                    tone: s.tone,
                    refined_feedback: s.refined_feedback.clone(),
                })
                .collect(),
            review: compose_review(snapshot),
        }
    }
}

/// Join every refined answer, each under its question, separated by blank lines
pub fn compose_review(snapshot: &FormSnapshot) -> Option<String> {
    let name = &snapshot.subject().name;
    let parts: Vec<String> = snapshot
        .sections()
        .iter()
        .filter_map(|s| {
            let refined = s.refined_feedback.as_deref()?;
            let question = resolve_question(&s.question, name);
            Some(if question.trim().is_empty() {
                refined.trim().to_string()
            } else {
                format!("{}\n{}", question.trim(), refined.trim())
            })
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

/// Downstream receiver of a completed review
pub trait ReviewSink: Send {
    fn deliver(&mut self, submission: &Submission) -> Result<(), SubmitError>;
}

/// Sink that records submissions in the log
#[derive(Debug, Default)]
pub struct LogSink {
    pub delivered: usize,
}

impl ReviewSink for LogSink {
    fn deliver(&mut self, submission: &Submission) -> Result<(), SubmitError> {
        let json = serde_json::to_string(submission).map_err(|e| SubmitError::Sink(e.to_string()))?;
        self.delivered += 1;
        tracing::info!(
            subject = %submission.subject.name,
            sections = submission.feedback_sections.len(),
            bytes = json.len(),
            "review submitted"
        );
        tracing::debug!(payload = %json, "submission payload");
        Ok(())
    }
}
