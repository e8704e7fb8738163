//! Feedback section data structures
//!
//! A section is one question of the review together with the reviewer's
//! initial notes, the tone they were written in, and the generated rewrite.

use std::fmt;

use super::enums::{GenerationState, ToneScale};

/// Questions every new form starts with
pub const DEFAULT_QUESTIONS: [&str; 3] = [
    "Describe examples of the topic selected. What was the context? What actions did they take?",
    "In your opinion, what impact did {name}'s actions have?",
    "What recommendation do you have for {name}'s growth and development? Your feedback can be about any area of their work.",
];

/// Placeholder token replaced with the subject's name
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Stable identifier assigned to a section when it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(pub(crate) u64);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section-{}", self.0)
    }
}

/// One question of the review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSection {
    pub id: SectionId,
    /// May contain the `{name}` placeholder
    pub question: String,
    pub initial_feedback: String,
    pub tone: Option<ToneScale>,
    /// `None` until a generation has succeeded at least once
    pub refined_feedback: Option<String>,
    pub generation_state: GenerationState,
    /// Message from the most recent failed generation, cleared on success
    pub last_error: Option<String>,
}

impl FeedbackSection {
    pub(crate) fn new(id: SectionId, question: &str) -> Self {
        Self {
            id,
            question: question.to_string(),
            initial_feedback: String::new(),
            tone: None,
            refined_feedback: None,
            generation_state: GenerationState::Idle,
            last_error: None,
        }
    }
}

/// Editable section fields and their new values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionField {
    Question(String),
    InitialFeedback(String),
    Tone(Option<ToneScale>),
}
