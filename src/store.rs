//! Immutable form snapshot and its transition functions.
//!
//! Every operation borrows the current [`FormSnapshot`] and returns a new one,
//! leaving the original untouched. Sections are shared through `Arc`, so an
//! edit rebuilds only the targeted entry and every sibling stays
//! pointer-identical across snapshots.

use std::sync::Arc;

use crate::error::{StoreError, ValidationError};
use crate::models::{
    FeedbackSection, Gender, GenerationState, ReviewSubject, SectionField, SectionId,
    SubjectField, DEFAULT_QUESTIONS,
};

/// State transition produced by the generation workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// A request was accepted and is in flight
    Started,
    /// The collaborator returned text, applied verbatim
    Succeeded(String),
    /// The collaborator failed; the previous refined text is kept
    Failed(String),
    /// The outcome was discarded; return to the state held before the request
    Restored(GenerationState),
}

/// Complete state of subject, topics and sections at one instant
#[derive(Debug, Clone)]
pub struct FormSnapshot {
    subject: ReviewSubject,
    topics: Vec<String>,
    sections: Vec<Arc<FeedbackSection>>,
    next_id: u64,
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSnapshot {
    /// Fresh form seeded with the default questions
    pub fn new() -> Self {
        Self::with_questions(&DEFAULT_QUESTIONS)
    }

    /// Form seeded with the given questions (at least one section is always created)
    pub fn with_questions(questions: &[&str]) -> Self {
        let mut snapshot = Self {
            subject: ReviewSubject::default(),
            topics: Vec::new(),
            sections: Vec::with_capacity(questions.len().max(1)),
            next_id: 0,
        };
        if questions.is_empty() {
            snapshot.push_section("");
        }
        for question in questions {
            snapshot.push_section(question);
        }
        snapshot
    }

    fn push_section(&mut self, question: &str) {
        let id = SectionId(self.next_id);
        self.next_id += 1;
        self.sections.push(Arc::new(FeedbackSection::new(id, question)));
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub fn subject(&self) -> &ReviewSubject {
        &self.subject
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn sections(&self) -> &[Arc<FeedbackSection>] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&FeedbackSection> {
        self.sections.iter().find(|s| s.id == id).map(Arc::as_ref)
    }

    /// Display position of a section
    pub fn position_of(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Identifier of the section shown at `index`
    pub fn section_id_at(&self, index: usize) -> Result<SectionId, StoreError> {
        self.sections
            .get(index)
            .map(|s| s.id)
            .ok_or(StoreError::SectionIndexOutOfRange {
                index,
                len: self.sections.len(),
            })
    }

    /// Number of sections with a request in flight
    pub fn loading_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| s.generation_state.is_loading())
            .count()
    }

    // ── Subject ──────────────────────────────────────────────────────────

    pub fn update_subject_field(&self, field: SubjectField, value: &str) -> FormSnapshot {
        let mut next = self.clone();
        *next.subject.field_mut(field) = value.to_string();
        next
    }

    pub fn set_gender(&self, gender: Gender) -> FormSnapshot {
        let mut next = self.clone();
        next.subject.gender = gender;
        next
    }

    // ── Topics ───────────────────────────────────────────────────────────

    /// Append a topic; surrounding whitespace is trimmed and duplicates are kept
    pub fn add_topic(&self, value: &str) -> Result<FormSnapshot, StoreError> {
        let topic = value.trim();
        if topic.is_empty() {
            return Err(ValidationError::BlankTopic.into());
        }
        let mut next = self.clone();
        next.topics.push(topic.to_string());
        Ok(next)
    }

    pub fn remove_topic(&self, index: usize) -> Result<FormSnapshot, StoreError> {
        if index >= self.topics.len() {
            return Err(StoreError::TopicIndexOutOfRange {
                index,
                len: self.topics.len(),
            });
        }
        let mut next = self.clone();
        next.topics.remove(index);
        Ok(next)
    }

    // ── Sections ─────────────────────────────────────────────────────────

    /// Append an empty `Idle` section, returning the new snapshot and its id
    pub fn add_section(&self) -> (FormSnapshot, SectionId) {
        let mut next = self.clone();
        next.push_section("");
        let id = SectionId(self.next_id);
        (next, id)
    }

    pub fn remove_section(&self, id: SectionId) -> Result<FormSnapshot, StoreError> {
        let position = self.position_of(id).ok_or(StoreError::UnknownSection(id))?;
        if self.sections.len() == 1 {
            return Err(StoreError::LastSection);
        }
        let mut next = self.clone();
        next.sections.remove(position);
        debug_assert!(!next.sections.is_empty());
        Ok(next)
    }

    /// Replace one field of one section; siblings are shared, not copied
    pub fn update_section_field(
        &self,
        id: SectionId,
        field: SectionField,
    ) -> Result<FormSnapshot, StoreError> {
        self.map_section(id, |section| match field {
            SectionField::Question(question) => section.question = question,
            SectionField::InitialFeedback(text) => section.initial_feedback = text,
            SectionField::Tone(tone) => section.tone = tone,
        })
    }

    /// Write a generation transition back into a section.
    ///
    /// Only the generation workflow calls this. An id that no longer exists is
    /// reported as `UnknownSection`; callers treat that as a no-op.
    pub(crate) fn apply_generation_result(
        &self,
        id: SectionId,
        result: GenerationResult,
    ) -> Result<FormSnapshot, StoreError> {
        self.map_section(id, |section| match result {
            GenerationResult::Started => {
                debug_assert!(!section.generation_state.is_loading());
                section.generation_state = GenerationState::Loading;
            }
            GenerationResult::Succeeded(text) => {
                section.refined_feedback = Some(text);
                section.last_error = None;
                section.generation_state = GenerationState::Success;
            }
            GenerationResult::Failed(message) => {
                section.last_error = Some(message);
                section.generation_state = GenerationState::Error;
            }
            GenerationResult::Restored(state) => {
                section.generation_state = state;
            }
        })
    }

    fn map_section<F>(&self, id: SectionId, apply: F) -> Result<FormSnapshot, StoreError>
    where
        F: FnOnce(&mut FeedbackSection),
    {
        let position = self.position_of(id).ok_or(StoreError::UnknownSection(id))?;
        let mut updated = FeedbackSection::clone(&self.sections[position]);
        apply(&mut updated);

        let mut next = self.clone();
        next.sections[position] = Arc::new(updated);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToneScale;

    fn ids(snapshot: &FormSnapshot) -> Vec<SectionId> {
        snapshot.sections().iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_new_seeds_default_questions() {
        let snapshot = FormSnapshot::new();
        assert_eq!(snapshot.sections().len(), 3);
        for (section, question) in snapshot.sections().iter().zip(DEFAULT_QUESTIONS) {
            assert_eq!(section.question, question);
            assert!(section.initial_feedback.is_empty());
            assert_eq!(section.tone, None);
            assert_eq!(section.refined_feedback, None);
            assert_eq!(section.generation_state, GenerationState::Idle);
        }
        assert!(snapshot.topics().is_empty());
    }

    #[test]
    fn test_with_no_questions_still_has_one_section() {
        let snapshot = FormSnapshot::with_questions(&[]);
        assert_eq!(snapshot.sections().len(), 1);
    }

    #[test]
    fn test_update_subject_field_leaves_original() {
        let before = FormSnapshot::new();
        let after = before.update_subject_field(SubjectField::Name, "Dana");
        assert_eq!(after.subject().name, "Dana");
        assert_eq!(before.subject().name, "");
        let after = after.set_gender(Gender::Other);
        assert_eq!(after.subject().gender, Gender::Other);
    }

    #[test]
    fn test_remove_topic_middle() {
        let snapshot = FormSnapshot::new()
            .add_topic("a")
            .and_then(|s| s.add_topic("b"))
            .and_then(|s| s.add_topic("c"))
            .unwrap();
        let removed = snapshot.remove_topic(1).unwrap();
        assert_eq!(removed.topics(), ["a", "c"]);
    }

    #[test]
    fn test_remove_only_topic_leaves_empty() {
        let snapshot = FormSnapshot::new().add_topic("solo").unwrap();
        let removed = snapshot.remove_topic(0).unwrap();
        assert!(removed.topics().is_empty());
    }

    #[test]
    fn test_remove_topic_out_of_range() {
        let snapshot = FormSnapshot::new().add_topic("a").unwrap();
        assert_eq!(
            snapshot.remove_topic(1).unwrap_err(),
            StoreError::TopicIndexOutOfRange { index: 1, len: 1 }
        );
    }

    #[test]
    fn test_add_topic_trims_and_keeps_duplicates() {
        let snapshot = FormSnapshot::new()
            .add_topic("  Leadership ")
            .and_then(|s| s.add_topic("Leadership"))
            .unwrap();
        assert_eq!(snapshot.topics(), ["Leadership", "Leadership"]);
    }

    #[test]
    fn test_add_blank_topic_rejected() {
        let err = FormSnapshot::new().add_topic("   ").unwrap_err();
        assert_eq!(err, StoreError::Validation(ValidationError::BlankTopic));
    }

    #[test]
    fn test_add_section_appends_idle() {
        let (snapshot, id) = FormSnapshot::new().add_section();
        assert_eq!(snapshot.sections().len(), 4);
        let added = snapshot.section(id).unwrap();
        assert_eq!(snapshot.position_of(id), Some(3));
        assert!(added.question.is_empty());
        assert!(added.initial_feedback.is_empty());
        assert_eq!(added.tone, None);
        assert_eq!(added.generation_state, GenerationState::Idle);
    }

    #[test]
    fn test_section_ids_are_not_reused() {
        let snapshot = FormSnapshot::new();
        let last = snapshot.section_id_at(2).unwrap();
        let snapshot = snapshot.remove_section(last).unwrap();
        let (_, id) = snapshot.add_section();
        assert_ne!(id, last);
    }

    #[test]
    fn test_remove_last_section_rejected() {
        let snapshot = FormSnapshot::with_questions(&["only"]);
        let id = snapshot.section_id_at(0).unwrap();
        assert_eq!(snapshot.remove_section(id).unwrap_err(), StoreError::LastSection);
        assert_eq!(snapshot.sections().len(), 1);
        assert_eq!(snapshot.sections()[0].question, "only");
    }

    #[test]
    fn test_remove_first_of_two() {
        let snapshot = FormSnapshot::with_questions(&["first", "second"]);
        let first = snapshot.section_id_at(0).unwrap();
        let second_before = Arc::clone(&snapshot.sections()[1]);

        let after = snapshot.remove_section(first).unwrap();
        assert_eq!(after.sections().len(), 1);
        assert_eq!(*after.sections()[0], *second_before);
        assert!(Arc::ptr_eq(&after.sections()[0], &second_before));
    }

    #[test]
    fn test_remove_unknown_section() {
        let snapshot = FormSnapshot::new();
        let stale = snapshot.section_id_at(0).unwrap();
        let snapshot = snapshot.remove_section(stale).unwrap();
        assert_eq!(
            snapshot.remove_section(stale).unwrap_err(),
            StoreError::UnknownSection(stale)
        );
    }

    #[test]
    fn test_section_id_at_out_of_range() {
        let snapshot = FormSnapshot::new();
        assert_eq!(
            snapshot.section_id_at(3).unwrap_err(),
            StoreError::SectionIndexOutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn test_update_section_field_shares_siblings() {
        let before = FormSnapshot::new();
        let target = before.section_id_at(1).unwrap();
        let after = before
            .update_section_field(target, SectionField::InitialFeedback("great work".into()))
            .unwrap();

        assert_eq!(after.section(target).unwrap().initial_feedback, "great work");
        assert!(before.section(target).unwrap().initial_feedback.is_empty());
        assert!(Arc::ptr_eq(&before.sections()[0], &after.sections()[0]));
        assert!(Arc::ptr_eq(&before.sections()[2], &after.sections()[2]));
        assert!(!Arc::ptr_eq(&before.sections()[1], &after.sections()[1]));
        assert_eq!(ids(&before), ids(&after));
    }

    #[test]
    fn test_update_tone_and_question() {
        let snapshot = FormSnapshot::new();
        let id = snapshot.section_id_at(0).unwrap();
        let snapshot = snapshot
            .update_section_field(id, SectionField::Tone(Some(ToneScale::Negative)))
            .and_then(|s| s.update_section_field(id, SectionField::Question("Why?".into())))
            .unwrap();
        let section = snapshot.section(id).unwrap();
        assert_eq!(section.tone, Some(ToneScale::Negative));
        assert_eq!(section.question, "Why?");
    }

    #[test]
    fn test_edit_after_success_keeps_refined() {
        let snapshot = FormSnapshot::new();
        let id = snapshot.section_id_at(0).unwrap();
        let snapshot = snapshot
            .apply_generation_result(id, GenerationResult::Started)
            .and_then(|s| s.apply_generation_result(id, GenerationResult::Succeeded("done".into())))
            .and_then(|s| s.update_section_field(id, SectionField::InitialFeedback("new".into())))
            .unwrap();
        let section = snapshot.section(id).unwrap();
        assert_eq!(section.refined_feedback.as_deref(), Some("done"));
        assert_eq!(section.generation_state, GenerationState::Success);
    }

    #[test]
    fn test_failed_generation_keeps_previous_refined() {
        let snapshot = FormSnapshot::new();
        let id = snapshot.section_id_at(0).unwrap();
        let snapshot = snapshot
            .apply_generation_result(id, GenerationResult::Started)
            .and_then(|s| s.apply_generation_result(id, GenerationResult::Succeeded("previous".into())))
            .and_then(|s| s.apply_generation_result(id, GenerationResult::Started))
            .and_then(|s| s.apply_generation_result(id, GenerationResult::Failed("boom".into())))
            .unwrap();
        let section = snapshot.section(id).unwrap();
        assert_eq!(section.generation_state, GenerationState::Error);
        assert_eq!(section.refined_feedback.as_deref(), Some("previous"));
        assert_eq!(section.last_error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_apply_to_removed_section_reports_unknown() {
        let snapshot = FormSnapshot::new();
        let id = snapshot.section_id_at(0).unwrap();
        let snapshot = snapshot.remove_section(id).unwrap();
        assert_eq!(
            snapshot
                .apply_generation_result(id, GenerationResult::Succeeded("late".into()))
                .unwrap_err(),
            StoreError::UnknownSection(id)
        );
        assert_eq!(snapshot.sections().len(), 2);
    }
}
