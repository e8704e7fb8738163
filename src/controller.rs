//! Top-level form state.
//!
//! `FormController` owns the current snapshot, the orchestrator and the
//! receiving end of the outcome channel. Every change, whether an edit or a
//! finished generation, goes through here and replaces the snapshot, so
//! readers always see one consistent state.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::{RegenerateRejected, StoreError, SubmitError};
use crate::llm::TextGenerator;
use crate::models::{Gender, SectionField, SectionId, SubjectField};
use crate::orchestrator::{GenerationOrchestrator, GenerationOutcome, StaleResultPolicy};
use crate::review::{ReviewSink, Submission};
use crate::store::FormSnapshot;

pub struct FormController {
    snapshot: FormSnapshot,
    orchestrator: GenerationOrchestrator,
    outcomes: mpsc::UnboundedReceiver<GenerationOutcome>,
    /// Requests spawned but not yet received back
    in_flight: usize,
    sink: Box<dyn ReviewSink>,
}

impl FormController {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        stale_policy: StaleResultPolicy,
        sink: Box<dyn ReviewSink>,
    ) -> Self {
        Self::with_snapshot(FormSnapshot::new(), generator, stale_policy, sink)
    }

    pub fn with_snapshot(
        snapshot: FormSnapshot,
        generator: Arc<dyn TextGenerator>,
        stale_policy: StaleResultPolicy,
        sink: Box<dyn ReviewSink>,
    ) -> Self {
        let (orchestrator, outcomes) = GenerationOrchestrator::new(generator, stale_policy);
        Self {
            snapshot,
            orchestrator,
            outcomes,
            in_flight: 0,
            sink,
        }
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // ── Edits ────────────────────────────────────────────────────────────

    pub fn update_subject_field(&mut self, field: SubjectField, value: &str) {
        self.snapshot = self.snapshot.update_subject_field(field, value);
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.snapshot = self.snapshot.set_gender(gender);
    }

    pub fn add_topic(&mut self, value: &str) -> Result<(), StoreError> {
        self.snapshot = self.snapshot.add_topic(value)?;
        Ok(())
    }

    pub fn remove_topic(&mut self, index: usize) -> Result<(), StoreError> {
        self.snapshot = self.snapshot.remove_topic(index)?;
        Ok(())
    }

    pub fn add_section(&mut self) -> SectionId {
        let (next, id) = self.snapshot.add_section();
        self.snapshot = next;
        id
    }

    pub fn remove_section(&mut self, id: SectionId) -> Result<(), StoreError> {
        self.snapshot = self.snapshot.remove_section(id)?;
        Ok(())
    }

    pub fn update_section_field(
        &mut self,
        id: SectionId,
        field: SectionField,
    ) -> Result<(), StoreError> {
        self.snapshot = self.snapshot.update_section_field(id, field)?;
        Ok(())
    }

    // ── Generation ───────────────────────────────────────────────────────

    /// Start regenerating one section. Rejections leave everything unchanged.
    pub fn regenerate(&mut self, id: SectionId) -> Result<(), RegenerateRejected> {
        self.snapshot = self.orchestrator.regenerate(&self.snapshot, id)?;
        self.in_flight += 1;
        Ok(())
    }

    fn apply(&mut self, outcome: GenerationOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Some(next) = self.orchestrator.apply_outcome(&self.snapshot, outcome) {
            self.snapshot = next;
        }
    }

    /// Apply every outcome that has already arrived, without waiting
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcomes.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Wait for the next outcome and apply it.
    ///
    /// Returns `false` immediately when nothing is in flight.
    pub async fn next_outcome(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.outcomes.recv().await {
            Some(outcome) => {
                self.apply(outcome);
                true
            }
            None => false,
        }
    }

    // ── Submission ───────────────────────────────────────────────────────

    /// Validate the subject and hand the review to the sink
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        let subject = self.snapshot.subject();
        for field in [SubjectField::Name, SubjectField::Position, SubjectField::Relationship] {
            if subject.field(field).trim().is_empty() {
                return Err(SubmitError::MissingField(field.label()));
            }
        }
        if !subject.gender.is_set() {
            return Err(SubmitError::MissingField("Gender"));
        }

        let submission = Submission::from_snapshot(&self.snapshot);
        self.sink.deliver(&submission)?;
        Ok(submission)
    }
}
