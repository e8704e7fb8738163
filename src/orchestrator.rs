//! Per-section regeneration workflow.
//!
//! `regenerate` checks the guard, moves the section to `Loading` and spawns
//! one task bound to the section's id. The task's only await point is the
//! collaborator call; its result comes back as a [`GenerationOutcome`] over a
//! single channel, and whoever owns the snapshot folds it in with
//! [`GenerationOrchestrator::apply_outcome`]. Any number of sections can be in
//! flight at once, but never the same section twice.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;

use serde::Deserialize;
use tokio::sync::mpsc;

use crate::error::{RegenerateRejected, StoreError, ValidationError};
use crate::llm::TextGenerator;
use crate::models::{FeedbackSection, GenerationState, SectionId};
use crate::prompt::build_prompt;
use crate::store::{FormSnapshot, GenerationResult};
use crate::utils::{word_count, WORD_LIMIT};

/// Failure recorded when the collaborator panics instead of returning
pub const PANICKED: &str = "generation task panicked";

/// What to do with a result whose section was edited while it was in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleResultPolicy {
    /// Apply it anyway
    #[default]
    Apply,
    /// Drop it and put the section back in the state it had before the request
    Discard,
}

/// A finished request, addressed by section id
#[derive(Debug)]
pub struct GenerationOutcome {
    pub id: SectionId,
    /// Initial feedback the prompt was built from
    source_feedback: String,
    prior_state: GenerationState,
    result: Result<String, String>,
}

/// Check whether a section may start a new generation
pub fn regenerate_guard(section: &FeedbackSection) -> Result<(), RegenerateRejected> {
    if section.generation_state.is_loading() {
        return Err(RegenerateRejected::AlreadyLoading);
    }
    if section.initial_feedback.trim().is_empty() {
        return Err(ValidationError::EmptyFeedback.into());
    }
    let count = word_count(&section.initial_feedback);
    if count > WORD_LIMIT {
        return Err(ValidationError::OverWordLimit {
            count,
            limit: WORD_LIMIT,
        }
        .into());
    }
    Ok(())
}

pub struct GenerationOrchestrator {
    generator: Arc<dyn TextGenerator>,
    outcomes: mpsc::UnboundedSender<GenerationOutcome>,
    stale_policy: StaleResultPolicy,
}

impl GenerationOrchestrator {
    /// Create an orchestrator and the receiving end of its outcome channel
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        stale_policy: StaleResultPolicy,
    ) -> (Self, mpsc::UnboundedReceiver<GenerationOutcome>) {
        let (outcomes, rx) = mpsc::unbounded_channel();
        (
            Self {
                generator,
                outcomes,
                stale_policy,
            },
            rx,
        )
    }

    /// Start a generation for `id`.
    ///
    /// On success the returned snapshot has the section in `Loading` and a
    /// task has been spawned; on rejection nothing changes. Must be called
    /// from within a tokio runtime.
    pub fn regenerate(
        &self,
        snapshot: &FormSnapshot,
        id: SectionId,
    ) -> Result<FormSnapshot, RegenerateRejected> {
        let section = snapshot
            .section(id)
            .ok_or(StoreError::UnknownSection(id))?;
        if let Err(reason) = regenerate_guard(section) {
            tracing::debug!(section = %id, %reason, "regenerate rejected");
            return Err(reason);
        }

        let prompt = build_prompt(snapshot.subject(), snapshot.topics(), section);
        let source_feedback = section.initial_feedback.clone();
        let prior_state = section.generation_state;
        let next = snapshot.apply_generation_result(id, GenerationResult::Started)?;

        tracing::info!(
            section = %id,
            words = word_count(&source_feedback),
            "generation started"
        );

        let generator = Arc::clone(&self.generator);
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let result = match AssertUnwindSafe(generator.generate(&prompt)).catch_unwind().await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(_) => {
                    tracing::error!(section = %id, "generator panicked");
                    Err(PANICKED.to_string())
                }
            };
            let outcome = GenerationOutcome {
                id,
                source_feedback,
                prior_state,
                result,
            };
            if outcomes.send(outcome).is_err() {
                tracing::debug!(section = %id, "outcome dropped, form closed");
            }
        });

        Ok(next)
    }

    /// Fold a finished request into the snapshot.
    ///
    /// Returns `None` when the section was removed while the request was in
    /// flight; the result is dropped and the snapshot is unchanged.
    pub fn apply_outcome(
        &self,
        snapshot: &FormSnapshot,
        outcome: GenerationOutcome,
    ) -> Option<FormSnapshot> {
        let GenerationOutcome {
            id,
            source_feedback,
            prior_state,
            result,
        } = outcome;

        let Some(section) = snapshot.section(id) else {
            tracing::debug!(section = %id, "ignoring result for removed section");
            return None;
        };

        let stale = section.initial_feedback != source_feedback;
        let transition = match result {
            _ if stale && self.stale_policy == StaleResultPolicy::Discard => {
                if let Err(message) = &result {
                    tracing::warn!(section = %id, error = %message, "generation failed");
                }
                tracing::info!(section = %id, "discarding result built from edited feedback");
                GenerationResult::Restored(prior_state)
            }
            Ok(text) => {
                tracing::info!(section = %id, stale, chars = text.len(), "generation succeeded");
                GenerationResult::Succeeded(text)
            }
            Err(message) => {
                tracing::warn!(section = %id, error = %message, "generation failed");
                GenerationResult::Failed(message)
            }
        };

        snapshot.apply_generation_result(id, transition).ok()
    }
}
