//! Data models for the review form
//!
//! This module contains the core data structures:
//! - The review subject and its editable fields
//! - Feedback sections with stable identifiers
//! - Enums for tone, gender and generation state

pub mod enums;
pub mod section;
pub mod subject;

// Re-exports for convenient access
pub use enums::{Gender, GenerationState, Mode, ToneScale};
pub use section::{FeedbackSection, SectionField, SectionId, DEFAULT_QUESTIONS, NAME_PLACEHOLDER};
pub use subject::{ReviewSubject, SubjectField};
