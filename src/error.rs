use std::path::PathBuf;

use thiserror::Error;

use crate::models::SectionId;

// ─── Store preconditions ─────────────────────────────────────────────────────

/// Rejected snapshot operations. None of these are fatal; the previous
/// snapshot stays valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("cannot remove the last remaining question")]
    LastSection,

    #[error("topic index {index} out of range ({len} topics)")]
    TopicIndexOutOfRange { index: usize, len: usize },

    #[error("section position {index} out of range ({len} sections)")]
    SectionIndexOutOfRange { index: usize, len: usize },

    #[error("unknown section {0}")]
    UnknownSection(SectionId),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// ─── Input validation ────────────────────────────────────────────────────────

/// Inline validation failures shown next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("feedback is empty")]
    EmptyFeedback,

    #[error("feedback has {count} words, limit is {limit}")]
    OverWordLimit { count: usize, limit: usize },

    #[error("topic is blank")]
    BlankTopic,
}

// ─── Regeneration guard ──────────────────────────────────────────────────────

/// Why a `regenerate` call was refused without changing any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegenerateRejected {
    #[error("a generation is already in flight for this question")]
    AlreadyLoading,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Precondition(#[from] StoreError),
}

// ─── Submission ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("failed to deliver review: {0}")]
    Sink(String),
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
