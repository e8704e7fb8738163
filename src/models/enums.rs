//! Enums used throughout the review form
//!
//! This module contains the fixed vocabularies of the form (gender, tone)
//! and the state enums used for generation tracking and UI input handling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gender of the person being reviewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Unset,
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Unset => "Unspecified",
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn is_set(&self) -> bool {
        *self != Gender::Unset
    }

    /// Cycle forward through the choices, wrapping through `Unset`
    pub fn next(&self) -> Self {
        match self {
            Gender::Unset => Gender::Male,
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Other,
            Gender::Other => Gender::Unset,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Gender::Unset => Gender::Other,
            Gender::Male => Gender::Unset,
            Gender::Female => Gender::Male,
            Gender::Other => Gender::Female,
        }
    }
}

/// Five-point tone scale the initial feedback is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToneScale {
    #[serde(rename = "Extremely Negative")]
    ExtremelyNegative = 1,
    #[serde(rename = "Negative")]
    Negative = 2,
    #[serde(rename = "Neutral")]
    Neutral = 3,
    #[serde(rename = "Positive")]
    Positive = 4,
    #[serde(rename = "Extremely Positive")]
    ExtremelyPositive = 5,
}

impl ToneScale {
    /// All tones in ordinal order
    pub const ALL: [ToneScale; 5] = [
        ToneScale::ExtremelyNegative,
        ToneScale::Negative,
        ToneScale::Neutral,
        ToneScale::Positive,
        ToneScale::ExtremelyPositive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToneScale::ExtremelyNegative => "Extremely Negative",
            ToneScale::Negative => "Negative",
            ToneScale::Neutral => "Neutral",
            ToneScale::Positive => "Positive",
            ToneScale::ExtremelyPositive => "Extremely Positive",
        }
    }

    /// Ordinal on the 1-5 scale
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal).checked_sub(1)?).copied()
    }

    /// Step the tone selector forward; unset starts at the negative end
    pub fn step_up(tone: Option<ToneScale>) -> Option<ToneScale> {
        match tone {
            None => Some(ToneScale::ExtremelyNegative),
            Some(ToneScale::ExtremelyPositive) => None,
            Some(t) => ToneScale::from_ordinal(t.ordinal() + 1),
        }
    }

    pub fn step_down(tone: Option<ToneScale>) -> Option<ToneScale> {
        match tone {
            None => Some(ToneScale::ExtremelyPositive),
            Some(ToneScale::ExtremelyNegative) => None,
            Some(t) => ToneScale::from_ordinal(t.ordinal() - 1),
        }
    }
}

impl fmt::Display for ToneScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-section generation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl GenerationState {
    pub fn is_loading(&self) -> bool {
        *self == GenerationState::Loading
    }
}

/// Input mode for the terminal form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Navigate, // Keys move focus and trigger actions
    Editing,  // Keys go to the text buffer of the focused field
}
