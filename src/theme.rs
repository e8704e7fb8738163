//! Theme module for peer-review-tui
//!
//! This module provides a centralized color palette and styling constants
//! for the form.

use ratatui::style::Color;
use ratatui::symbols::border;

use crate::models::GenerationState;

// ============================================================================
// Background Colors
// ============================================================================

/// Primary background color (#0a0e14)
pub const BG_PRIMARY: Color = Color::Rgb(10, 14, 20);

/// Secondary background color for cards (#12161c)
pub const BG_SECONDARY: Color = Color::Rgb(18, 22, 28);

/// Tertiary background color for the focused card (#1a1f26)
pub const BG_TERTIARY: Color = Color::Rgb(26, 31, 38);

/// Subtle border color (#1e2530)
pub const BORDER_SUBTLE: Color = Color::Rgb(30, 37, 48);

// ============================================================================
// Accent Colors
// ============================================================================

/// Primary blue accent color (#3b82f6)
pub const ACCENT_PRIMARY: Color = Color::Rgb(59, 130, 246);

/// Dimmed accent for secondary elements (#1e40af)
pub const ACCENT_DIM: Color = Color::Rgb(30, 64, 175);

// ============================================================================
// Status Colors
// ============================================================================

/// Green success color (#4ade80)
pub const GREEN_SUCCESS: Color = Color::Rgb(74, 222, 128);

/// Amber warning color (#fbbf24)
pub const AMBER_WARNING: Color = Color::Rgb(251, 191, 36);

/// Red error color (#f87171)
pub const RED_ERROR: Color = Color::Rgb(248, 113, 113);

// ============================================================================
// Text Colors
// ============================================================================

/// Primary text color (#e2e8f0)
pub const TEXT_PRIMARY: Color = Color::Rgb(226, 232, 240);

/// Secondary text color (#94a3b8)
pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);

/// Muted text color for labels and hints (#64748b)
pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);

// ============================================================================
// Shapes and animation
// ============================================================================

pub const ROUNDED_BORDERS: border::Set = border::ROUNDED;

/// Frames for the "Processing..." spinner
pub const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}

/// Alternate between two colors every few ticks
pub fn get_pulse_color(tick: u64, bright: Color, dim: Color) -> Color {
    if (tick / 4) % 2 == 0 { bright } else { dim }
}

/// Indicator color for a section's generation state
pub fn state_color(state: GenerationState, tick: u64) -> Color {
    match state {
        GenerationState::Idle => TEXT_MUTED,
        GenerationState::Loading => get_pulse_color(tick, AMBER_WARNING, ACCENT_DIM),
        GenerationState::Success => GREEN_SUCCESS,
        GenerationState::Error => RED_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_frame_wraps() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len() as u64));
    }

    #[test]
    fn test_pulse_color_alternates() {
        assert_eq!(get_pulse_color(0, GREEN_SUCCESS, RED_ERROR), GREEN_SUCCESS);
        assert_eq!(get_pulse_color(4, GREEN_SUCCESS, RED_ERROR), RED_ERROR);
    }
}
