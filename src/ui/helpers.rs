//! UI helper functions

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding},
};

use crate::theme::{
    ACCENT_PRIMARY, BG_SECONDARY, BG_TERTIARY, BORDER_SUBTLE, ROUNDED_BORDERS, TEXT_MUTED,
    TEXT_PRIMARY, TEXT_SECONDARY,
};

/// Shown after the text of the field being edited
pub const CURSOR: &str = "▏";

/// Simple text wrapping helper
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.chars().count() + 1 + word.chars().count() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Wrap each line of multi-line text separately, keeping blank lines
pub fn wrap_multiline(text: &str, max_width: usize) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| wrap_text(line, max_width))
        .collect()
}

/// Rounded card block, highlighted when it holds focus
pub fn card_block(title: &str, focused: bool) -> Block<'static> {
    let border_color = if focused { ACCENT_PRIMARY } else { BORDER_SUBTLE };
    let bg_color = if focused { BG_TERTIARY } else { BG_SECONDARY };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(bg_color))
        .padding(Padding::horizontal(1))
}

/// Columns available for text inside a [`card_block`]
pub fn inner_width(area: Rect) -> usize {
    area.width.saturating_sub(4) as usize
}

/// Field label with a focus marker, padded to `width`
pub fn label_span(label: &str, width: usize, focused: bool) -> Span<'static> {
    let marker = if focused { "› " } else { "  " };
    let style = if focused {
        Style::default().fg(ACCENT_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_SECONDARY)
    };
    Span::styled(format!("{}{:<width$}", marker, label, width = width), style)
}

/// Text value, or a muted placeholder when empty and not being edited
pub fn value_spans(value: &str, placeholder: &str, editing: bool) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if value.is_empty() && !editing {
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default().fg(TEXT_MUTED).add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::styled(value.to_string(), Style::default().fg(TEXT_PRIMARY)));
    }
    if editing {
        spans.push(Span::styled(CURSOR, Style::default().fg(ACCENT_PRIMARY)));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_empty() {
        let result = wrap_text("", 10);
        assert_eq!(result, vec![""]);
    }

    #[test]
    fn test_wrap_text_zero_width() {
        let result = wrap_text("hello world", 0);
        assert_eq!(result, vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_fits_on_one_line() {
        let result = wrap_text("hello world", 20);
        assert_eq!(result, vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_multiple_lines() {
        let result = wrap_text("hello world foo bar", 10);
        assert_eq!(result, vec!["hello", "world foo", "bar"]);
    }

    #[test]
    fn test_wrap_text_counts_chars_not_bytes() {
        let result = wrap_text("café olé", 8);
        assert_eq!(result, vec!["café olé"]);
    }

    #[test]
    fn test_wrap_multiline_keeps_paragraphs() {
        let result = wrap_multiline("first line\n\nsecond", 20);
        assert_eq!(result, vec!["first line", "", "second"]);
    }

    #[test]
    fn test_value_spans_placeholder_only_when_idle() {
        let idle = value_spans("", "Enter a name", false);
        assert_eq!(idle.len(), 1);
        assert_eq!(idle[0].content, "Enter a name");

        let editing = value_spans("", "Enter a name", true);
        assert_eq!(editing.len(), 2);
        assert_eq!(editing[0].content, "");
        assert_eq!(editing[1].content, CURSOR);
    }

    #[test]
    fn test_label_span_pads_to_width() {
        let span = label_span("Name", 8, false);
        assert_eq!(span.content, "  Name    ");
    }

    #[test]
    fn test_inner_width_saturates() {
        assert_eq!(inner_width(Rect::new(0, 0, 3, 3)), 0);
        assert_eq!(inner_width(Rect::new(0, 0, 40, 3)), 36);
    }
}
