//! Feedback section card rendering

use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::{App, Focus};
use crate::models::{FeedbackSection, GenerationState, Mode};
use crate::prompt::resolve_question;
use crate::theme::{
    spinner_frame, state_color, ACCENT_PRIMARY, AMBER_WARNING, RED_ERROR, TEXT_MUTED,
    TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::utils::{is_over_limit, word_count, RECOMMENDED_WORDS, WORD_LIMIT};

use super::helpers::{card_block, inner_width, label_span, value_spans, wrap_multiline, CURSOR};

const LABEL_WIDTH: usize = 10;

/// Everything a card needs to know about how it is being viewed
struct CardView {
    number: usize,
    focus: Option<Focus>,
    editing: bool,
    tick: u64,
    width: usize,
}

/// Render every section card, scrolled so the focused one is visible
pub fn render_sections(area: Rect, app: &App, frame: &mut Frame) {
    let snapshot = app.controller.snapshot();
    let name = &snapshot.subject().name;
    let width = inner_width(area);
    let focused_id = app.focus.section();

    let cards: Vec<(bool, Vec<Line<'static>>)> = snapshot
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let focused = focused_id == Some(section.id);
            let view = CardView {
                number: index + 1,
                focus: focused.then_some(app.focus),
                editing: focused && app.mode == Mode::Editing,
                tick: app.animation_tick,
                width,
            };
            (focused, section_lines(section, name, &view))
        })
        .collect();

    let heights: Vec<u16> = cards.iter().map(|(_, lines)| lines.len() as u16 + 2).collect();
    let focused_index = cards.iter().position(|(focused, _)| *focused).unwrap_or(0);
    let first = first_visible(&heights, focused_index, area.height);

    let mut y = area.y;
    let bottom = area.y + area.height;
    for (index, (focused, lines)) in cards.into_iter().enumerate().skip(first) {
        if y >= bottom {
            break;
        }
        let height = heights[index].min(bottom - y);
        let card_area = Rect::new(area.x, y, area.width, height);
        let title = format!("Question {}", index + 1);
        frame.render_widget(Paragraph::new(lines).block(card_block(&title, focused)), card_area);
        y += height;
    }
}

/// Index of the first card to draw so that the focused card fits
pub fn first_visible(heights: &[u16], focused: usize, available: u16) -> usize {
    let mut first = focused.min(heights.len().saturating_sub(1));
    let mut used = heights.get(first).copied().unwrap_or(0);
    while first > 0 && used + heights[first - 1] <= available {
        first -= 1;
        used += heights[first];
    }
    first
}

fn section_lines(section: &FeedbackSection, name: &str, view: &CardView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    // Question
    let question_focused = view.focus == Some(Focus::Question(section.id));
    let indicator = Span::styled(
        "● ",
        Style::default().fg(state_color(section.generation_state, view.tick)),
    );
    let mut question = vec![indicator, Span::styled(
        format!("Q{} ", view.number),
        Style::default().fg(ACCENT_PRIMARY).add_modifier(Modifier::BOLD),
    )];
    if question_focused {
        // Raw text so the name token stays editable
        question.extend(value_spans(&section.question, "Type a question", view.editing));
    } else {
        let resolved = resolve_question(&section.question, name);
        question.extend(value_spans(&resolved, "Untitled question", false));
    }
    lines.push(Line::from(question));

    // Tone
    let tone_focused = view.focus == Some(Focus::Tone(section.id));
    let arrow_style = if tone_focused {
        Style::default().fg(ACCENT_PRIMARY)
    } else {
        Style::default().fg(TEXT_MUTED)
    };
    let (tone_label, tone_color) = match section.tone {
        Some(tone) => (format!("{} ({}/5)", tone, tone.ordinal()), TEXT_PRIMARY),
        None => ("Unspecified".to_string(), TEXT_MUTED),
    };
    lines.push(Line::from(vec![
        label_span("Tone", LABEL_WIDTH, tone_focused),
        Span::styled("◀ ", arrow_style),
        Span::styled(tone_label, Style::default().fg(tone_color)),
        Span::styled(" ▶", arrow_style),
    ]));

    // Initial feedback
    let feedback_focused = view.focus == Some(Focus::Feedback(section.id));
    let feedback_editing = feedback_focused && view.editing;
    lines.push(Line::from(label_span("Feedback", LABEL_WIDTH, feedback_focused)));
    if section.initial_feedback.is_empty() {
        lines.push(Line::from(value_spans(
            "",
            "Your first-draft thoughts",
            feedback_editing,
        )));
    } else {
        let wrapped = wrap_multiline(&section.initial_feedback, view.width);
        let last = wrapped.len() - 1;
        for (i, text) in wrapped.into_iter().enumerate() {
            let mut spans = vec![Span::styled(text, Style::default().fg(TEXT_PRIMARY))];
            if feedback_editing && i == last {
                spans.push(Span::styled(CURSOR, Style::default().fg(ACCENT_PRIMARY)));
            }
            lines.push(Line::from(spans));
        }
    }
    lines.push(word_counter_line(&section.initial_feedback));

    // Refined feedback
    lines.extend(refined_lines(section, view));
    lines
}

/// "n/250 words (Recommended: 200)", red once over the limit
fn word_counter_line(text: &str) -> Line<'static> {
    let color = if is_over_limit(text) {
        RED_ERROR
    } else if word_count(text) > RECOMMENDED_WORDS {
        AMBER_WARNING
    } else {
        TEXT_MUTED
    };
    Line::from(Span::styled(
        format!(
            "{}/{} words (Recommended: {})",
            word_count(text),
            WORD_LIMIT,
            RECOMMENDED_WORDS
        ),
        Style::default().fg(color),
    ))
    .alignment(Alignment::Right)
}

fn refined_lines(section: &FeedbackSection, view: &CardView) -> Vec<Line<'static>> {
    let mut header = vec![Span::styled(
        "Refined",
        Style::default().fg(TEXT_SECONDARY).add_modifier(Modifier::BOLD),
    )];
    match section.generation_state {
        GenerationState::Loading => header.push(Span::styled(
            format!("  {} Processing...", spinner_frame(view.tick)),
            Style::default().fg(state_color(GenerationState::Loading, view.tick)),
        )),
        GenerationState::Success => header.push(Span::styled(
            "  ✓",
            Style::default().fg(state_color(GenerationState::Success, view.tick)),
        )),
        GenerationState::Error | GenerationState::Idle => {}
    }

    let mut lines = vec![Line::from(header)];
    match &section.refined_feedback {
        Some(refined) => {
            for text in wrap_multiline(refined, view.width) {
                lines.push(Line::from(Span::styled(text, Style::default().fg(TEXT_PRIMARY))));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "Ctrl-R turns your feedback into a polished paragraph",
            Style::default().fg(TEXT_MUTED).add_modifier(Modifier::ITALIC),
        ))),
    }

    if section.generation_state == GenerationState::Error {
        let message = section.last_error.as_deref().unwrap_or("generation failed");
        for text in wrap_multiline(&format!("✗ {}", message), view.width) {
            lines.push(Line::from(Span::styled(text, Style::default().fg(RED_ERROR))));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionId;
    use crate::store::{FormSnapshot, GenerationResult};

    fn view(focus: Option<Focus>) -> CardView {
        CardView {
            number: 1,
            focus,
            editing: false,
            tick: 0,
            width: 40,
        }
    }

    fn first_section() -> (FormSnapshot, SectionId) {
        let snapshot = FormSnapshot::new();
        let id = snapshot.section_id_at(0).unwrap();
        (snapshot, id)
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_first_visible_scrolls_to_focused_card() {
        let heights = [10, 10, 10, 10];
        assert_eq!(first_visible(&heights, 0, 25), 0);
        assert_eq!(first_visible(&heights, 1, 25), 0);
        assert_eq!(first_visible(&heights, 3, 25), 2);
        assert_eq!(first_visible(&heights, 3, 5), 3);
    }

    #[test]
    fn test_first_visible_empty() {
        assert_eq!(first_visible(&[], 0, 10), 0);
    }

    #[test]
    fn test_question_resolves_name_unless_focused() {
        let snapshot = FormSnapshot::new();
        let id = snapshot.section_id_at(1).unwrap();
        let section = snapshot.section(id).unwrap();

        let lines = section_lines(section, "Dana", &view(None));
        assert!(text(&lines[0]).contains("Dana"));
        assert!(!text(&lines[0]).contains("{name}"));

        let lines = section_lines(section, "Dana", &view(Some(Focus::Question(id))));
        assert!(text(&lines[0]).contains("{name}"));
    }

    #[test]
    fn test_word_counter_text() {
        let line = word_counter_line("one two three");
        assert_eq!(text(&line), "3/250 words (Recommended: 200)");
    }

    #[test]
    fn test_word_counter_turns_red_over_limit() {
        let long = "word ".repeat(WORD_LIMIT + 1);
        let line = word_counter_line(&long);
        assert_eq!(line.spans[0].style.fg, Some(RED_ERROR));
    }

    #[test]
    fn test_error_shown_below_previous_refinement() {
        let (snapshot, id) = first_section();
        let snapshot = snapshot
            .apply_generation_result(id, GenerationResult::Succeeded("Earlier".into()))
            .unwrap()
            .apply_generation_result(id, GenerationResult::Failed("quota".into()))
            .unwrap();
        let section = snapshot.section(id).unwrap();
        let lines: Vec<String> = refined_lines(section, &view(None)).iter().map(text).collect();
        assert!(lines.iter().any(|l| l == "Earlier"));
        assert!(lines.iter().any(|l| l.contains("quota")));
    }

    #[test]
    fn test_loading_shows_processing() {
        let (snapshot, id) = first_section();
        let snapshot = snapshot
            .apply_generation_result(id, GenerationResult::Started)
            .unwrap();
        let section = snapshot.section(id).unwrap();
        let header = text(&refined_lines(section, &view(None))[0]);
        assert!(header.contains("Processing..."));
    }
}
