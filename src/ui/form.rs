//! Subject and topic panel rendering

use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::{App, Focus};
use crate::models::{Mode, SubjectField};
use crate::theme::{ACCENT_PRIMARY, AMBER_WARNING, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::utils::truncate_chars;

use super::helpers::{card_block, label_span, value_spans};

const LABEL_WIDTH: usize = 22;
const TOPIC_CHIP_CHARS: usize = 24;

/// Rows needed by the subject panel, borders included
pub const SUBJECT_PANEL_HEIGHT: u16 = 6;

/// Rows needed by the topics panel, borders included
pub const TOPICS_PANEL_HEIGHT: u16 = 4;

/// Render the name, gender, position and relationship fields
pub fn render_subject_panel(area: Rect, app: &App, frame: &mut Frame) {
    let subject = app.controller.snapshot().subject();
    let focused = matches!(app.focus, Focus::Subject(_) | Focus::Gender);

    let text_line = |field: SubjectField, placeholder: &str| {
        let is_focused = app.focus == Focus::Subject(field);
        let editing = is_focused && app.mode == Mode::Editing;
        let mut spans = vec![label_span(field.label(), LABEL_WIDTH, is_focused)];
        spans.extend(value_spans(subject.field(field), placeholder, editing));
        Line::from(spans)
    };

    let gender_focused = app.focus == Focus::Gender;
    let gender_color = if subject.gender.is_set() { TEXT_PRIMARY } else { TEXT_MUTED };
    let arrow_style = if gender_focused {
        Style::default().fg(ACCENT_PRIMARY)
    } else {
        Style::default().fg(TEXT_MUTED)
    };
    let gender_line = Line::from(vec![
        label_span("Gender", LABEL_WIDTH, gender_focused),
        Span::styled("◀ ", arrow_style),
        Span::styled(subject.gender.label(), Style::default().fg(gender_color)),
        Span::styled(" ▶", arrow_style),
    ]);

    let lines = vec![
        text_line(SubjectField::Name, "Who is this review for?"),
        gender_line,
        text_line(SubjectField::Position, "Their role"),
        text_line(SubjectField::Relationship, "How you work together"),
    ];

    let paragraph = Paragraph::new(lines).block(card_block("Reviewee", focused));
    frame.render_widget(paragraph, area);
}

/// Render the topic draft input and the list of added topics
pub fn render_topics_panel(area: Rect, app: &App, frame: &mut Frame) {
    let topics = app.controller.snapshot().topics();
    let focused = matches!(app.focus, Focus::TopicDraft | Focus::Topics);

    let draft_focused = app.focus == Focus::TopicDraft;
    let editing = draft_focused && app.mode == Mode::Editing;
    let mut draft_spans = vec![label_span("New topic", LABEL_WIDTH, draft_focused)];
    draft_spans.extend(value_spans(&app.topic_draft, "Enter to type, Ctrl-T to add", editing));

    let list_focused = app.focus == Focus::Topics;
    let mut topic_spans = vec![label_span("Topics", LABEL_WIDTH, list_focused)];
    if topics.is_empty() {
        topic_spans.push(Span::styled(
            "none yet",
            Style::default().fg(TEXT_MUTED).add_modifier(Modifier::ITALIC),
        ));
    }
    for (index, topic) in topics.iter().enumerate() {
        let style = if list_focused && index == app.selected_topic {
            Style::default()
                .fg(AMBER_WARNING)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(TEXT_SECONDARY)
        };
        topic_spans.push(Span::styled(
            format!("[{}]", truncate_chars(topic, TOPIC_CHIP_CHARS)),
            style,
        ));
        topic_spans.push(Span::raw(" "));
    }

    let title = format!("Focus topics ({})", topics.len());
    let paragraph = Paragraph::new(vec![Line::from(draft_spans), Line::from(topic_spans)])
        .block(card_block(&title, focused));
    frame.render_widget(paragraph, area);
}
