//! Header, status line and key hint rendering

use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::{App, Focus, StatusKind};
use crate::models::Mode;
use crate::theme::{
    spinner_frame, ACCENT_PRIMARY, AMBER_WARNING, BG_SECONDARY, GREEN_SUCCESS, RED_ERROR,
    TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
};

/// Title bar with section and generation counts
pub fn render_header(area: Rect, app: &App, frame: &mut Frame) {
    let snapshot = app.controller.snapshot();
    let sections = snapshot.sections().len();
    let generating = snapshot.loading_count();

    let mut spans = vec![
        Span::styled(
            " Peer Review ",
            Style::default()
                .fg(TEXT_PRIMARY)
                .bg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} questions", sections),
            Style::default().fg(TEXT_SECONDARY),
        ),
    ];
    if generating > 0 {
        spans.push(Span::styled(
            format!("  {} {} generating", spinner_frame(app.animation_tick), generating),
            Style::default().fg(AMBER_WARNING),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(BG_SECONDARY));
    frame.render_widget(paragraph, area);
}

/// Latest status message, colored by severity
pub fn render_status_line(area: Rect, app: &App, frame: &mut Frame) {
    let Some(status) = &app.status else {
        return;
    };
    let color = match status.kind {
        StatusKind::Info => GREEN_SUCCESS,
        StatusKind::Warning => AMBER_WARNING,
        StatusKind::Error => RED_ERROR,
    };
    let line = Line::from(Span::styled(format!(" {}", status.text), Style::default().fg(color)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Key hints for the current mode and focus
pub fn render_key_hints(area: Rect, app: &App, frame: &mut Frame) {
    let mut spans = Vec::new();
    for (key, action) in key_hints(app.mode, app.focus) {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(ACCENT_PRIMARY).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!("{} ", action), Style::default().fg(TEXT_MUTED)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// (key, description) pairs shown in the bottom bar
pub fn key_hints(mode: Mode, focus: Focus) -> Vec<(&'static str, &'static str)> {
    if mode == Mode::Editing {
        let mut hints = vec![("Enter", "done"), ("Esc", "cancel")];
        if matches!(focus, Focus::Feedback(_)) {
            hints.push(("Alt-Enter", "new line"));
            hints.push(("^R", "regenerate"));
        }
        return hints;
    }

    let mut hints = vec![("Tab", "next"), ("↑↓", "question")];
    match focus {
        Focus::Gender | Focus::Tone(_) => hints.push(("←→", "change")),
        Focus::Topics => {
            hints.push(("←→", "select"));
            hints.push(("Del", "remove topic"));
        }
        Focus::TopicDraft => {
            hints.push(("Enter", "type"));
            hints.push(("^T", "add topic"));
        }
        Focus::Subject(_) | Focus::Question(_) | Focus::Feedback(_) => {
            hints.push(("Enter", "edit"))
        }
    }
    if focus.section().is_some() {
        hints.push(("^R", "regenerate"));
        hints.push(("^D", "remove"));
    }
    hints.push(("^N", "add question"));
    hints.push(("^S", "submit"));
    hints.push(("q", "quit"));
    hints
}
