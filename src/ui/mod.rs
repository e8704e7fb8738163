//! UI module for peer-review-tui
//!
//! This module contains the rendering functions for the review form:
//! the reviewee panel, topics, feedback section cards and the status bar.

mod form;
mod helpers;
mod sections;
mod status;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::theme::BG_PRIMARY;

use form::{render_subject_panel, render_topics_panel, SUBJECT_PANEL_HEIGHT, TOPICS_PANEL_HEIGHT};
use sections::render_sections;
use status::{render_header, render_key_hints, render_status_line};

/// Draw the whole form for one frame
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(BG_PRIMARY)), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                    // Header
            Constraint::Length(SUBJECT_PANEL_HEIGHT), // Reviewee
            Constraint::Length(TOPICS_PANEL_HEIGHT),  // Topics
            Constraint::Min(5),                       // Question cards
            Constraint::Length(1),                    // Status message
            Constraint::Length(1),                    // Key hints
        ])
        .split(area);

    render_header(layout[0], app, frame);
    render_subject_panel(layout[1], app, frame);
    render_topics_panel(layout[2], app, frame);
    render_sections(layout[3], app, frame);
    render_status_line(layout[4], app, frame);
    render_key_hints(layout[5], app, frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::backend::TestBackend;

    use crate::controller::FormController;
    use crate::llm::EchoGenerator;
    use crate::orchestrator::StaleResultPolicy;
    use crate::review::LogSink;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 50)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(FormController::new(
            Arc::new(EchoGenerator),
            StaleResultPolicy::Apply,
            Box::new(LogSink::default()),
        ))
    }

    #[test]
    fn test_draw_shows_form_parts() {
        let screen = render(&app());
        assert!(screen.contains("Peer Review"));
        assert!(screen.contains("Reviewee"));
        assert!(screen.contains("Question 1"));
        assert!(screen.contains("0/250 words (Recommended: 200)"));
    }

    #[test]
    fn test_draw_small_terminal_does_not_panic() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
    }
}
