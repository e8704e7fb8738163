//! Application state and core logic for the review form.
//!
//! This module contains the `App` struct which holds the form controller and
//! all navigation/editing state of the terminal UI. Every action is applied
//! synchronously; generation results arrive through
//! [`App::apply_generation_results`] on the next loop iteration.

use crossterm::event::KeyEvent;

use crate::controller::FormController;
use crate::input::{map_key, Action};
use crate::models::{Mode, SectionField, SectionId, SubjectField, ToneScale};
use crate::review::Submission;

/// Which input currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Subject(SubjectField),
    Gender,
    TopicDraft,
    Topics,
    Question(SectionId),
    Tone(SectionId),
    Feedback(SectionId),
}

impl Focus {
    pub fn section(&self) -> Option<SectionId> {
        match self {
            Focus::Question(id) | Focus::Tone(id) | Focus::Feedback(id) => Some(*id),
            _ => None,
        }
    }

    fn is_text(&self) -> bool {
        matches!(
            self,
            Focus::Subject(_) | Focus::TopicDraft | Focus::Question(_) | Focus::Feedback(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// One-line message shown above the key hints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

/// Application state
pub struct App {
    pub controller: FormController,
    pub mode: Mode,
    pub focus: Focus,
    pub topic_draft: String,
    pub selected_topic: usize,
    pub status: Option<Status>,
    // Animation state
    pub animation_tick: u64,
    pub should_quit: bool,
    pub submission: Option<Submission>,
    // Value of the field when editing began, restored on cancel
    edit_original: Option<String>,
}

impl App {
    pub fn new(controller: FormController) -> Self {
        Self {
            controller,
            mode: Mode::Navigate,
            focus: Focus::Subject(SubjectField::Name),
            topic_draft: String::new(),
            selected_topic: 0,
            status: None,
            animation_tick: 0,
            should_quit: false,
            submission: None,
            edit_original: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(self.mode, key);
        self.handle_action(action);
    }

    pub fn tick(&mut self) {
        self.animation_tick = self.animation_tick.wrapping_add(1);
    }

    /// Fold finished generations into the form
    pub fn apply_generation_results(&mut self) -> usize {
        let applied = self.controller.apply_pending();
        if applied > 0 {
            let pending = self.controller.in_flight();
            let text = if pending == 0 {
                "Generation finished".to_string()
            } else {
                format!("Generation finished, {} still running", pending)
            };
            self.set_status(StatusKind::Info, text);
        }
        applied
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => self.move_focus(1),
            Action::FocusPrev => self.move_focus(-1),
            Action::SectionNext => self.move_section(1),
            Action::SectionPrev => self.move_section(-1),
            Action::BeginEdit => self.begin_edit(),
            Action::CommitEdit => self.commit_edit(),
            Action::CancelEdit => self.cancel_edit(),
            Action::InsertChar(c) => self.edit_text(|text| text.push(c)),
            Action::Newline => {
                if matches!(self.focus, Focus::Feedback(_)) {
                    self.edit_text(|text| text.push('\n'));
                }
            }
            Action::Backspace => self.edit_text(|text| {
                text.pop();
            }),
            Action::CycleNext => self.cycle(true),
            Action::CyclePrev => self.cycle(false),
            Action::Regenerate => self.regenerate(),
            Action::AddSection => self.add_section(),
            Action::RemoveSection => self.remove_section(),
            Action::AddTopic => self.add_topic(),
            Action::RemoveTopic => self.remove_topic(),
            Action::Submit => self.submit(),
            Action::Ignore => {}
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            kind,
        });
    }

    // ── Focus ────────────────────────────────────────────────────────────

    /// Tab order: subject fields, topics, then each section's fields
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![
            Focus::Subject(SubjectField::Name),
            Focus::Gender,
            Focus::Subject(SubjectField::Position),
            Focus::Subject(SubjectField::Relationship),
            Focus::TopicDraft,
            Focus::Topics,
        ];
        for section in self.controller.snapshot().sections() {
            order.push(Focus::Question(section.id));
            order.push(Focus::Tone(section.id));
            order.push(Focus::Feedback(section.id));
        }
        order
    }

    fn move_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = (current as isize + step).rem_euclid(order.len() as isize) as usize;
        self.focus = order[next];
    }

    fn move_section(&mut self, step: isize) {
        let snapshot = self.controller.snapshot();
        let len = snapshot.sections().len() as isize;
        let Some(id) = self.focus.section() else {
            if step > 0 {
                if let Ok(first) = snapshot.section_id_at(0) {
                    self.focus = Focus::Question(first);
                }
            }
            return;
        };
        let Some(position) = snapshot.position_of(id) else {
            return;
        };
        let target = position as isize + step;
        if target < 0 || target >= len {
            return;
        }
        let Ok(next) = snapshot.section_id_at(target as usize) else {
            return;
        };
        self.focus = match self.focus {
            Focus::Tone(_) => Focus::Tone(next),
            Focus::Feedback(_) => Focus::Feedback(next),
            _ => Focus::Question(next),
        };
    }

    // ── Text editing ─────────────────────────────────────────────────────

    /// Current text of the focused field, if it is a text field
    pub fn focused_text(&self) -> Option<String> {
        let snapshot = self.controller.snapshot();
        match self.focus {
            Focus::Subject(field) => Some(snapshot.subject().field(field).to_string()),
            Focus::TopicDraft => Some(self.topic_draft.clone()),
            Focus::Question(id) => snapshot.section(id).map(|s| s.question.clone()),
            Focus::Feedback(id) => snapshot.section(id).map(|s| s.initial_feedback.clone()),
            Focus::Gender | Focus::Topics | Focus::Tone(_) => None,
        }
    }

    fn set_focused_text(&mut self, text: String) {
        let result = match self.focus {
            Focus::Subject(field) => {
                self.controller.update_subject_field(field, &text);
                Ok(())
            }
            Focus::TopicDraft => {
                self.topic_draft = text;
                Ok(())
            }
            Focus::Question(id) => self
                .controller
                .update_section_field(id, SectionField::Question(text)),
            Focus::Feedback(id) => self
                .controller
                .update_section_field(id, SectionField::InitialFeedback(text)),
            Focus::Gender | Focus::Topics | Focus::Tone(_) => Ok(()),
        };
        if let Err(err) = result {
            self.set_status(StatusKind::Error, err.to_string());
        }
    }

    fn edit_text<F: FnOnce(&mut String)>(&mut self, edit: F) {
        if self.mode != Mode::Editing {
            return;
        }
        if let Some(mut text) = self.focused_text() {
            edit(&mut text);
            self.set_focused_text(text);
        }
    }

    fn begin_edit(&mut self) {
        if !self.focus.is_text() {
            return;
        }
        self.edit_original = self.focused_text();
        self.mode = Mode::Editing;
    }

    fn commit_edit(&mut self) {
        self.mode = Mode::Navigate;
        self.edit_original = None;
        if self.focus == Focus::TopicDraft && !self.topic_draft.trim().is_empty() {
            self.add_topic();
        }
    }

    fn cancel_edit(&mut self) {
        if let Some(original) = self.edit_original.take() {
            self.set_focused_text(original);
        }
        self.mode = Mode::Navigate;
    }

    // ── Choices ──────────────────────────────────────────────────────────

    fn cycle(&mut self, forward: bool) {
        match self.focus {
            Focus::Gender => {
                let gender = self.controller.snapshot().subject().gender;
                self.controller
                    .set_gender(if forward { gender.next() } else { gender.prev() });
            }
            Focus::Tone(id) => {
                let Some(section) = self.controller.snapshot().section(id) else {
                    return;
                };
                let tone = if forward {
                    ToneScale::step_up(section.tone)
                } else {
                    ToneScale::step_down(section.tone)
                };
                if let Err(err) = self.controller.update_section_field(id, SectionField::Tone(tone)) {
                    self.set_status(StatusKind::Error, err.to_string());
                }
            }
            Focus::Topics => {
                let len = self.controller.snapshot().topics().len();
                if len == 0 {
                    return;
                }
                self.selected_topic = if forward {
                    (self.selected_topic + 1).min(len - 1)
                } else {
                    self.selected_topic.saturating_sub(1)
                };
            }
            _ => {}
        }
    }

    // ── Form actions ─────────────────────────────────────────────────────

    fn regenerate(&mut self) {
        let Some(id) = self.focus.section() else {
            self.set_status(StatusKind::Warning, "Select a question to regenerate");
            return;
        };
        let number = self.controller.snapshot().position_of(id).map_or(0, |p| p + 1);
        match self.controller.regenerate(id) {
            Ok(()) => self.set_status(
                StatusKind::Info,
                format!("Generating refined feedback for question {}...", number),
            ),
            Err(reason) => self.set_status(
                StatusKind::Warning,
                format!("Question {}: {}", number, reason),
            ),
        }
    }

    fn add_section(&mut self) {
        let id = self.controller.add_section();
        self.focus = Focus::Question(id);
        let count = self.controller.snapshot().sections().len();
        self.set_status(StatusKind::Info, format!("Added question {}", count));
    }

    fn remove_section(&mut self) {
        let Some(id) = self.focus.section() else {
            self.set_status(StatusKind::Warning, "Select a question to remove");
            return;
        };
        let position = self.controller.snapshot().position_of(id).unwrap_or(0);
        match self.controller.remove_section(id) {
            Ok(()) => {
                self.mode = Mode::Navigate;
                self.edit_original = None;
                let snapshot = self.controller.snapshot();
                let neighbour = position.min(snapshot.sections().len().saturating_sub(1));
                if let Ok(next) = snapshot.section_id_at(neighbour) {
                    self.focus = Focus::Question(next);
                }
                self.set_status(StatusKind::Info, format!("Removed question {}", position + 1));
            }
            Err(err) => self.set_status(StatusKind::Warning, err.to_string()),
        }
    }

    fn add_topic(&mut self) {
        let draft = std::mem::take(&mut self.topic_draft);
        match self.controller.add_topic(&draft) {
            Ok(()) => {
                self.selected_topic = self.controller.snapshot().topics().len() - 1;
                self.set_status(StatusKind::Info, format!("Added topic \"{}\"", draft.trim()));
            }
            Err(err) => {
                self.topic_draft = draft;
                self.set_status(StatusKind::Warning, err.to_string());
            }
        }
    }

    fn remove_topic(&mut self) {
        if self.focus != Focus::Topics {
            return;
        }
        match self.controller.remove_topic(self.selected_topic) {
            Ok(()) => {
                let len = self.controller.snapshot().topics().len();
                self.selected_topic = self.selected_topic.min(len.saturating_sub(1));
            }
            Err(err) => self.set_status(StatusKind::Warning, err.to_string()),
        }
    }

    fn submit(&mut self) {
        match self.controller.submit() {
            Ok(submission) => {
                self.submission = Some(submission);
                self.should_quit = true;
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }
}
