//! TUI application state and key handling.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use grledit::{EditorSession, SubmitError, Submitter, Tab, TextSurface};
use grledit_protocol::EvaluationOutcome;
use tracing::{debug, warn};

use super::nav::nav_tab_for_key;

/// One-line message under the panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Summary of the last finished submission.
#[derive(Debug, Clone)]
pub struct LastSubmission {
    pub finished_at: DateTime<Local>,
    pub elapsed_ms: u64,
    pub status: u16,
    pub success: bool,
}

pub struct App {
    pub session: EditorSession,
    pub submitter: Submitter,
    pub endpoint: String,
    pub running: bool,
    pub status: Option<StatusMessage>,
    pub last_submission: Option<LastSubmission>,
    /// First visible line of the Result panel
    pub result_scroll: u16,
}

impl App {
    pub fn new(session: EditorSession, submitter: Submitter, endpoint: impl Into<String>) -> Self {
        Self {
            session,
            submitter,
            endpoint: endpoint.into(),
            running: true,
            status: None,
            last_submission: None,
            result_scroll: 0,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitter.is_in_flight()
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global keys first
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.running = false;
                return;
            }
            KeyCode::Char('r') if ctrl => {
                self.submit();
                return;
            }
            code => {
                if let Some(tab) = nav_tab_for_key(code) {
                    self.session.activate(tab);
                    return;
                }
            }
        }

        if self.session.active_tab() == Tab::Context && ctrl && self.handle_block_key(key.code) {
            return;
        }

        if ctrl && key.code == KeyCode::Char('a') {
            if let Some(surface) = self.session.focused_surface_mut() {
                surface.select_all();
            }
            return;
        }

        if self.session.intercept_key(&key).consumed() {
            return;
        }

        match key.code {
            KeyCode::Tab => {
                let next = self.session.active_tab().next();
                self.session.activate(next);
            }
            KeyCode::BackTab => {
                let prev = self.session.active_tab().prev();
                self.session.activate(prev);
            }
            _ if self.session.active_tab() == Tab::Result => self.scroll_result(key.code),
            _ => {
                if let Some(surface) = self.session.focused_surface_mut() {
                    edit_surface(surface, &key);
                }
            }
        }
    }

    /// Block management in the Context panel. Returns true when handled.
    fn handle_block_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('n') => {
                let index = self.session.add_block();
                self.set_status(format!("Added context block #{}", index + 1), false);
            }
            KeyCode::Char('d') => match self.session.selected_block() {
                Some(index) => {
                    self.session.delete_selected_block();
                    self.set_status(format!("Deleted context block #{}", index + 1), false);
                }
                None => self.set_status("No context block to delete", true),
            },
            KeyCode::Up => self.session.select_prev_block(),
            KeyCode::Down => self.session.select_next_block(),
            _ => return false,
        }
        true
    }

    fn scroll_result(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.result_scroll = self.result_scroll.saturating_sub(1),
            KeyCode::Down => self.result_scroll = self.result_scroll.saturating_add(1),
            KeyCode::Home => self.result_scroll = 0,
            _ => {}
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        // Terminals may send line breaks as CR; tabs get the same treatment as typed ones
        let text = text
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .replace('\t', grledit_protocol::TAB_TOKEN);
        if let Some(surface) = self.session.focused_surface_mut() {
            surface.insert_str(&text);
        }
    }

    /// Start a submission of the current buffers.
    pub fn submit(&mut self) {
        let request = self.session.snapshot();
        let blocks = request.json_input.len();
        match self.submitter.begin(request) {
            Ok(()) => {
                self.set_status(
                    format!("Submitting rule with {} context block(s) to {}", blocks, self.endpoint),
                    false,
                );
            }
            Err(SubmitError::InFlight) => {
                debug!("submit ignored, previous submission still running");
                self.set_status("Submission already running", true);
            }
            Err(err) => {
                warn!(error = %err, "submission could not start");
                self.set_status(err.to_string(), true);
            }
        }
    }

    /// Collect a finished submission, if any.
    pub fn tick(&mut self) {
        let Some(result) = self.submitter.poll() else {
            return;
        };
        self.apply_outcome(&result.outcome, result.elapsed_ms);
    }

    fn apply_outcome(&mut self, outcome: &EvaluationOutcome, elapsed_ms: u64) {
        self.session.show_outcome(outcome);
        self.result_scroll = 0;
        let success = outcome.is_success();
        self.last_submission = Some(LastSubmission {
            finished_at: Local::now(),
            elapsed_ms,
            status: outcome.status(),
            success,
        });
        if success {
            self.set_status(format!("Evaluated in {} ms", elapsed_ms), false);
        } else {
            self.set_status(format!("Evaluation failed (status {})", outcome.status()), true);
        }
    }
}

/// Plain text editing keys for a focused surface.
fn edit_surface(surface: &mut TextSurface, key: &KeyEvent) {
    let ctrl_or_alt = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        KeyCode::Char(c) if !ctrl_or_alt => {
            surface.insert_char(c);
        }
        KeyCode::Enter => {
            surface.newline();
        }
        KeyCode::Backspace => {
            surface.backspace();
        }
        KeyCode::Delete => {
            surface.delete_forward();
        }
        KeyCode::Left => surface.move_left(),
        KeyCode::Right => surface.move_right(),
        KeyCode::Up => surface.move_up(),
        KeyCode::Down => surface.move_down(),
        KeyCode::Home => surface.move_line_start(),
        KeyCode::End => surface.move_line_end(),
        _ => {}
    }
}
