//! Sign-in / registration overlay.
//!
//! One modal covers both flows: login collects username and password,
//! registration additionally collects an email. Registration does not
//! log the user in; on success the overlay flips back to login mode with
//! the server's confirmation shown.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::overlays::{OverlayUpdate, centered_area, render_container};
use crate::state::TuiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Email,
    Password,
}

#[derive(Debug)]
pub struct SignInState {
    mode: SignInMode,
    username: String,
    email: String,
    password: String,
    focus: Field,
    pub error: Option<String>,
    pub info: Option<String>,
    pub submitting: bool,
}

impl SignInState {
    pub fn new() -> Self {
        Self {
            mode: SignInMode::Login,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            focus: Field::Username,
            error: None,
            info: None,
            submitting: false,
        }
    }

    pub fn mode(&self) -> SignInMode {
        self.mode
    }

    /// Registration succeeded; flip to login mode so the new account can
    /// sign in. Username is kept, the password is not.
    pub fn on_registered(&mut self, message: String) {
        self.mode = SignInMode::Login;
        self.password.clear();
        self.focus = Field::Password;
        self.error = None;
        self.info = Some(message);
        self.submitting = false;
    }

    pub fn on_failed(&mut self, error: String) {
        self.error = Some(error);
        self.info = None;
        self.submitting = false;
    }

    fn fields(&self) -> &'static [Field] {
        match self.mode {
            SignInMode::Login => &[Field::Username, Field::Password],
            SignInMode::Register => &[Field::Username, Field::Email, Field::Password],
        }
    }

    fn focus_step(&mut self, direction: isize) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let len = fields.len() as isize;
        let next = (current as isize + direction).rem_euclid(len) as usize;
        self.focus = fields[next];
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    fn submit(&mut self, tui: &mut TuiState) -> OverlayUpdate {
        if self.username.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Username and password are required.".to_string());
            return OverlayUpdate::stay();
        }
        if self.mode == SignInMode::Register && self.email.trim().is_empty() {
            self.error = Some("Email is required to register.".to_string());
            return OverlayUpdate::stay();
        }

        self.error = None;
        self.info = None;
        self.submitting = true;

        let effect = match self.mode {
            SignInMode::Login => UiEffect::Login {
                task: tui.task_seq.next_id(),
                username: self.username.trim().to_string(),
                password: self.password.clone(),
            },
            SignInMode::Register => UiEffect::Register {
                task: tui.task_seq.next_id(),
                username: self.username.trim().to_string(),
                email: self.email.trim().to_string(),
                password: self.password.clone(),
            },
        };
        OverlayUpdate::stay().with_effects(vec![effect])
    }

    pub fn handle_key(&mut self, tui: &mut TuiState, key: KeyEvent) -> OverlayUpdate {
        if self.submitting {
            // Only allow bailing out while the request is in flight; the
            // stale-completion guard makes an abandoned result harmless.
            if key.code == KeyCode::Esc {
                let kind = match self.mode {
                    SignInMode::Login => TaskKind::Login,
                    SignInMode::Register => TaskKind::Register,
                };
                let token = tui.tasks.state(kind).cancel.clone();
                tui.tasks.state_mut(kind).clear();
                return OverlayUpdate::close().with_effects(vec![UiEffect::CancelTask {
                    kind,
                    token,
                }]);
            }
            return OverlayUpdate::stay();
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Enter => self.submit(tui),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_step(1);
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_step(-1);
                OverlayUpdate::stay()
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.mode = match self.mode {
                    SignInMode::Login => SignInMode::Register,
                    SignInMode::Register => SignInMode::Login,
                };
                self.focus = Field::Username;
                self.error = None;
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_value_mut().push(c);
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                self.focused_value_mut().pop();
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let height = if self.mode == SignInMode::Register { 13 } else { 11 };
        let popup = centered_area(area, 50, height);
        let title = match self.mode {
            SignInMode::Login => " Sign in ",
            SignInMode::Register => " Register ",
        };
        let inner = render_container(frame, popup, title);

        let mut lines = vec![self.field_line("Username", &self.username, Field::Username)];
        if self.mode == SignInMode::Register {
            lines.push(self.field_line("Email   ", &self.email, Field::Email));
        }
        let masked = "*".repeat(self.password.chars().count());
        lines.push(self.field_line("Password", &masked, Field::Password));
        lines.push(Line::from(""));

        if self.submitting {
            lines.push(Line::from(Span::styled(
                "Contacting server...",
                Style::default().fg(Color::Yellow),
            )));
        } else if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else if let Some(info) = &self.info {
            lines.push(Line::from(Span::styled(
                info.clone(),
                Style::default().fg(Color::Green),
            )));
        } else {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(""));
        let toggle_hint = match self.mode {
            SignInMode::Login => "Ctrl+R register instead",
            SignInMode::Register => "Ctrl+R back to sign-in",
        };
        lines.push(Line::from(Span::styled(
            format!("Enter submit · Tab next field · {toggle_hint} · Esc close"),
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn field_line(&self, label: &str, value: &str, field: Field) -> Line<'static> {
        let style = if self.focus == field {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        let cursor = if self.focus == field { "_" } else { "" };
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{value}{cursor}"), style),
        ])
    }
}

impl Default for SignInState {
    fn default() -> Self {
        Self::new()
    }
}
