//! Confirmation overlay for destructive actions.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::effects::UiEffect;
use crate::overlays::{OverlayUpdate, centered_area, render_container};
use crate::state::TuiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeletePost { id: u64 },
    DeleteAccount,
}

#[derive(Debug)]
pub struct ConfirmState {
    prompt: String,
    action: ConfirmAction,
}

impl ConfirmState {
    pub fn delete_post(id: u64, author: &str) -> Self {
        Self {
            prompt: format!("Delete the post by {author}?"),
            action: ConfirmAction::DeletePost { id },
        }
    }

    pub fn delete_account(username: &str) -> Self {
        Self {
            prompt: format!("Permanently delete the account '{username}'?"),
            action: ConfirmAction::DeleteAccount,
        }
    }

    pub fn handle_key(&mut self, tui: &mut TuiState, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let effect = match self.action {
                    ConfirmAction::DeletePost { id } => UiEffect::DeletePost {
                        task: tui.task_seq.next_id(),
                        id,
                    },
                    ConfirmAction::DeleteAccount => UiEffect::DeleteAccount {
                        task: tui.task_seq.next_id(),
                    },
                };
                OverlayUpdate::close().with_effects(vec![effect])
            }
            KeyCode::Char('n') | KeyCode::Esc => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_area(area, 50, 7);
        let inner = render_container(frame, popup, " Confirm ");

        let lines = vec![
            Line::from(self.prompt.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "y confirm · n cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
