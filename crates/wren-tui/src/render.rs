//! Top-level rendering over `&AppState`.
//!
//! Layout, left to right: sidebar, content area, divider column, side
//! pane. The divider's column is recorded in `TuiState::divider_x` during
//! render so the reducer can hit-test mouse presses against it.

use std::collections::BTreeMap;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use wren_core::gate::{self, Destination};

use crate::common::TaskKind;
use crate::features::feed::render::render_feed;
use crate::state::{AppState, NoticeLevel, TuiState};

const SIDEBAR_WIDTH: u16 = 18;

pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let [main_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    // The pane keeps its configured width but never squeezes the content
    // area below a readable minimum.
    let max_pane = main_area
        .width
        .saturating_sub(SIDEBAR_WIDTH + 20)
        .min(state.tui.layout.pane_width());
    let [sidebar_area, content_area, divider_area, pane_area] = Layout::horizontal([
        Constraint::Length(SIDEBAR_WIDTH),
        Constraint::Min(20),
        Constraint::Length(1),
        Constraint::Length(max_pane),
    ])
    .areas(main_area);

    state.tui.divider_x.set(Some(divider_area.x));

    render_sidebar(frame, sidebar_area, &state.tui);
    render_content(frame, content_area, &state.tui);
    render_divider(frame, divider_area, &state.tui);
    render_side_pane(frame, pane_area, &state.tui);
    render_status_line(frame, status_area, &state.tui);

    if let Some(overlay) = &state.overlay {
        overlay.render(frame, area);
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let block = Block::default().borders(Borders::RIGHT).title(" wren ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for destination in gate::visible_destinations(&tui.session) {
        let selected = destination == tui.nav.selected;
        let style = if selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if selected { "> " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{marker}{destination}"),
            style,
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_content(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let destination = tui.nav.selected;
    if !gate::can_access(&tui.session, destination) {
        // Reachable transiently between a role change and the nav
        // fallback; render a denied state rather than the content.
        frame.render_widget(
            Paragraph::new("You don't have access to this page.")
                .style(Style::default().fg(Color::Red)),
            area,
        );
        return;
    }

    let loading = tui.tasks.state(TaskKind::FeedLoad).is_running();
    match destination {
        Destination::Home => render_feed(frame, area, &tui.feed, None, loading),
        Destination::Profile => match tui.session.username.as_deref() {
            Some(username) => render_feed(frame, area, &tui.feed, Some(username), loading),
            None => render_message(
                frame,
                area,
                " Profile ",
                "Sign in to see your posts. Press 'n' on the feed or 'l' in Settings.",
            ),
        },
        Destination::Notifications => render_message(
            frame,
            area,
            " Notifications ",
            "No notifications yet. You're all caught up.",
        ),
        Destination::Settings => render_settings(frame, area, tui),
        Destination::AdminStats => render_admin_stats(frame, area, tui),
        Destination::AdminInfo => render_message(
            frame,
            area,
            " Admin Info ",
            "Admin sessions can delete any post from the feed ('d') and see \
             feed statistics under Admin Stats.",
        ),
    }
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let block = Block::default().borders(Borders::TOP).title(title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::DarkGray)),
        inner,
    );
}

fn render_settings(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let block = Block::default().borders(Borders::TOP).title(" Settings ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(username) = &tui.session.username {
        lines.push(Line::from(vec![
            Span::raw("Signed in as "),
            Span::styled(username.clone(), Style::default().fg(Color::Cyan)),
            Span::raw(format!("  (role: {})", tui.session.role)),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from("  l  Sign out"));
        lines.push(Line::from(Span::styled(
            "  x  Delete account",
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from("Browsing as guest."));
        lines.push(Line::from(""));
        lines.push(Line::from("  l  Sign in or register"));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Feed statistics for admins, computed from the loaded posts.
fn render_admin_stats(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let block = Block::default().borders(Borders::TOP).title(" Admin Stats ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut by_author: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_hashtag: BTreeMap<&str, usize> = BTreeMap::new();
    for post in &tui.feed.posts {
        *by_author.entry(post.username.as_str()).or_default() += 1;
        for tag in &post.hashtags {
            *by_hashtag.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut lines = vec![
        Line::from(format!("Loaded posts: {}", tui.feed.posts.len())),
        Line::from(""),
        Line::from(Span::styled("Posts by author", Style::default().fg(Color::Cyan))),
    ];
    for (author, count) in &by_author {
        lines.push(Line::from(format!("  {author}: {count}")));
    }
    if !by_hashtag.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Hashtags",
            Style::default().fg(Color::Cyan),
        )));
        for (tag, count) in &by_hashtag {
            lines.push(Line::from(format!("  {tag}: {count}")));
        }
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_divider(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let style = if tui.layout.is_dragging() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let lines: Vec<Line> = (0..area.height).map(|_| Line::from("│")).collect();
    frame.render_widget(Paragraph::new(lines).style(style), area);
}

fn render_side_pane(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let mut lines: Vec<Line> = vec![Line::from("")];
    match &tui.session.username {
        Some(username) => {
            lines.push(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    username.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(format!(" {}", tui.session.role)));
        }
        None => lines.push(Line::from(" Guest")),
    }
    lines.push(Line::from(""));
    for help in [
        " Tab  next page",
        " r    reload feed",
        " n    new post",
        " j/k  move",
        " d    delete post",
        " q    quit",
        "",
        " drag │ to resize",
    ] {
        lines.push(Line::from(Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_line(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let line = if let Some(notice) = &tui.notice {
        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Error => Color::Red,
        };
        Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default().fg(color),
        ))
    } else if tui.tasks.is_any_running() {
        Line::from(Span::styled(
            " working...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            " Esc dismiss · Ctrl+C quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
