//! Feed view rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;
use wren_core::draft::{MAX_HASHTAGS, MAX_MESSAGE_LEN};

use super::state::{ComposerFocus, FeedState};

/// Renders the feed: the composer (when open) above the post list.
/// `filter` restricts the list to one author (the Profile view).
pub fn render_feed(
    frame: &mut Frame,
    area: Rect,
    feed: &FeedState,
    filter: Option<&str>,
    loading: bool,
) {
    let composer_height = if feed.is_composing() { 7 } else { 0 };
    let [composer_area, list_area] =
        Layout::vertical([Constraint::Length(composer_height), Constraint::Min(0)]).areas(area);

    if feed.is_composing() {
        render_composer(frame, composer_area, feed);
    }
    render_post_list(frame, list_area, feed, filter, loading);
}

fn render_composer(frame: &mut Frame, area: Rect, feed: &FeedState) {
    let focus = feed.composer.unwrap_or(ComposerFocus::Message);
    let focused_style = Style::default().fg(Color::Cyan);
    let blurred_style = Style::default().fg(Color::DarkGray);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New post ")
        .border_style(focused_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [message_area, hashtag_area, help_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let char_count = feed.draft.message.chars().count();
    let counter_style = if char_count > MAX_MESSAGE_LEN {
        Style::default().fg(Color::Red)
    } else {
        blurred_style
    };
    let message = Paragraph::new(feed.draft.message.as_str())
        .wrap(Wrap { trim: false })
        .style(if focus == ComposerFocus::Message {
            Style::default()
        } else {
            blurred_style
        });
    frame.render_widget(message, message_area);

    let mut hashtag_spans: Vec<Span> = vec![Span::styled("tags: ", blurred_style)];
    for tag in &feed.draft.hashtags {
        hashtag_spans.push(Span::styled(
            format!("{tag} "),
            Style::default().fg(Color::Green),
        ));
    }
    hashtag_spans.push(Span::styled(
        feed.draft.hashtag_input.as_str(),
        if focus == ComposerFocus::Hashtag {
            Style::default().fg(Color::White)
        } else {
            blurred_style
        },
    ));
    hashtag_spans.push(Span::styled(
        format!("  ({}/{MAX_HASHTAGS})", feed.draft.hashtags.len()),
        blurred_style,
    ));
    frame.render_widget(Line::from(hashtag_spans), hashtag_area);

    let help = Line::from(vec![
        Span::styled(
            format!("{char_count}/{MAX_MESSAGE_LEN}  "),
            counter_style,
        ),
        Span::styled(
            "Enter submit/stage tag · Tab switch field · Esc discard",
            blurred_style,
        ),
    ]);
    frame.render_widget(help, help_area);
}

fn render_post_list(
    frame: &mut Frame,
    area: Rect,
    feed: &FeedState,
    filter: Option<&str>,
    loading: bool,
) {
    let title = match filter {
        Some(username) => format!(" Posts by {username} "),
        None => " Feed ".to_string(),
    };
    let block = Block::default().borders(Borders::TOP).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible: Vec<(usize, &wren_core::api::types::Post)> = feed
        .posts
        .iter()
        .enumerate()
        .filter(|(_, post)| filter.is_none_or(|user| post.username == user))
        .collect();

    if visible.is_empty() {
        let text = if loading {
            "Loading posts..."
        } else if filter.is_some() {
            "No posts yet."
        } else {
            "The feed is empty. Press 'n' to write the first post."
        };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (index, post) in visible {
        let selected = index == feed.selected;
        let marker = if selected { "> " } else { "  " };
        let header_style = if selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let mut header = vec![
            Span::styled(marker, header_style),
            Span::styled(post.username.clone(), header_style),
        ];
        if !post.timestamp.is_empty() {
            let padding = usize::from(inner.width)
                .saturating_sub(post.username.width() + post.timestamp.width() + 4);
            header.push(Span::raw(" ".repeat(padding.max(1))));
            header.push(Span::styled(
                post.timestamp.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(header));

        for text_line in post.message.lines() {
            lines.push(Line::from(format!("  {text_line}")));
        }
        if !post.hashtags.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", post.hashtags.join(" ")),
                Style::default().fg(Color::Green),
            )));
        }
        lines.push(Line::from(""));
    }

    // Keep the selected post in view by scrolling whole entries.
    let selected_offset = lines
        .iter()
        .take_while(|line| !line.spans.first().is_some_and(|s| s.content.starts_with('>')))
        .count();
    let scroll = selected_offset.saturating_sub(usize::from(inner.height) / 2);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll as u16, 0)),
        inner,
    );
}
