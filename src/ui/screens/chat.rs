use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::modules::chat::{ChatMessage, ChatView, Role};
use crate::ui::components::UiComponent;
use crate::ui::style::dim_when_busy;

pub fn render_chat(view: &mut ChatView, area: Rect, buf: &mut Buffer) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),     // Transcript
            Constraint::Length(3),  // Input box
        ])
        .split(area);

    render_transcript(view, layout[0], buf);

    let (title, color) = if view.is_waiting() {
        ("Waiting for answer…", Color::DarkGray)
    } else {
        ("Ask a question...", Color::Yellow)
    };
    Paragraph::new(format!("> {}", view.get_input()))
        .block(
            Block::bordered()
                .title(title)
                .border_type(BorderType::Rounded)
        )
        .style(dim_when_busy(view.is_waiting(), Style::default().fg(color)))
        .render(layout[1], buf);
}

fn render_transcript(view: &mut ChatView, area: Rect, buf: &mut Buffer) {
    if view.messages().is_empty() {
        UiComponent::empty_message(
            "Ask a question about your uploaded documents...",
            "Chat",
            Some(Color::DarkGray),
        )
        .render(area, buf);
        return;
    }

    let mut lines = Vec::new();
    for message in view.messages() {
        lines.extend(message_lines(message));
    }
    if view.is_waiting() {
        lines.push(Line::from(Span::styled(
            "Assistant is thinking…",
            Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC),
        )));
    }

    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2) as usize;
    let text = Text::from(lines);
    let max_scroll = wrapped_height(&text, inner_width).saturating_sub(inner_height);
    let offset = view.clamp_scroll(max_scroll);

    Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title("Chat (↑↓ to scroll)")
                .border_type(BorderType::Rounded)
        )
        .scroll((offset.min(u16::MAX as usize) as u16, 0))
        .render(area, buf);
}

/// Lines for one transcript entry, including its cited sources.
pub fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    let style = match message.role {
        Role::User => Style::default().fg(Color::Cyan),
        Role::Assistant => Style::default().fg(Color::Green),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{}:", message.role.label()), style.add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", message.created_at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    for line in message.text.lines() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(line.to_string(), Style::default().fg(Color::White)),
        ]));
    }

    let sources = message.sources();
    if !sources.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Sources:",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )));
        for (index, source) in sources.iter().enumerate() {
            lines.extend(UiComponent::source_card(index, source));
        }
    }

    lines.push(Line::from(""));
    lines
}

/// Rows the text occupies once word-wrapped at `width` columns, counted by
/// the same wrapper the transcript is rendered with.
fn wrapped_height(text: &Text, width: u16) -> usize {
    Paragraph::new(text.clone())
        .wrap(Wrap { trim: false })
        .line_count(width.max(1))
}
