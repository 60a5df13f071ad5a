use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

use crate::modules::login::LoginView;
use crate::ui::centered_rect;

pub fn render_login(view: &LoginView, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(50, 40, area);
    Clear.render(popup, buf);

    let block = Block::bordered()
        .title("Sign in")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .fg(Color::Cyan);
    let inner = block.inner(popup);
    block.render(popup, buf);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Greeting
            Constraint::Length(3),  // Input
            Constraint::Min(1),     // Error
        ])
        .split(inner);

    Paragraph::new(Line::from("Enter a display name to continue").fg(Color::Gray))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

    Paragraph::new(format!("> {}", view.get_input()))
        .block(
            Block::bordered()
                .title("Username")
                .border_type(BorderType::Rounded)
        )
        .fg(Color::Yellow)
        .render(layout[1], buf);

    if let Some(error) = &view.error {
        Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Center)
            .render(layout[2], buf);
    }
}
