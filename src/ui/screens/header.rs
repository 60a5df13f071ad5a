use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Tabs, Widget},
};

use crate::app::{App, AppMode, Health};
use crate::modules::router::Route;

pub fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::bordered()
        .title(" Local Copilot ")
        .title_alignment(Alignment::Left)
        .border_type(BorderType::Rounded)
        .fg(Color::Blue);
    let inner = block.inner(area);
    block.render(area, buf);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(42)])
        .split(inner);

    if let AppMode::Main(route) = app.mode {
        let titles: Vec<Line> = Route::ALL.iter()
            .map(|r| Line::from(format!("{} {}", r.title(), r.path())))
            .collect();
        Tabs::new(titles)
            .select(route.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
            .divider("|")
            .render(layout[0], buf);
    }

    let (health_text, health_color) = match app.health {
        Health::Unknown => ("… checking API", Color::DarkGray),
        Health::Online => ("● API online", Color::Green),
        Health::Offline => ("○ API offline", Color::Red),
    };

    let mut spans = Vec::new();
    if let Some(user) = &app.user {
        spans.push(Span::styled(format!("{}  ", user.username), Style::default().fg(Color::White).bold()));
    }
    spans.push(Span::styled(health_text, Style::default().fg(health_color)));

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Right)
        .render(layout[1], buf);
}
