pub mod components;
pub mod screens;
pub mod style;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};
use crate::app::{App, AppMode};
use crate::modules::router::Route;
use crate::ui::components::UiComponent;
use crate::ui::screens::{
    chat::render_chat,
    header::render_header,
    login::render_login,
    upload::render_upload,
};

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Header
                Constraint::Min(5),     // Active screen
                Constraint::Length(3),  // Help
            ])
            .split(area);

        render_header(self, layout[0], buf);

        match self.mode {
            AppMode::Login => render_login(&self.login_view, layout[1], buf),
            AppMode::Main(Route::Chat) => render_chat(&mut self.chat_view, layout[1], buf),
            AppMode::Main(Route::Upload) => render_upload(&self.upload_view, layout[1], buf),
        }

        UiComponent::help(&self.help_text()).render(layout[2], buf);
    }
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
