// src/modules/view_handler.rs

use ratatui::crossterm::event::KeyEvent;
use std::fmt::Debug;

use crate::event::AppEvent;

/// Key handling shared by every screen. Anything a view cannot finish on its
/// own (network calls, navigation) comes back as an [`AppEvent`] for the app.
pub trait ViewHandler: Debug {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent>;
    fn help_text(&self) -> &str;
}
