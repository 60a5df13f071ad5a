// src/modules/login/mod.rs
//! Sign-in screen. Only collects a display name; there is no password.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::event::AppEvent;
use crate::modules::view_handler::ViewHandler;

#[derive(Debug, Default)]
pub struct LoginView {
    pub username_input: String,
    pub error: Option<String>,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_input(&self) -> &str {
        &self.username_input
    }

    /// Any non-blank name is accepted.
    pub fn submit(&mut self) -> Option<String> {
        let username = self.username_input.trim();
        if username.is_empty() {
            self.error = Some("Please enter a username".to_string());
            return None;
        }

        let username = username.to_string();
        self.username_input.clear();
        self.error = None;
        Some(username)
    }
}

impl ViewHandler for LoginView {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Enter => self.submit().map(AppEvent::Login),
            KeyCode::Backspace => {
                self.username_input.pop();
                None
            }
            KeyCode::Char(ch) => {
                self.username_input.push(ch);
                self.error = None;
                None
            }
            _ => None,
        }
    }

    fn help_text(&self) -> &str {
        "Type a display name • Enter: Sign in • Esc: Quit"
    }
}
