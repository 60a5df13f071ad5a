// src/modules/chat/mod.rs
//! Chat transcript, draft input and the waiting flag for one session.

mod message;

pub use message::{ChatMessage, Role};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::event::AppEvent;
use crate::modules::view_handler::ViewHandler;
use crate::util::api::{ApiError, QueryResponse};
use crate::log_warn;

pub const FALLBACK_ERROR: &str = "Failed to get answer";

#[derive(Debug)]
pub struct ChatView {
    messages: Vec<ChatMessage>,
    pub draft: String,
    waiting: bool,
    pub scroll_offset: usize,
    /// Keep the newest message in view; cleared when the user scrolls up
    pub follow_tail: bool,
}

impl ChatView {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            draft: String::new(),
            waiting: false,
            scroll_offset: 0,
            follow_tail: true,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn get_input(&self) -> &str {
        &self.draft
    }

    /// Appends the user's message and returns the question to send, or
    /// `None` when the draft is blank or an answer is still pending.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.waiting || self.draft.trim().is_empty() {
            return None;
        }

        let question = std::mem::take(&mut self.draft);
        self.push(ChatMessage::new_user(question.clone()));
        self.waiting = true;
        Some(question)
    }

    /// Absorbs the outcome of the pending question. Failures become an
    /// assistant message like any other answer.
    pub fn finish_submit(&mut self, result: Result<QueryResponse, ApiError>) {
        if !self.waiting {
            log_warn!("Dropping answer with no question pending");
            return;
        }

        let message = match result {
            Ok(response) => ChatMessage::new_assistant(response.answer, response.sources),
            Err(e) => {
                log_warn!("Query failed: {}", e);
                ChatMessage::new_assistant(error_text(&e), Vec::new())
            }
        };

        self.push(message);
        self.waiting = false;
    }

    fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.scroll_to_bottom();
    }

    pub fn scroll_up(&mut self) {
        self.follow_tail = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset += 1;
    }

    pub fn page_up(&mut self, lines: usize) {
        self.follow_tail = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn page_down(&mut self, lines: usize) {
        self.scroll_offset += lines;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow_tail = true;
    }

    /// Called while rendering, once the wrapped transcript height is known.
    pub fn clamp_scroll(&mut self, max_scroll: usize) -> usize {
        if self.follow_tail || self.scroll_offset >= max_scroll {
            self.scroll_offset = max_scroll;
            self.follow_tail = true;
        }
        self.scroll_offset
    }
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new()
    }
}

/// Text shown in place of an answer when the query call fails.
pub fn error_text(error: &ApiError) -> String {
    format!("Error: {}", error.detail().unwrap_or(FALLBACK_ERROR))
}

impl ViewHandler for ChatView {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Enter => self.begin_submit().map(AppEvent::SubmitQuestion),
            KeyCode::Backspace => {
                if !self.waiting {
                    self.draft.pop();
                }
                None
            }
            KeyCode::Char(ch) => {
                if !self.waiting {
                    self.draft.push(ch);
                }
                None
            }
            KeyCode::Up => {
                self.scroll_up();
                None
            }
            KeyCode::Down => {
                self.scroll_down();
                None
            }
            KeyCode::PageUp => {
                self.page_up(10);
                None
            }
            KeyCode::PageDown => {
                self.page_down(10);
                None
            }
            KeyCode::End => {
                self.scroll_to_bottom();
                None
            }
            _ => None,
        }
    }

    fn help_text(&self) -> &str {
        "Enter: Ask • ↑↓ PgUp PgDn: Scroll • End: Newest"
    }
}
