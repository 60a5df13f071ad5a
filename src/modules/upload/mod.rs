// src/modules/upload/mod.rs
//! Staging area and results list for document uploads.

mod staged_file;

pub use staged_file::{
    parse_paths, Rejection, StagedFile, ACCEPTED_MIME_TYPES, MAX_FILE_SIZE, MIME_DOC, MIME_DOCX,
};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::event::AppEvent;
use crate::modules::router::Route;
use crate::modules::view_handler::ViewHandler;
use crate::util::api::{ApiError, BatchUploadResponse, FileUploadResult, UploadFile};
use crate::{log_info, log_warn};

pub const FALLBACK_ERROR: &str = "Upload failed";

/// Result rows moved per PgUp/PgDn.
const RESULTS_PAGE: isize = 5;

#[derive(Debug, Default)]
pub struct UploadView {
    staged: Vec<StagedFile>,
    results: Vec<FileUploadResult>,
    uploading: bool,
    pub path_input: String,
    pub selected: Option<usize>,
    /// Why recently entered files were not staged
    pub notices: Vec<String>,
    /// First result row shown
    pub results_scroll: usize,
}

impl UploadView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged(&self) -> &[StagedFile] {
        &self.staged
    }

    pub fn results(&self) -> &[FileUploadResult] {
        &self.results
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn get_input(&self) -> &str {
        &self.path_input
    }

    /// Validates and stages every path in `input`. Returns how many were
    /// staged; rejected files only produce a notice.
    pub fn add_paths(&mut self, input: &str) -> usize {
        if self.uploading {
            return 0;
        }

        self.notices.clear();
        let mut accepted = 0;

        for path in parse_paths(input) {
            match StagedFile::from_path(&path) {
                Ok(file) => {
                    self.staged.push(file);
                    accepted += 1;
                }
                Err(rejection) => {
                    log_info!("Rejected {}: {}", path.display(), rejection);
                    self.notices.push(rejection.to_string());
                }
            }
        }

        if accepted > 0 {
            self.results.clear();
            self.results_scroll = 0;
        }
        accepted
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if self.uploading || index >= self.staged.len() {
            return false;
        }

        self.staged.remove(index);
        self.selected = match self.selected {
            _ if self.staged.is_empty() => None,
            Some(i) => Some(i.min(self.staged.len() - 1)),
            None => None,
        };
        true
    }

    /// Marks the upload as in flight and hands back the files to send.
    pub fn begin_upload(&mut self) -> Option<Vec<StagedFile>> {
        if self.uploading || self.staged.is_empty() {
            return None;
        }

        self.uploading = true;
        self.results.clear();
        self.results_scroll = 0;
        self.notices.clear();
        Some(self.staged.clone())
    }

    /// Stores the outcome and reports whether chat should be opened, which
    /// happens when at least one file went through.
    pub fn finish_upload(&mut self, result: Result<BatchUploadResponse, ApiError>) -> bool {
        if !self.uploading {
            log_warn!("Dropping upload result with no upload in flight");
            return false;
        }
        self.uploading = false;
        self.results_scroll = 0;

        match result {
            Ok(batch) => {
                if batch.has_failures() {
                    log_warn!(
                        "Batch upload partially failed: {} of {} files",
                        batch.failed_uploads, batch.total_files
                    );
                }
                self.results = batch.results;
                batch.successful_uploads > 0
            }
            Err(e) => {
                log_warn!("Batch upload failed: {}", e);
                let reason = e.detail().unwrap_or(FALLBACK_ERROR).to_string();
                self.results = self
                    .staged
                    .iter()
                    .map(|file| FileUploadResult::failed(file.name.clone(), reason.clone()))
                    .collect();
                false
            }
        }
    }

    /// "Upload more": back to the empty state.
    pub fn reset(&mut self) {
        if self.uploading {
            return;
        }
        self.staged.clear();
        self.results.clear();
        self.notices.clear();
        self.selected = None;
        self.results_scroll = 0;
    }

    /// "Upload more" is only offered once something went through.
    pub fn can_upload_more(&self) -> bool {
        !self.uploading && self.success_count() > 0
    }

    /// Results in display order: failures first so they stay in view.
    pub fn ordered_results(&self) -> Vec<&FileUploadResult> {
        let (failed, succeeded): (Vec<_>, Vec<_>) = self.results.iter().partition(|r| !r.success);
        failed.into_iter().chain(succeeded).collect()
    }

    pub fn scroll_results(&mut self, delta: isize) {
        let max = self.results.len().saturating_sub(1);
        self.results_scroll = self.results_scroll.saturating_add_signed(delta).min(max);
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    fn select_next(&mut self) {
        if self.staged.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.staged.len(),
            None => 0,
        });
    }

    fn select_prev(&mut self) {
        if self.staged.is_empty() {
            return;
        }
        let len = self.staged.len();
        self.selected = Some(match self.selected {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
    }
}

/// Reads every staged file into memory. One unreadable file fails the
/// whole batch, mirroring a failed request.
pub async fn read_staged(files: &[StagedFile]) -> Result<Vec<UploadFile>, ApiError> {
    let mut uploads = Vec::with_capacity(files.len());
    for file in files {
        uploads.push(UploadFile::read(&file.path, &file.name, &file.mime).await?);
    }
    Ok(uploads)
}

/// Failure text for a result row.
pub fn result_error(result: &FileUploadResult) -> &str {
    result
        .error
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or(FALLBACK_ERROR)
}

impl ViewHandler for UploadView {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('r') && self.can_upload_more() {
                self.reset();
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => Some(AppEvent::Navigate(Route::Chat)),
            KeyCode::Enter if self.path_input.trim().is_empty() => {
                self.begin_upload().map(AppEvent::StartUpload)
            }
            KeyCode::Enter => {
                if !self.uploading {
                    let input = std::mem::take(&mut self.path_input);
                    self.add_paths(&input);
                }
                None
            }
            KeyCode::Backspace => {
                if !self.uploading {
                    self.path_input.pop();
                }
                None
            }
            KeyCode::Char(ch) => {
                if !self.uploading {
                    self.path_input.push(ch);
                }
                None
            }
            KeyCode::Up => {
                self.select_prev();
                None
            }
            KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Delete => {
                if let Some(index) = self.selected {
                    self.remove(index);
                }
                None
            }
            KeyCode::PageUp => {
                self.scroll_results(-RESULTS_PAGE);
                None
            }
            KeyCode::PageDown => {
                self.scroll_results(RESULTS_PAGE);
                None
            }
            _ => None,
        }
    }

    fn help_text(&self) -> &str {
        if self.uploading {
            "Uploading…"
        } else if self.can_upload_more() {
            "Type a .docx/.doc path + Enter: Add • Enter on empty: Upload • ↑↓ Del: Remove • PgUp PgDn: Results • Ctrl+R: Upload more • Esc: Chat"
        } else {
            "Type a .docx/.doc path + Enter: Add • Enter on empty: Upload • ↑↓ Del: Remove • PgUp PgDn: Results • Esc: Chat"
        }
    }
}
