// src/modules/upload/staged_file.rs

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_DOC: &str = "application/msword";
pub const ACCEPTED_MIME_TYPES: [&str; 2] = [MIME_DOCX, MIME_DOC];

/// Per-file ceiling, checked before a file can be staged.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("{0}: file not found")]
    NotFound(String),

    #[error("{0}: only .docx and .doc files are accepted")]
    UnsupportedType(String),

    #[error("{name}: {size} bytes exceeds the 10 MB limit")]
    TooLarge { name: String, size: u64 },
}

/// A local file that passed validation and waits to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl StagedFile {
    pub fn from_path(path: &Path) -> Result<Self, Rejection> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mime = mime_guess::from_path(path)
            .iter()
            .map(|m| m.essence_str().to_string())
            .find(|m| ACCEPTED_MIME_TYPES.contains(&m.as_str()))
            .ok_or_else(|| Rejection::UnsupportedType(name.clone()))?;

        let metadata = std::fs::metadata(path)
            .ok()
            .filter(|m| m.is_file())
            .ok_or_else(|| Rejection::NotFound(name.clone()))?;

        let size = metadata.len();
        if size > MAX_FILE_SIZE {
            return Err(Rejection::TooLarge { name, size });
        }

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size,
            mime,
        })
    }
}

/// Splits typed input into candidate paths. A line naming one existing path
/// is kept whole so names containing spaces work; otherwise it is split on
/// whitespace. Surrounding quotes (as pasted by some terminals) are dropped.
pub fn parse_paths(input: &str) -> Vec<PathBuf> {
    let trimmed = unquote(input.trim());
    if trimmed.is_empty() {
        return Vec::new();
    }

    let whole = PathBuf::from(trimmed);
    if whole.exists() {
        return vec![whole];
    }

    trimmed
        .split_whitespace()
        .map(unquote)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn unquote(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'')
}
