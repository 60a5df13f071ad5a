// src/util/api/types.rs
//! Wire types for the document Q&A service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub chunks_count: u32,
}

/// Outcome for a single file inside a batch upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileUploadResult {
    pub filename: String,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub chunks_count: u32,
}

impl FileUploadResult {
    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            success: false,
            error: Some(error.into()),
            document_id: None,
            chunks_count: 0,
        }
    }
}

/// Aggregate batch result. `success` describes the request, not every file:
/// individual entries in `results` may still have failed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchUploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub total_files: u32,
    #[serde(default)]
    pub successful_uploads: u32,
    #[serde(default)]
    pub failed_uploads: u32,
    #[serde(default)]
    pub total_chunks: u32,
    #[serde(default)]
    pub results: Vec<FileUploadResult>,
}

impl BatchUploadResponse {
    pub fn has_failures(&self) -> bool {
        self.failed_uploads > 0 || self.results.iter().any(|r| !r.success)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Source {
    pub content: String,
    /// Relevance in `0.0..=1.0`
    pub score: f64,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub chunk_index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub question: String,
    pub answer: String,
    /// Most relevant first, as ranked by the server
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_with_partial_failure() {
        let json = r#"{
            "success": true,
            "message": "Processed 2 files",
            "total_files": 2,
            "successful_uploads": 1,
            "failed_uploads": 1,
            "total_chunks": 7,
            "results": [
                {"filename": "a.docx", "success": true, "document_id": "doc-1", "chunks_count": 7},
                {"filename": "b.docx", "success": false, "error": "Corrupt file", "chunks_count": 0}
            ]
        }"#;

        let batch: BatchUploadResponse = serde_json::from_str(json).unwrap();
        assert!(batch.success);
        assert!(batch.has_failures());
        assert_eq!(batch.results[0].document_id.as_deref(), Some("doc-1"));
        assert_eq!(batch.results[1].error.as_deref(), Some("Corrupt file"));
        assert_eq!(batch.results[1].document_id, None);
    }

    #[test]
    fn test_source_optional_fields() {
        let json = r#"{"answer": "Paris", "sources": [{"content": "Paris is...", "score": 0.5}]}"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.sources[0].chunk_index, None);
        assert_eq!(response.sources[0].document_id, None);
        assert!(!response.success);
    }

    #[test]
    fn test_query_request_shape() {
        let body = serde_json::to_value(QueryRequest { question: "What?" }).unwrap();
        assert_eq!(body, serde_json::json!({"question": "What?"}));
    }
}
