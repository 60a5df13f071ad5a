// src/util/api/mod.rs
//! HTTP client for the document Q&A service. Every call makes exactly one
//! attempt; retrying is left to the caller.

pub mod error;
pub mod types;

use std::path::Path;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::log_debug;

pub use error::ApiError;
pub use types::{
    BatchUploadResponse, FileUploadResult, QueryRequest, QueryResponse, Source, UploadResponse,
};

pub const UPLOAD_PATH: &str = "/api/v1/upload";
pub const BATCH_UPLOAD_PATH: &str = "/api/v1/upload/batch";
pub const QUERY_PATH: &str = "/api/v1/query";
pub const HEALTH_PATH: &str = "/health";

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// A document read into memory, ready for a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub async fn read(path: &Path, name: &str, mime: &str) -> ApiResult<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| ApiError::File {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(name, mime, bytes))
    }

    fn into_part(self) -> ApiResult<multipart::Part> {
        let name = self.name.clone();
        multipart::Part::bytes(self.bytes)
            .file_name(self.name)
            .mime_str(&self.mime)
            .map_err(|e| ApiError::File { path: name, reason: e.to_string() })
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self, file), fields(file = %file.name))]
    pub async fn upload_document(&self, file: UploadFile) -> ApiResult<UploadResponse> {
        let form = multipart::Form::new().part("file", file.into_part()?);

        let response = self.client
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;

        decode(response).await
    }

    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn upload_multiple_documents(&self, files: Vec<UploadFile>) -> ApiResult<BatchUploadResponse> {
        let mut form = multipart::Form::new();
        for file in files {
            form = form.part("files", file.into_part()?);
        }

        let response = self.client
            .post(self.url(BATCH_UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;

        let batch: BatchUploadResponse = decode(response).await?;
        log_debug!(
            "Batch upload: {}/{} succeeded, {} chunks",
            batch.successful_uploads, batch.total_files, batch.total_chunks
        );
        Ok(batch)
    }

    #[instrument(skip(self))]
    pub async fn query_documents(&self, question: &str) -> ApiResult<QueryResponse> {
        let response = self.client
            .post(self.url(QUERY_PATH))
            .json(&QueryRequest { question })
            .send()
            .await?;

        decode(response).await
    }

    /// Liveness probe; any 2xx counts and the body is ignored.
    pub async fn check_health(&self) -> ApiResult<()> {
        let response = self.client
            .get(self.url(HEALTH_PATH))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status.as_u16(), &body))
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url(QUERY_PATH), "http://localhost:8000/api/v1/query");
    }

    #[test]
    fn test_bad_mime_is_rejected() {
        let file = UploadFile::new("a.docx", "not a mime", vec![1, 2, 3]);
        assert!(file.into_part().is_err());
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let result = UploadFile::read(Path::new("/definitely/not/here.docx"), "here.docx", "application/msword").await;
        assert!(matches!(result, Err(ApiError::File { .. })));
    }
}
