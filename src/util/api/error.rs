use thiserror::Error;

/// Failures of a single call to the Q&A service. Nothing here is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    /// A 2xx response whose body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Could not read {path}: {reason}")]
    File { path: String, reason: String },
}

impl ApiError {
    /// Message supplied by the server, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Pulls `detail` out of an error body such as `{"detail": "index not found"}`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .filter(|detail| !detail.trim().is_empty());

        ApiError::Server { status, detail }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_from_json_body() {
        let error = ApiError::from_status(404, r#"{"detail": "index not found"}"#);
        assert_eq!(error.detail(), Some("index not found"));
        assert_eq!(error.to_string(), "Server error 404: index not found");
    }

    #[test]
    fn test_non_string_detail_is_ignored() {
        let error = ApiError::from_status(422, r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#);
        assert_eq!(error.detail(), None);
    }

    #[test]
    fn test_plain_text_body() {
        let error = ApiError::from_status(502, "Bad Gateway");
        assert_eq!(error, ApiError::Server { status: 502, detail: None });
    }

    #[test]
    fn test_network_has_no_detail() {
        assert_eq!(ApiError::Network("connection refused".into()).detail(), None);
    }
}
