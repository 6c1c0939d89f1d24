//! JSON request/response contract for a chunking service.
//!
//! The transport is left to the embedder; this module only fixes the body
//! shapes and the status code each outcome maps to.

use serde::{Deserialize, Serialize};
use tracing::warn;

use webchunker_shared::{ChunkResult, ChunkerError, ErrorKind, ExtractConfig, FetchConfig};

use crate::pipeline::{SilentProgress, chunk_url};

/// Error message for a request without a URL.
pub const URL_REQUIRED: &str = "URL is required";

/// Error message for a URL that fails validation.
pub const INVALID_URL: &str = "Invalid URL format";

/// Error message for any failure after validation.
pub const PROCESSING_FAILED: &str = "Failed to process URL";

/// Request body: `{ "url": "https://..." }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Error body: `{ "error": "...", "details": "...", "status": 404 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable, caller-facing message.
    pub error: String,
    /// Underlying cause, when there is one worth showing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Upstream HTTP status, for failures caused by the target server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Response body for one chunking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChunkResponse {
    Success { success: bool, data: ChunkResult },
    Failure(ErrorBody),
}

impl ChunkResponse {
    pub fn success(data: ChunkResult) -> Self {
        Self::Success {
            success: true,
            data,
        }
    }

    /// Map a pipeline error onto the public error body.
    pub fn from_error(err: &ChunkerError) -> Self {
        let body = match err {
            ChunkerError::MissingUrl => ErrorBody {
                error: URL_REQUIRED.into(),
                details: None,
                status: None,
            },
            ChunkerError::InvalidInput { message } => ErrorBody {
                error: INVALID_URL.into(),
                details: Some(message.clone()),
                status: None,
            },
            other => ErrorBody {
                error: PROCESSING_FAILED.into(),
                details: Some(other.to_string()),
                status: other.status(),
            },
        };
        Self::Failure(body)
    }

    /// HTTP status code a service should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::Failure(body) if body.error == URL_REQUIRED || body.error == INVALID_URL => 400,
            Self::Failure(_) => 500,
        }
    }
}

impl From<webchunker_shared::Result<ChunkResult>> for ChunkResponse {
    fn from(result: webchunker_shared::Result<ChunkResult>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::from_error(&err),
        }
    }
}

/// Handle one request end to end.
pub async fn respond(
    request: &ChunkRequest,
    fetch: &FetchConfig,
    extract: &ExtractConfig,
) -> ChunkResponse {
    let url = request.url.as_deref().unwrap_or_default();
    let result = chunk_url(url, fetch, extract, &SilentProgress).await;

    if let Err(err) = &result {
        if err.kind() != ErrorKind::InvalidInput {
            warn!(url, error = %err, "chunking failed");
        }
    }

    ChunkResponse::from(result)
}
