//! Handling of the analysis service's upload response.
//!
//! The transport itself lives outside this crate. Callers hand over whether the request
//! succeeded plus the response body; [`ingest_upload`] decides whether the store is updated.
//! A failed upload never replaces previously stored metadata.

use crate::model::ReportMetadata;
use crate::store::{KeyValueStore, MetadataStore, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SUCCESS_MESSAGE: &str = "File processed successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to upload the file.";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("analysis service rejected the upload: {message}")]
    Rejected { message: String },

    #[error("upload response is not valid report JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("upload response carries no report metadata: {message}")]
    MissingMetadata { message: String },

    #[error("report metadata has no pages")]
    NoPages,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// `{ "message": ..., "report_metadata": ... }` as returned by the analysis service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub report_metadata: Option<ReportMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadOutcome {
    pub status: UploadStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        self.status == UploadStatus::Success
    }
}

fn service_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

/// Decodes either the service envelope or a bare [`ReportMetadata`] document.
pub fn decode_upload_response(body: &str) -> Result<ReportMetadata, UploadError> {
    let value: Value = serde_json::from_str(body)?;
    let metadata = if value.get("pages").is_some() {
        ReportMetadata::deserialize(value)?
    } else {
        let response = UploadResponse::deserialize(value)?;
        match response.report_metadata {
            Some(metadata) => metadata,
            None => {
                return Err(UploadError::MissingMetadata {
                    message: response
                        .message
                        .unwrap_or_else(|| "no message".to_string()),
                });
            }
        }
    };
    if metadata.pages.is_empty() {
        return Err(UploadError::NoPages);
    }
    Ok(metadata)
}

pub fn try_ingest_upload<S: KeyValueStore>(
    store: &mut MetadataStore<S>,
    transport_ok: bool,
    body: &str,
) -> Result<ReportMetadata, UploadError> {
    if !transport_ok {
        return Err(UploadError::Rejected {
            message: service_message(body).unwrap_or_else(|| "request failed".to_string()),
        });
    }
    let metadata = decode_upload_response(body)?;
    store.save(&metadata)?;
    Ok(metadata)
}

/// Applies an upload response to the store and reports a two-state status.
pub fn ingest_upload<S: KeyValueStore>(
    store: &mut MetadataStore<S>,
    transport_ok: bool,
    body: &str,
) -> UploadOutcome {
    match try_ingest_upload(store, transport_ok, body) {
        Ok(metadata) => {
            tracing::debug!(
                pages = metadata.pages.len(),
                visuals = metadata.visual_count(),
                "stored uploaded report metadata"
            );
            UploadOutcome {
                status: UploadStatus::Success,
                message: SUCCESS_MESSAGE.to_string(),
                detail: None,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "upload failed; keeping previously stored metadata");
            UploadOutcome {
                status: UploadStatus::Error,
                message: FAILURE_MESSAGE.to_string(),
                detail: Some(err.to_string()),
            }
        }
    }
}
