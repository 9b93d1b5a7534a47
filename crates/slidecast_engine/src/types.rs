use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Identifies one submitted remote task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHandle {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
}

/// Coarse state reported by the remote task runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// One status response, with artifact URLs already resolved to absolute form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: RemoteStatus,
    pub progress: u8,
    pub message: String,
    pub result_url: Option<String>,
    pub transcript_url: Option<String>,
    pub error: Option<String>,
}

impl StatusSnapshot {
    /// Whether the remote task will produce no further snapshots.
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, RemoteStatus::Completed | RemoteStatus::Failed)
    }
}

/// Feature toggles forwarded verbatim as upload form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    pub extract_slides: bool,
    pub transcribe_audio: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Rejected locally before any network call.
    #[error("{0}")]
    Validation(String),
    /// The request produced no response.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {detail}")]
    Server { status: u16, detail: String },
}
