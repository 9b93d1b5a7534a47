use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use reqwest::multipart;
use serde::Deserialize;

use crate::resolve::resolve_artifact_url;
use crate::{GatewayError, RemoteStatus, StatusSnapshot, TaskHandle, UploadOptions};

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Base origin of the processing service; empty string means same-origin
    /// artifact paths are left untouched.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Delay between settled poll responses.
    pub poll_interval: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(1000),
        }
    }
}

/// Stateless wrapper over the remote job contract: one submit, one poll.
#[async_trait::async_trait]
pub trait JobGateway: Send + Sync {
    async fn submit(
        &self,
        file: &Path,
        options: UploadOptions,
    ) -> Result<TaskHandle, GatewayError>;

    async fn poll_once(&self, task_id: &str) -> Result<StatusSnapshot, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    settings: GatewaySettings,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.settings.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    task_id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: RemoteStatus,
    #[serde(default)]
    progress: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result_url: Option<String>,
    #[serde(default)]
    transcript_url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait::async_trait]
impl JobGateway for ReqwestGateway {
    async fn submit(
        &self,
        file: &Path,
        options: UploadOptions,
    ) -> Result<TaskHandle, GatewayError> {
        let bytes = tokio::fs::read(file).await.map_err(|err| {
            GatewayError::Validation(format!("cannot read {}: {err}", file.display()))
        })?;
        if bytes.is_empty() {
            return Err(GatewayError::Validation(format!(
                "{} is empty",
                file.display()
            )));
        }

        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload.bin")
            .to_string();
        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name(file_name))
            .text("enable_ppt_extraction", options.extract_slides.to_string())
            .text(
                "enable_audio_transcription",
                options.transcribe_audio.to_string(),
            );

        let response = self
            .client
            .post(self.endpoint("/api/v1/tasks/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(GatewayError::Server {
                status: status.as_u16(),
                detail: error_detail(&body, status),
            });
        }

        let ack: SubmitResponse = serde_json::from_str(&body).map_err(|err| {
            GatewayError::Server {
                status: status.as_u16(),
                detail: format!("malformed upload response: {err}"),
            }
        })?;

        Ok(TaskHandle {
            id: ack.task_id,
            submitted_at: Utc::now(),
        })
    }

    async fn poll_once(&self, task_id: &str) -> Result<StatusSnapshot, GatewayError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/v1/tasks/{task_id}/status")))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(GatewayError::Server {
                status: status.as_u16(),
                detail: error_detail(&body, status),
            });
        }

        let raw: StatusResponse = serde_json::from_str(&body).map_err(|err| {
            GatewayError::Server {
                status: status.as_u16(),
                detail: format!("malformed status response: {err}"),
            }
        })?;

        let origin = &self.settings.base_url;
        Ok(StatusSnapshot {
            status: raw.status,
            progress: raw.progress.clamp(0, 100) as u8,
            message: raw.message,
            result_url: raw
                .result_url
                .map(|path| resolve_artifact_url(origin, &path)),
            transcript_url: raw
                .transcript_url
                .map(|path| resolve_artifact_url(origin, &path)),
            error: raw.error,
        })
    }
}

/// Extracts a human-readable detail from a FastAPI-style error body.
fn error_detail(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|detail| detail.as_str()) {
            return detail.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::Network(format!("request timed out: {err}"));
    }
    GatewayError::Network(err.to_string())
}
