use std::fmt;

use crate::view_model::{DownloadOffer, TaskViewModel, PLACEHOLDER_MESSAGES};

/// Opaque identifier of one remote processing task.
pub type TaskId = String;

/// Lifecycle phase of the single tracked task.
///
/// Transitions are forward-only except `reset`, which is valid from the two
/// terminal phases and returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskPhase {
    #[default]
    Idle,
    Uploading,
    Processing,
    Success,
    Failed,
}

impl TaskPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskPhase::Success | TaskPhase::Failed)
    }
}

/// One point-in-time status response from the remote task.
///
/// Artifact URLs arrive already resolved to absolute form by the gateway.
/// `progress` is not assumed monotonic across snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub progress: u8,
    pub message: String,
    pub result_url: Option<String>,
    pub transcript_url: Option<String>,
    pub error: Option<String>,
    /// The remote job reported `status = failed`.
    pub failed: bool,
}

impl Snapshot {
    /// Sole completion predicate: full progress or a result artifact present.
    pub fn is_complete(&self) -> bool {
        self.progress >= 100 || self.result_url.is_some()
    }
}

/// Feature toggles forwarded verbatim to the remote job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOptions {
    pub extract_slides: bool,
    pub transcribe_audio: bool,
}

impl Default for SubmissionOptions {
    fn default() -> Self {
        Self {
            extract_slides: true,
            transcribe_audio: true,
        }
    }
}

impl SubmissionOptions {
    pub fn any_enabled(self) -> bool {
        self.extract_slides || self.transcribe_audio
    }
}

/// Displayable error surfaced by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Rejected before any network call (no file, no option enabled).
    Validation(String),
    /// The request produced no response at all.
    Network(String),
    /// The server answered with a non-2xx status.
    Server { status: u16, detail: String },
    /// The remote job itself reported failure; distinct from transport errors.
    Remote(String),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::Validation(detail) => write!(f, "{detail}"),
            TaskError::Network(detail) => write!(f, "no response from server: {detail}"),
            TaskError::Server { status, detail } => {
                write!(f, "server rejected the request (HTTP {status}): {detail}")
            }
            TaskError::Remote(detail) => write!(f, "processing failed: {detail}"),
        }
    }
}

/// Single mutable state of the client session.
///
/// Mutated exclusively through [`crate::update`]; presenters read it via
/// [`AppState::view`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: TaskPhase,
    task_id: Option<TaskId>,
    latest: Option<Snapshot>,
    poll_token: u64,
    last_error: Option<TaskError>,
    options: SubmissionOptions,
    activity_log: Vec<String>,
    placeholder_index: usize,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TaskPhase {
        self.phase
    }

    pub fn options(&self) -> SubmissionOptions {
        self.options
    }

    /// Generation counter guarding against stale poll responses.
    pub fn poll_token(&self) -> u64 {
        self.poll_token
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    /// Returns whether the view changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> TaskViewModel {
        let latest = self.latest.as_ref();
        let percent = latest.map_or(0, |snapshot| snapshot.progress);
        let status_line = match latest.map(|snapshot| snapshot.message.as_str()) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => PLACEHOLDER_MESSAGES[self.placeholder_index % PLACEHOLDER_MESSAGES.len()]
                .to_string(),
        };

        let mut downloads = Vec::new();
        if self.phase == TaskPhase::Success {
            if let Some(url) = latest.and_then(|snapshot| snapshot.result_url.clone()) {
                downloads.push(DownloadOffer {
                    label: "Slides (PPTX)".to_string(),
                    url,
                });
            }
            if let Some(url) = latest.and_then(|snapshot| snapshot.transcript_url.clone()) {
                downloads.push(DownloadOffer {
                    label: "Transcript".to_string(),
                    url,
                });
            }
        }

        TaskViewModel {
            phase: self.phase,
            percent,
            status_line,
            downloads,
            error: self.last_error.as_ref().map(ToString::to_string),
            activity_log: self.activity_log.clone(),
            can_reset: self.phase.is_terminal(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn set_extract_slides(&mut self, enabled: bool) {
        self.options.extract_slides = enabled;
        self.dirty = true;
    }

    pub(crate) fn set_transcribe_audio(&mut self, enabled: bool) {
        self.options.transcribe_audio = enabled;
        self.dirty = true;
    }

    pub(crate) fn set_error(&mut self, error: TaskError) {
        self.last_error = Some(error);
        self.dirty = true;
    }

    pub(crate) fn begin_upload(&mut self) {
        self.phase = TaskPhase::Uploading;
        self.last_error = None;
        self.dirty = true;
    }

    /// Enters `Processing` and opens a new poll generation, returning its token.
    pub(crate) fn begin_processing(&mut self, task_id: TaskId) -> u64 {
        self.poll_token += 1;
        self.phase = TaskPhase::Processing;
        self.task_id = Some(task_id);
        self.dirty = true;
        self.poll_token
    }

    pub(crate) fn fail_submission(&mut self, error: TaskError) {
        self.phase = TaskPhase::Idle;
        self.task_id = None;
        self.last_error = Some(error);
        self.dirty = true;
    }

    /// Stores a snapshot and performs the terminal transition when warranted.
    /// Returns the phase after application.
    pub(crate) fn apply_snapshot(&mut self, snapshot: Snapshot) -> TaskPhase {
        if !snapshot.message.is_empty() && self.activity_log.last() != Some(&snapshot.message) {
            self.activity_log.push(snapshot.message.clone());
        }

        if snapshot.failed {
            self.last_error = Some(TaskError::Remote(
                snapshot
                    .error
                    .clone()
                    .unwrap_or_else(|| "no error detail provided".to_string()),
            ));
            self.phase = TaskPhase::Failed;
        } else if snapshot.is_complete() {
            self.phase = TaskPhase::Success;
        }

        self.latest = Some(snapshot);
        self.dirty = true;
        self.phase
    }

    /// Advances the placeholder cycle; display-only, never touches the phase.
    pub(crate) fn advance_placeholder(&mut self) {
        if !matches!(self.phase, TaskPhase::Uploading | TaskPhase::Processing) {
            return;
        }
        self.placeholder_index = self.placeholder_index.wrapping_add(1);
        // Only redraw when the placeholder is what the user actually sees;
        // the Uploading screen shows a fixed line, so ticks there stay quiet.
        if self.phase == TaskPhase::Processing
            && self
                .latest
                .as_ref()
                .is_none_or(|snapshot| snapshot.message.is_empty())
        {
            self.dirty = true;
        }
    }

    /// Returns to `Idle`, clearing the session and invalidating the token.
    pub(crate) fn reset(&mut self) {
        self.poll_token += 1;
        self.phase = TaskPhase::Idle;
        self.task_id = None;
        self.latest = None;
        self.last_error = None;
        self.activity_log.clear();
        self.placeholder_index = 0;
        self.dirty = true;
    }
}
