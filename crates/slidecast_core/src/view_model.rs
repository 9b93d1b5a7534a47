use crate::TaskPhase;

/// Cyclic fallback shown while the remote task sends no stage message.
/// Advanced by `Msg::PlaceholderTick` on a presentation-only timer.
pub const PLACEHOLDER_MESSAGES: &[&str] = &[
    "Crunching video frames...",
    "Detecting slide transitions...",
    "Transcribing the audio track...",
    "Still working, hang tight...",
];

/// One downloadable artifact offered on the success screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOffer {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskViewModel {
    pub phase: TaskPhase,
    /// Latest reported progress, 0 before the first snapshot.
    pub percent: u8,
    /// Latest stage message, or the current placeholder when empty.
    pub status_line: String,
    /// Download offers; populated only in `Success`, may be empty ("no output").
    pub downloads: Vec<DownloadOffer>,
    pub error: Option<String>,
    /// Distinct consecutive stage messages, in arrival order.
    pub activity_log: Vec<String>,
    pub can_reset: bool,
    pub dirty: bool,
}
