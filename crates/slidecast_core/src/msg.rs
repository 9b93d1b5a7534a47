use std::path::PathBuf;

use crate::{Snapshot, TaskError, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User dropped or picked a file that passed the intake filter.
    FileSubmitted(PathBuf),
    /// User toggled slide extraction (Idle only).
    SlideExtractionToggled(bool),
    /// User toggled audio transcription (Idle only).
    TranscriptionToggled(bool),
    /// Gateway finished the upload request.
    SubmitFinished { result: Result<TaskId, TaskError> },
    /// One poll tick produced a status snapshot.
    SnapshotArrived { token: u64, snapshot: Snapshot },
    /// One poll tick failed; transient unless the token is stale.
    PollFailed { token: u64, error: TaskError },
    /// Presentation-only tick advancing the placeholder message cycle.
    PlaceholderTick,
    /// User clicked the reset affordance on a terminal screen.
    ResetClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
