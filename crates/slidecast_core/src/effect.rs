use std::path::PathBuf;

use crate::{SubmissionOptions, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upload the file with the chosen options.
    Submit {
        file: PathBuf,
        options: SubmissionOptions,
    },
    /// Begin the poll loop for a freshly submitted task.
    StartPolling { task_id: TaskId, token: u64 },
    /// Cancel any running poll loop; idempotent.
    StopPolling,
}
