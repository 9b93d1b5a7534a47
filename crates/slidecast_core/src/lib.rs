//! Slidecast core: pure task-lifecycle state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, Snapshot, SubmissionOptions, TaskError, TaskId, TaskPhase};
pub use update::update;
pub use view_model::{DownloadOffer, TaskViewModel, PLACEHOLDER_MESSAGES};
