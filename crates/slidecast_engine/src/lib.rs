//! Slidecast engine: remote job gateway and poll-loop execution.
mod gateway;
mod handle;
mod resolve;
mod types;

pub use gateway::{GatewaySettings, JobGateway, ReqwestGateway};
pub use handle::{GatewayEvent, GatewayHandle};
pub use resolve::resolve_artifact_url;
pub use types::{GatewayError, RemoteStatus, StatusSnapshot, TaskHandle, UploadOptions};
