use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use client_logging::{client_debug, client_warn};
use tokio_util::sync::CancellationToken;

use crate::gateway::{GatewaySettings, JobGateway, ReqwestGateway};
use crate::{GatewayError, StatusSnapshot, TaskHandle, UploadOptions};

enum GatewayCommand {
    Submit {
        file: PathBuf,
        options: UploadOptions,
    },
    StartPolling {
        task_id: String,
        token: u64,
    },
    StopPolling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    SubmitCompleted {
        result: Result<TaskHandle, GatewayError>,
    },
    Snapshot {
        token: u64,
        result: Result<StatusSnapshot, GatewayError>,
    },
}

/// Owns the background runtime running the upload and the poll loop.
///
/// At most one poll loop is live at a time: `StartPolling` cancels the
/// previous loop's token before spawning the new one, and dropping the last
/// handle cancels whatever is still running.
#[derive(Clone)]
pub struct GatewayHandle {
    cmd_tx: mpsc::Sender<GatewayCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<GatewayEvent>>>,
}

impl GatewayHandle {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let gateway = Arc::new(ReqwestGateway::new(settings.clone())?);
        Ok(Self::with_gateway(gateway, settings.poll_interval))
    }

    /// Seam for tests and alternative transports.
    pub fn with_gateway(gateway: Arc<dyn JobGateway>, poll_interval: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<GatewayEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut active_poll: Option<CancellationToken> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    GatewayCommand::Submit { file, options } => {
                        let gateway = gateway.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = gateway.submit(&file, options).await;
                            let _ = event_tx.send(GatewayEvent::SubmitCompleted { result });
                        });
                    }
                    GatewayCommand::StartPolling { task_id, token } => {
                        if let Some(previous) = active_poll.take() {
                            client_warn!("Superseding a live poll loop for task {task_id}");
                            previous.cancel();
                        }
                        let cancel = CancellationToken::new();
                        active_poll = Some(cancel.clone());
                        let gateway = gateway.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(poll_loop(
                            gateway,
                            task_id,
                            token,
                            poll_interval,
                            cancel,
                            event_tx,
                        ));
                    }
                    GatewayCommand::StopPolling => {
                        if let Some(active) = active_poll.take() {
                            active.cancel();
                        }
                    }
                }
            }

            // Command channel closed: every handle is gone, stop polling.
            if let Some(active) = active_poll.take() {
                active.cancel();
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn submit(&self, file: impl Into<PathBuf>, options: UploadOptions) {
        let _ = self.cmd_tx.send(GatewayCommand::Submit {
            file: file.into(),
            options,
        });
    }

    pub fn start_polling(&self, task_id: impl Into<String>, token: u64) {
        let _ = self.cmd_tx.send(GatewayCommand::StartPolling {
            task_id: task_id.into(),
            token,
        });
    }

    pub fn stop_polling(&self) {
        let _ = self.cmd_tx.send(GatewayCommand::StopPolling);
    }

    pub fn try_recv(&self) -> Option<GatewayEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

/// Strictly sequential poll loop: the next tick is armed only after the
/// previous response settles, so snapshots can never race each other.
async fn poll_loop(
    gateway: Arc<dyn JobGateway>,
    task_id: String,
    token: u64,
    interval: Duration,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<GatewayEvent>,
) {
    loop {
        if cancel.is_cancelled() {
            return;
        }
        let result = gateway.poll_once(&task_id).await;
        // A cancellation landing mid-request discards the in-flight result.
        if cancel.is_cancelled() {
            client_debug!("Dropping in-flight snapshot for cancelled task {task_id}");
            return;
        }
        let terminal = matches!(&result, Ok(snapshot) if snapshot.is_terminal());
        if event_tx.send(GatewayEvent::Snapshot { token, result }).is_err() {
            return;
        }
        if terminal {
            return;
        }
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(interval) => {}
        }
    }
}
