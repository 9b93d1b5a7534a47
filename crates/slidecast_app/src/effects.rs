use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use client_logging::client_info;
use slidecast_core::{Effect, Msg, Snapshot, SubmissionOptions, TaskError};
use slidecast_engine::{
    GatewayError, GatewayEvent, GatewayHandle, RemoteStatus, StatusSnapshot, UploadOptions,
};

/// Bridges the pure core to the gateway: effects out, events back in as msgs.
pub struct EffectRunner {
    gateway: GatewayHandle,
}

impl EffectRunner {
    pub fn new(gateway: GatewayHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { gateway };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit { file, options } => {
                    client_info!(
                        "Submit {} slides={} transcript={}",
                        file.display(),
                        options.extract_slides,
                        options.transcribe_audio
                    );
                    self.gateway.submit(file, map_options(options));
                }
                Effect::StartPolling { task_id, token } => {
                    client_info!("StartPolling task_id={task_id} token={token}");
                    self.gateway.start_polling(task_id, token);
                }
                Effect::StopPolling => {
                    self.gateway.stop_polling();
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let gateway = self.gateway.clone();
        thread::spawn(move || loop {
            if let Some(event) = gateway.try_recv() {
                let msg = match event {
                    GatewayEvent::SubmitCompleted { result } => Msg::SubmitFinished {
                        result: result.map(|handle| handle.id).map_err(map_error),
                    },
                    GatewayEvent::Snapshot { token, result } => match result {
                        Ok(snapshot) => Msg::SnapshotArrived {
                            token,
                            snapshot: map_snapshot(snapshot),
                        },
                        Err(error) => Msg::PollFailed {
                            token,
                            error: map_error(error),
                        },
                    },
                };
                if msg_tx.send(msg).is_err() {
                    return;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_options(options: SubmissionOptions) -> UploadOptions {
    UploadOptions {
        extract_slides: options.extract_slides,
        transcribe_audio: options.transcribe_audio,
    }
}

fn map_error(error: GatewayError) -> TaskError {
    match error {
        GatewayError::Validation(detail) => TaskError::Validation(detail),
        GatewayError::Network(detail) => TaskError::Network(detail),
        GatewayError::Server { status, detail } => TaskError::Server { status, detail },
    }
}

fn map_snapshot(snapshot: StatusSnapshot) -> Snapshot {
    Snapshot {
        progress: snapshot.progress,
        message: snapshot.message,
        result_url: snapshot.result_url,
        transcript_url: snapshot.transcript_url,
        error: snapshot.error,
        failed: snapshot.status == RemoteStatus::Failed,
    }
}
