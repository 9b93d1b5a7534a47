use client_logging::{client_debug, client_warn};

use crate::{AppState, Effect, Msg, TaskError, TaskPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSubmitted(file) => {
            if state.phase() != TaskPhase::Idle {
                client_warn!(
                    "File submission ignored in phase {:?}; one task per session",
                    state.phase()
                );
                return (state, Vec::new());
            }
            if !state.options().any_enabled() {
                state.set_error(TaskError::Validation(
                    "enable slide extraction or transcription before submitting".to_string(),
                ));
                return (state, Vec::new());
            }
            let options = state.options();
            state.begin_upload();
            vec![Effect::Submit { file, options }]
        }
        Msg::SlideExtractionToggled(enabled) => {
            if state.phase() == TaskPhase::Idle {
                state.set_extract_slides(enabled);
            }
            Vec::new()
        }
        Msg::TranscriptionToggled(enabled) => {
            if state.phase() == TaskPhase::Idle {
                state.set_transcribe_audio(enabled);
            }
            Vec::new()
        }
        Msg::SubmitFinished { result } => {
            if state.phase() != TaskPhase::Uploading {
                client_warn!("Submit completion ignored in phase {:?}", state.phase());
                return (state, Vec::new());
            }
            match result {
                Ok(task_id) => {
                    let token = state.begin_processing(task_id.clone());
                    vec![Effect::StartPolling { task_id, token }]
                }
                Err(error) => {
                    client_warn!("Submission failed: {error}");
                    state.fail_submission(error);
                    Vec::new()
                }
            }
        }
        Msg::SnapshotArrived { token, snapshot } => {
            if token != state.poll_token() {
                client_debug!(
                    "Discarding snapshot from superseded poll generation {} (current {})",
                    token,
                    state.poll_token()
                );
                return (state, Vec::new());
            }
            if state.phase() != TaskPhase::Processing {
                client_warn!("Snapshot ignored in phase {:?}", state.phase());
                return (state, Vec::new());
            }
            if let Some(previous) = state.latest() {
                if snapshot.progress < previous.progress {
                    client_debug!(
                        "Progress regressed from {} to {}; applying latest snapshot as-is",
                        previous.progress,
                        snapshot.progress
                    );
                }
            }
            match state.apply_snapshot(snapshot) {
                TaskPhase::Success | TaskPhase::Failed => vec![Effect::StopPolling],
                _ => Vec::new(),
            }
        }
        Msg::PollFailed { token, error } => {
            if token != state.poll_token() {
                client_debug!("Discarding poll error from superseded generation {token}");
            } else {
                // Transient: one missed tick must not abort a healthy task.
                client_warn!("Poll tick failed, continuing: {error}");
            }
            Vec::new()
        }
        Msg::PlaceholderTick => {
            state.advance_placeholder();
            Vec::new()
        }
        Msg::ResetClicked => {
            if !state.phase().is_terminal() {
                client_warn!("Reset rejected in phase {:?}", state.phase());
                return (state, Vec::new());
            }
            state.reset();
            vec![Effect::StopPolling]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
