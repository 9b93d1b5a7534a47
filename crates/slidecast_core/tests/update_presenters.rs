use std::path::PathBuf;
use std::sync::Once;

use slidecast_core::{
    update, AppState, Msg, Snapshot, TaskPhase, PLACEHOLDER_MESSAGES,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn snapshot(progress: u8, message: &str) -> Snapshot {
    Snapshot {
        progress,
        message: message.to_string(),
        ..Snapshot::default()
    }
}

fn processing_state() -> AppState {
    let state = AppState::new();
    let (state, _effects) = update(state, Msg::FileSubmitted(PathBuf::from("lecture.mp4")));
    let (state, _effects) = update(
        state,
        Msg::SubmitFinished {
            result: Ok("t1".to_string()),
        },
    );
    state
}

#[test]
fn placeholder_cycles_while_no_message_is_reported() {
    init_logging();
    let mut state = processing_state();
    state.consume_dirty();
    assert_eq!(state.view().status_line, PLACEHOLDER_MESSAGES[0]);

    let (mut state, effects) = update(state, Msg::PlaceholderTick);
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert_eq!(state.view().status_line, PLACEHOLDER_MESSAGES[1]);

    // Full cycle wraps back to the start.
    for _ in 1..PLACEHOLDER_MESSAGES.len() {
        let (next, _effects) = update(state, Msg::PlaceholderTick);
        state = next;
    }
    assert_eq!(state.view().status_line, PLACEHOLDER_MESSAGES[0]);
}

#[test]
fn placeholder_tick_never_overrides_a_real_message() {
    init_logging();
    let state = processing_state();
    let token = state.poll_token();
    let (mut state, _effects) = update(
        state,
        Msg::SnapshotArrived {
            token,
            snapshot: snapshot(30, "extracting audio"),
        },
    );
    state.consume_dirty();

    let (mut state, _effects) = update(state, Msg::PlaceholderTick);
    assert!(!state.consume_dirty());
    assert_eq!(state.view().status_line, "extracting audio");
    assert_eq!(state.phase(), TaskPhase::Processing);
}

#[test]
fn placeholder_tick_does_not_redraw_while_uploading() {
    init_logging();
    let state = AppState::new();
    let (mut state, _effects) = update(state, Msg::FileSubmitted(PathBuf::from("lecture.mp4")));
    assert_eq!(state.phase(), TaskPhase::Uploading);
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::PlaceholderTick);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.phase(), TaskPhase::Uploading);
}

#[test]
fn placeholder_tick_is_inert_outside_a_live_task() {
    init_logging();
    let mut state = AppState::new();
    state.consume_dirty();

    let before = state.clone();
    let (mut state, effects) = update(state, Msg::PlaceholderTick);
    assert_eq!(state, before);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn activity_log_suppresses_immediate_duplicates() {
    init_logging();
    let mut state = processing_state();
    let token = state.poll_token();
    for (progress, message) in [
        (10, "downloading"),
        (20, "downloading"),
        (40, "extracting frames"),
        (50, ""),
        (60, "downloading"),
    ] {
        let (next, _effects) = update(
            state,
            Msg::SnapshotArrived {
                token,
                snapshot: snapshot(progress, message),
            },
        );
        state = next;
    }

    assert_eq!(
        state.view().activity_log,
        vec!["downloading", "extracting frames", "downloading"]
    );
}

#[test]
fn success_offers_every_present_artifact() {
    init_logging();
    let state = processing_state();
    let token = state.poll_token();
    let done = Snapshot {
        result_url: Some("http://cdn.example.com/out.pptx".to_string()),
        transcript_url: Some("http://cdn.example.com/transcript.txt".to_string()),
        ..snapshot(100, "done")
    };
    let (state, _effects) = update(
        state,
        Msg::SnapshotArrived {
            token,
            snapshot: done,
        },
    );

    let view = state.view();
    assert_eq!(view.phase, TaskPhase::Success);
    let labels: Vec<_> = view
        .downloads
        .iter()
        .map(|offer| offer.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Slides (PPTX)", "Transcript"]);
}

#[test]
fn success_without_artifacts_is_the_no_output_affordance() {
    init_logging();
    let state = processing_state();
    let token = state.poll_token();
    let (state, _effects) = update(
        state,
        Msg::SnapshotArrived {
            token,
            snapshot: snapshot(100, "done"),
        },
    );

    let view = state.view();
    assert_eq!(view.phase, TaskPhase::Success);
    assert!(view.downloads.is_empty());
    assert!(view.can_reset);
}

#[test]
fn downloads_are_hidden_outside_success() {
    init_logging();
    let state = processing_state();
    let token = state.poll_token();
    // A transcript URL may appear before completion; it is not offered yet.
    let partial = Snapshot {
        transcript_url: Some("http://cdn.example.com/partial.txt".to_string()),
        ..snapshot(50, "transcribing")
    };
    let (state, _effects) = update(
        state,
        Msg::SnapshotArrived {
            token,
            snapshot: partial,
        },
    );

    assert_eq!(state.phase(), TaskPhase::Processing);
    assert!(state.view().downloads.is_empty());
}
