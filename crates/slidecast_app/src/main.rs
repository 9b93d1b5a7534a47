mod effects;
mod intake;
mod logging;
mod render;

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use slidecast_core::{update, AppState, Msg, TaskPhase};
use slidecast_engine::{GatewayHandle, GatewaySettings};

use effects::EffectRunner;
use logging::LogDestination;

/// Interval of the presentation-only placeholder cycle; independent of the
/// poll timer owned by the engine.
const PLACEHOLDER_INTERVAL: Duration = Duration::from_millis(1200);

/// Upload a lecture recording and track its processing to completion.
#[derive(Parser, Debug)]
#[command(name = "slidecast", version)]
struct Cli {
    /// Candidate media files; the first accepted one is submitted.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Base origin of the processing service.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server: String,

    /// Skip slide (PPT) extraction.
    #[arg(long)]
    no_slides: bool,

    /// Skip audio transcription.
    #[arg(long)]
    no_transcript: bool,

    /// Also write logs to ./slidecast.log.
    #[arg(long)]
    log_file: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(if cli.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    });

    let file = intake::accept_first_media(&cli.files)
        .context("none of the given paths is a media file")?;

    let settings = GatewaySettings {
        base_url: cli.server.clone(),
        ..GatewaySettings::default()
    };
    let gateway = GatewayHandle::new(settings)?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(gateway, msg_tx.clone());

    // Placeholder-message cycle; never touches task phase.
    thread::spawn(move || {
        while msg_tx.send(Msg::PlaceholderTick).is_ok() {
            thread::sleep(PLACEHOLDER_INTERVAL);
        }
    });

    let mut state = AppState::new();
    if cli.no_slides {
        let (next, _effects) = update(state, Msg::SlideExtractionToggled(false));
        state = next;
    }
    if cli.no_transcript {
        let (next, _effects) = update(state, Msg::TranscriptionToggled(false));
        state = next;
    }

    let (next, effects) = update(state, Msg::FileSubmitted(file));
    state = next;
    if state.phase() == TaskPhase::Idle {
        // Validation rejected the submission before any network call.
        let view = state.view();
        anyhow::bail!(
            "{}",
            view.error.unwrap_or_else(|| "submission rejected".to_string())
        );
    }
    runner.run(effects);
    if state.consume_dirty() {
        render::render(&state.view());
    }

    loop {
        let msg = msg_rx.recv().context("message channel closed")?;
        let (next, effects) = update(state, msg);
        state = next;
        runner.run(effects);
        if state.consume_dirty() {
            render::render(&state.view());
        }
        if let Some(code) = session_outcome(state.phase()) {
            render::render_activity_log(&state.view());
            if code != 0 {
                std::process::exit(code);
            }
            break;
        }
    }

    Ok(())
}

/// Exit code once the tracked session is over, `None` while it is still live.
///
/// `Idle` counts as over here: the loop is only entered after a submission,
/// so reaching `Idle` again means the submission was rejected.
fn session_outcome(phase: TaskPhase) -> Option<i32> {
    match phase {
        TaskPhase::Success => Some(0),
        TaskPhase::Failed | TaskPhase::Idle => Some(1),
        TaskPhase::Uploading | TaskPhase::Processing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_phases_keep_the_loop_running() {
        assert_eq!(session_outcome(TaskPhase::Uploading), None);
        assert_eq!(session_outcome(TaskPhase::Processing), None);
    }

    #[test]
    fn rejected_submission_ends_the_run_with_an_error_code() {
        assert_eq!(session_outcome(TaskPhase::Idle), Some(1));
        assert_eq!(session_outcome(TaskPhase::Failed), Some(1));
    }

    #[test]
    fn success_ends_the_run_cleanly() {
        assert_eq!(session_outcome(TaskPhase::Success), Some(0));
    }
}
