//! Terminal rendering of the task view model.

use slidecast_core::{TaskPhase, TaskViewModel};

const BAR_WIDTH: usize = 30;

pub fn render(view: &TaskViewModel) {
    match view.phase {
        TaskPhase::Idle => {
            if let Some(error) = &view.error {
                eprintln!("error: {error}");
            }
        }
        TaskPhase::Uploading => {
            println!("Uploading...");
        }
        TaskPhase::Processing => {
            println!(
                "{} {:>3}%  {}",
                bar(view.percent),
                view.percent.min(100),
                view.status_line
            );
        }
        TaskPhase::Success => {
            println!("Processing complete.");
            if view.downloads.is_empty() {
                println!("No output was produced.");
            }
            for offer in &view.downloads {
                println!("  {}: {}", offer.label, offer.url);
            }
        }
        TaskPhase::Failed => {
            if let Some(error) = &view.error {
                eprintln!("{error}");
            } else {
                eprintln!("processing failed");
            }
        }
    }
}

/// Progress bar for the given percentage; values above 100 render full.
fn bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Recap of the stage messages seen during the run.
pub fn render_activity_log(view: &TaskViewModel) {
    if view.activity_log.is_empty() {
        return;
    }
    println!("Stages:");
    for line in &view.activity_log {
        println!("  - {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_clamps_out_of_range_progress() {
        assert_eq!(bar(250), bar(100));
        assert_eq!(bar(100), format!("[{}]", "#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn bar_spans_the_full_width() {
        assert_eq!(bar(0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(bar(50).matches('#').count(), BAR_WIDTH / 2);
    }
}
