//! Terminal sink implementations and trace printing.

use pagesim_core::{History, Page, Policy, Statistics, StepSnapshot};
use pagesim_playback::{DisplaySink, Severity, StatusSink};
use tracing::debug;

/// Renders each snapshot as one line of frame contents, marking the
/// slot that changed since the previous snapshot.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl DisplaySink for TerminalDisplay {
    fn render(
        &mut self,
        previous: Option<&StepSnapshot>,
        current: &StepSnapshot,
        reference_string: &[Page],
        policy: Policy,
    ) {
        println!(
            "[{policy}] step {:>2}/{}  page {:>2}  {}  {}",
            current.step + 1,
            reference_string.len(),
            current.page,
            outcome_tag(current),
            format_frames(current, previous),
        );
    }
}

/// Prints status updates and the execution log to stdout, keeping the
/// latest statistics for a summary line on completion.
#[derive(Debug, Default)]
pub struct TerminalStatus {
    latest: Option<Statistics>,
}

impl StatusSink for TerminalStatus {
    fn update_statistics(&mut self, stats: &Statistics, _step: usize, _total_steps: usize) {
        self.latest = Some(*stats);
    }

    fn set_message(&mut self, text: &str, severity: Severity) {
        let prefix = match severity {
            Severity::Info => "info",
            Severity::Error => "error",
            Severity::Success => "ok",
        };
        println!("[{prefix}] {text}");
        if severity == Severity::Success {
            if let Some(stats) = self.latest {
                println!("[ok] {}", format_stats(&stats));
            }
        }
    }

    fn append_log(&mut self, text: &str) {
        println!("  | {text}");
    }

    fn clear_log(&mut self) {
        println!("  --- log cleared, replaying from the start ---");
    }

    fn set_controls_enabled(&mut self, running: bool) {
        debug!(running, "playback control lock changed");
    }
}

fn outcome_tag(snapshot: &StepSnapshot) -> &'static str {
    if snapshot.hit {
        "hit  "
    } else if snapshot.evicted.is_some() {
        "evict"
    } else {
        "fault"
    }
}

/// `[ 2* 0  1 ]` — a `*` marks the slot this step changed.
fn format_frames(current: &StepSnapshot, previous: Option<&StepSnapshot>) -> String {
    let cells: Vec<String> = current
        .frames
        .slots()
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let changed = match previous {
                Some(prev) => prev.frames.slots()[index] != *slot,
                None => slot.is_some(),
            };
            let cell = match slot {
                Some(page) => page.to_string(),
                None => "-".to_string(),
            };
            if changed {
                format!("{cell}*")
            } else {
                cell
            }
        })
        .collect();
    let mut row = format!("[ {} ]", cells.join("  "));
    if let Some(victim) = current.evicted {
        row.push_str(&format!("  evicted {victim}"));
    }
    row
}

fn format_stats(stats: &Statistics) -> String {
    format!(
        "{} references: {} hits, {} faults ({:.0}% hit ratio)",
        stats.total,
        stats.hits,
        stats.faults,
        stats.hit_ratio() * 100.0
    )
}

/// Print a full trace, one row per step, followed by a summary.
pub fn print_trace(history: &History) {
    println!(
        "policy {}  frames {}  reference string {:?}",
        history.policy(),
        history.frame_count(),
        history.reference_string()
    );
    let mut previous: Option<&StepSnapshot> = None;
    for step in history.steps() {
        println!(
            "step {:>2}  page {:>2}  {}  {}",
            step.step + 1,
            step.page,
            outcome_tag(step),
            format_frames(step, previous),
        );
        previous = Some(step);
    }
    println!("{}", format_stats(&history.final_stats()));
}

/// Print fault counts for every policy on the same input.
pub fn print_comparison(results: &[(Policy, Statistics)]) {
    println!("{:<8}  {:>6}  {:>6}  {:>9}", "policy", "hits", "faults", "hit ratio");
    for (policy, stats) in results {
        println!(
            "{:<8}  {:>6}  {:>6}  {:>8.0}%",
            policy.to_string(),
            stats.hits,
            stats.faults,
            stats.hit_ratio() * 100.0
        );
    }
}
