//! Command-line front end for the page-replacement simulator.
//!
//! Thin orchestration only: parse and validate input, invoke the
//! engine, and either print the trace (`run`), drive interactive
//! playback (`replay`), or compare policies (`compare`). All
//! algorithmic behavior lives in `pagesim-core` and
//! `pagesim-playback`.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pagesim_core::{simulate, Page, Policy};
use pagesim_playback::{PlaybackController, PlaybackPhase, TimerRequest};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod output;
mod scenario;

use output::{print_comparison, print_trace, TerminalDisplay, TerminalStatus};

#[derive(Parser)]
#[command(name = "pagesim")]
#[command(about = "Deterministic page-replacement policy simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a run and print the complete trace
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// Emit the history as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Replay a run step-by-step with timed playback
    Replay {
        #[command(flatten)]
        input: InputArgs,

        /// Initial playback speed (1 = slowest, 10 = fastest)
        #[arg(long, default_value_t = 5)]
        speed: u8,
    },

    /// Run every policy on the same input and compare fault counts
    Compare {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Reference string, e.g. "7,0,1,2,0,3" (comma or space separated)
    #[arg(short, long)]
    pages: Option<String>,

    /// Number of memory frames (1-10)
    #[arg(short, long, default_value_t = 3)]
    frames: usize,

    /// Replacement policy: fifo, lru, optimal
    #[arg(short = 'P', long, default_value = "fifo")]
    policy: String,

    /// Load input from a TOML scenario file instead
    #[arg(short, long, conflicts_with_all = ["pages", "policy", "frames"])]
    scenario: Option<PathBuf>,
}

/// Fully validated simulation input.
struct RunInput {
    pages: Vec<Page>,
    frames: usize,
    policy: Policy,
    speed: Option<u8>,
}

impl RunInput {
    /// Resolve CLI flags or a scenario file into validated input.
    /// Malformed input is rejected here, before the engine runs.
    fn resolve(args: InputArgs) -> Result<Self> {
        if let Some(path) = args.scenario {
            let scenario = scenario::load_scenario(&path)?;
            let policy: Policy = scenario.policy.parse()?;
            println!("scenario: {}", scenario.name);
            if let Some(description) = &scenario.description {
                println!("  {description}");
            }
            return Ok(Self {
                pages: scenario.reference_string,
                frames: scenario.frames,
                policy,
                speed: scenario.speed,
            });
        }
        let Some(raw) = args.pages else {
            bail!("provide a reference string with --pages or a --scenario file");
        };
        let pages = scenario::parse_pages(&raw)?;
        scenario::validate_input(&pages, args.frames)?;
        let policy: Policy = args.policy.parse()?;
        Ok(Self {
            pages,
            frames: args.frames,
            policy,
            speed: None,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { input, json } => {
            let input = RunInput::resolve(input)?;
            let history = simulate(&input.pages, input.frames, input.policy);
            if json {
                let rendered = serde_json::to_string_pretty(&history)
                    .context("failed to serialize history")?;
                println!("{rendered}");
            } else {
                print_trace(&history);
            }
        }
        Commands::Replay { input, speed } => {
            let input = RunInput::resolve(input)?;
            replay(input, speed).await?;
        }
        Commands::Compare { input } => {
            let input = RunInput::resolve(input)?;
            let results: Vec<_> = Policy::ALL
                .iter()
                .map(|&policy| {
                    let stats = simulate(&input.pages, input.frames, policy).final_stats();
                    (policy, stats)
                })
                .collect();
            print_comparison(&results);
        }
    }
    Ok(())
}

/// Interactive playback: a stdin command loop multiplexed with the
/// controller's advance timer.
async fn replay(input: RunInput, speed: u8) -> Result<()> {
    let history = simulate(&input.pages, input.frames, input.policy);
    let mut controller =
        PlaybackController::new(history, TerminalDisplay::default(), TerminalStatus::default());
    controller.set_speed(input.speed.unwrap_or(speed));

    println!("commands: play, pause, next, back, speed <1-10>, quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<TimerRequest> = None;

    loop {
        // A dummy long sleep keeps the disabled branch's future valid.
        let delay = pending.map_or(Duration::from_secs(3600), |request| request.delay);
        tokio::select! {
            _ = tokio::time::sleep(delay), if pending.is_some() => {
                if let Some(request) = pending.take() {
                    pending = controller.on_timer(request);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if !handle_command(&mut controller, &mut pending, line.trim()) {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Apply one REPL command; returns false on quit.
fn handle_command(
    controller: &mut PlaybackController<TerminalDisplay, TerminalStatus>,
    pending: &mut Option<TimerRequest>,
    command: &str,
) -> bool {
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("play") | Some("p"), _) => {
            if controller.phase() != PlaybackPhase::Playing {
                *pending = controller.play();
            }
        }
        (Some("pause"), _) => {
            controller.pause();
            *pending = None;
        }
        (Some("next") | Some("n"), _) => {
            controller.step_forward();
            *pending = None;
        }
        (Some("back") | Some("b"), _) => {
            controller.step_backward();
            *pending = None;
        }
        (Some("speed"), Some(value)) => match value.parse::<u8>() {
            Ok(value) => {
                controller.set_speed(value);
                // Re-arm so the change shows up on the next advance.
                if pending.is_some() {
                    *pending = controller.timer_request();
                }
            }
            Err(_) => println!("speed takes a number from 1 to 10"),
        },
        (Some("quit") | Some("q"), _) => return false,
        (None, _) => {}
        (Some(other), _) => println!("unknown command '{other}'"),
    }
    true
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
