use std::io::Write;
use std::path::PathBuf;

use bellring::prelude::*;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Round/break training timer in the terminal.
///
/// Type `start`, `pause`, `reset`, `skip`, `status` or `quit` and press
/// enter to control the timer.
#[derive(Parser, Debug)]
#[command(name = "terminal-timer", version)]
struct Args {
    /// JSON configuration file. Overrides the individual flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds per round.
    #[arg(long, default_value_t = 180)]
    round_secs: u32,

    /// Seconds per break.
    #[arg(long, default_value_t = 60)]
    break_secs: u32,

    /// Number of rounds.
    #[arg(long, default_value_t = 3)]
    rounds: u32,

    /// Countdown before the first round.
    #[arg(long, default_value_t = 10)]
    delay_secs: u32,

    /// Disable the ten-second warning bell.
    #[arg(long)]
    no_warning: bool,

    /// Start counting down immediately.
    #[arg(long)]
    autostart: bool,
}

impl Args {
    fn configuration(&self) -> Result<Configuration, BellringError> {
        if let Some(path) = &self.config {
            let json = std::fs::read_to_string(path)?;
            return Ok(Configuration::from_json(&json)?);
        }
        let config = Configuration {
            round_duration_secs: self.round_secs,
            break_duration_secs: self.break_secs,
            total_rounds: self.rounds,
            warning_bell_enabled: !self.no_warning,
            initial_delay_secs: self.delay_secs,
        };
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Terminal capabilities
// ---------------------------------------------------------------------------

struct TerminalPresenter {
    total_rounds: u32,
    skip_visible: bool,
}

fn display_line(status: &str, round: u32, total: u32, secs: u32) -> String {
    format!("{status:<16} {:<14} {}", round_label(round, total), format_clock(secs))
}

impl Presenter for TerminalPresenter {
    fn update_display(&mut self, status: &str, round: u32, time_left_secs: u32) {
        println!("{}", display_line(status, round, self.total_rounds, time_left_secs));
    }

    fn set_skip_button_visible(&mut self, visible: bool) {
        if visible && !self.skip_visible {
            println!("  (type `skip` to skip the break)");
        }
        self.skip_visible = visible;
    }

    fn set_start_button_label(&mut self, label: StartLabel) {
        tracing::debug!(label = label.as_str(), "start control relabelled");
    }
}

/// Rings the terminal bell.
struct ConsoleBell;

impl AudioCueSource for ConsoleBell {
    fn play(&mut self, bell: Bell) -> Result<(), AudioError> {
        let rings = match bell {
            Bell::RoundStart => 1,
            Bell::Warning => 2,
            Bell::RoundEnd | Bell::SessionEnd => 3,
        };
        tracing::info!(?bell, "bell");
        let mut out = std::io::stdout();
        out.write_all("\x07".repeat(rings).as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| AudioError(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), BellringError> {
    init_tracing("info");
    let args = Args::parse();
    let config = args.configuration()?;

    let presenter = TerminalPresenter {
        total_rounds: config.total_rounds,
        skip_visible: false,
    };
    let handle = spawn_session(config, presenter, ConsoleBell, SessionConfig::default())?;
    if args.autostart {
        handle.start().await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "start" | "s" => handle.start().await?,
            "pause" | "p" => handle.pause().await?,
            "reset" | "r" => handle.reset().await?,
            "skip" | "k" => handle.skip_break().await?,
            "status" => {
                let snap = handle.snapshot().await?;
                println!(
                    "{} ({})",
                    display_line(
                        snap.state.phase.status(),
                        snap.state.current_round,
                        snap.config.total_rounds,
                        snap.state.time_left_secs,
                    ),
                    if snap.state.running { "running" } else { "stopped" }
                );
            }
            "quit" | "q" => break,
            "" => {}
            other => tracing::warn!(command = other, "unknown command"),
        }
    }

    handle.shutdown().await?;
    Ok(())
}
