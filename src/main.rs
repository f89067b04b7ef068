//! Emotion Stroop - color/emotion interference reaction-time task
//!
//! Single-session terminal experiment: practice until accurate, one full
//! pass over all conditions, then remedial passes over incorrect trials.
//! Every main and remedial trial is logged to `{id}_{name}.csv`.

mod cli;
mod config;
mod datalog;
mod error;
mod experiment;
mod logging;

use clap::Parser;
use cli::dialog::StartupDialog;
use cli::display::TerminalPresenter;
use config::ExperimentConfig;
use datalog::{DataLog, ParticipantInfo};
use experiment::condition::Congruence;
use experiment::{ReactionKeys, Session, SessionSummary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "Emotion Stroop")]
#[command(about = "Color/emotion Stroop reaction-time experiment")]
struct Args {
    /// Path to JSON experiment config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Participant ID (skips the startup dialog together with --name)
    #[arg(long)]
    id: Option<String>,

    /// Participant name
    #[arg(long)]
    name: Option<String>,

    /// Directory for the data file (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Trials per practice attempt (overrides config)
    #[arg(short, long)]
    practice_trials: Option<usize>,

    /// RNG seed for condition order, ITIs and key assignment
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory for the trace log
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Trace level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_config(args: &Args) -> Result<ExperimentConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };

    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(n) = args.practice_trials {
        config.practice_trials = n;
    }

    config.validate()?;
    Ok(config)
}

fn print_summary(summary: &SessionSummary) {
    println!("\nSession complete");
    println!(
        "Practice: {} attempt(s), final accuracy {:.0}%",
        summary.practice_attempts,
        summary.practice_accuracy * 100.0
    );
    println!(
        "Main run: {}/{} correct ({:.1}%)",
        summary.main_correct,
        summary.main_trials,
        summary.main_accuracy() * 100.0
    );
    println!(
        "Remedial: {} trial(s) over {} pass(es)",
        summary.remedial_trials, summary.remedial_passes
    );

    if let (Some(congruent), Some(incongruent)) = (
        summary.mean_rt(Congruence::Congruent),
        summary.mean_rt(Congruence::Incongruent),
    ) {
        println!(
            "Mean RT: congruent {:.0} ms | incongruent {:.0} ms",
            congruent * 1000.0,
            incongruent * 1000.0
        );
    }
    if let Some(interference) = summary.interference() {
        println!("Interference: {:+.0} ms", interference * 1000.0);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _log_guard = logging::init_tracing(&args.log_level, &args.log_dir);

    let config = load_config(&args)?;

    let participant = match (&args.id, &args.name) {
        (Some(id), Some(name)) => Some(ParticipantInfo::new(id.clone(), name.clone())),
        _ => StartupDialog::new("颜色辨别实验").ask(args.id.as_deref().unwrap_or("1"))?,
    };
    let Some(participant) = participant else {
        tracing::info!("startup dialog cancelled");
        println!("Cancelled.");
        return Ok(());
    };
    tracing::info!(id = %participant.id, name = %participant.name, "session starting");

    let (log, data_path) = DataLog::create(&config.output_dir, &participant)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let keys = ReactionKeys::counterbalanced(config.reaction_keys, config.quit_key, &mut rng);

    let presenter = TerminalPresenter::open(config.quit_key)?;
    let mut session = Session::new(presenter, keys, log, config, rng);

    match session.run() {
        Ok(()) => {
            let (_, summary) = session.close()?;
            tracing::info!(
                main_accuracy = summary.main_accuracy(),
                remedial_passes = summary.remedial_passes,
                "session finished"
            );
            print_summary(&summary);
            println!("Data written to {}", data_path.display());
            Ok(())
        }
        Err(e) if e.is_abort() => {
            let rows = session.rows_logged();
            // restores the terminal and flushes rows logged so far
            drop(session);
            tracing::warn!(rows, "session aborted");
            println!("\nExperiment aborted after {} logged trial(s).", rows);
            Ok(())
        }
        Err(e) => {
            drop(session);
            tracing::error!(error = %e, "session failed");
            Err(e.into())
        }
    }
}
