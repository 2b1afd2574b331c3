use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use maze_core::{ReplayResult, replay_to_end};
use tools::{load_catalog, load_config, load_journal_from_file};
use tracing::info;

/// Replays a recorded JSONL input journal and prints the resulting session summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSONL file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// TOML session config the journal was recorded with
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// JSON question catalog the journal was recorded with
    #[arg(short = 'q', long)]
    catalog: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let catalog = load_catalog(args.catalog.as_deref())?;
    let loaded = load_journal_from_file(&args.journal)
        .with_context(|| format!("failed to load journal: {}", args.journal.display()))?;
    info!(
        seed = loaded.journal.seed,
        inputs = loaded.journal.inputs.len(),
        last_sha256 = %loaded.last_sha256_hex,
        "journal loaded"
    );

    let result: ReplayResult = replay_to_end(&config, &catalog, &loaded.journal)
        .context("replay failed during execution")?;

    println!("Replay complete.");
    println!("Elapsed: {} ms", result.elapsed_ms);
    println!(
        "Progress: stage {} score {} lives {}",
        result.final_progress.stage, result.final_progress.score, result.final_progress.lives
    );
    println!(
        "Stages advanced: {}, lives lost: {}, resets: {}",
        result.stages_advanced, result.lives_lost, result.resets
    );
    println!("Final stage id: {}", result.final_stage_id.0);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
