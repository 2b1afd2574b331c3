use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use maze_core::{Direction, InputPayload, ProgressionEvent, Session, TileKind};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::{
    JournalWriter, SeedChoice, generate_runtime_seed, load_catalog, load_config,
    load_journal_from_file, resolve_seed,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session seed; a fresh one is generated when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Number of random inputs to feed the session
    #[arg(short, long, default_value_t = 1000)]
    inputs: u32,
    /// Record every input to this JSONL journal for later replay
    #[arg(short, long)]
    journal_out: Option<PathBuf>,
    /// Continue the session recorded in `--journal-out` instead of starting a new file
    #[arg(short, long, requires = "journal_out")]
    resume: bool,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short = 'q', long)]
    catalog: Option<PathBuf>,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

fn random_input(rng: &mut ChaCha8Rng) -> InputPayload {
    if rng.next_u64() % 2 == 0 {
        InputPayload::Step { direction: choose(rng, &Direction::ALL) }
    } else {
        InputPayload::Tick { dt_ms: 1 + (rng.next_u64() % 250) as u32 }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let catalog = load_catalog(args.catalog.as_deref())?;

    let (seed, mut session, mut writer) = match (&args.journal_out, args.resume) {
        (Some(path), true) => {
            let loaded = load_journal_from_file(path)
                .with_context(|| format!("failed to load journal: {}", path.display()))?;
            let recorded = loaded.journal.seed;
            if args.seed.is_some_and(|seed| seed != recorded) {
                bail!("--seed does not match the seed {recorded} recorded in {}", path.display());
            }
            let mut session = Session::new(config, catalog, recorded)?;
            for record in &loaded.journal.inputs {
                session.apply_input(&record.payload);
            }
            info!(seed = recorded, replayed = loaded.next_seq, "resuming recorded session");
            let writer = JournalWriter::resume(path, loaded.last_sha256_hex, loaded.next_seq)
                .with_context(|| format!("failed to reopen journal: {}", path.display()))?;
            (SeedChoice::Cli(recorded), session, Some(writer))
        }
        (path, _) => {
            let seed = resolve_seed(args.seed, generate_runtime_seed());
            let session = Session::new(config, catalog, seed.value())?;
            let writer = match path {
                Some(path) => Some(
                    JournalWriter::create(path, seed.value())
                        .with_context(|| format!("failed to create journal: {}", path.display()))?,
                ),
                None => None,
            };
            (seed, session, writer)
        }
    };
    info!(?seed, inputs = args.inputs, "starting fuzz harness");
    let mut rng = ChaCha8Rng::seed_from_u64(seed.value() ^ session.inputs_applied());

    let mut stages_advanced = 0_u32;
    let mut resets = 0_u32;
    for _ in 0..args.inputs {
        let payload = random_input(&mut rng);
        if let Some(writer) = writer.as_mut() {
            writer.append(&payload).context("failed to append journal record")?;
        }
        for event in session.apply_input(&payload) {
            match event {
                ProgressionEvent::StageAdvanced { .. } => stages_advanced += 1,
                ProgressionEvent::SessionReset { .. } => resets += 1,
                ProgressionEvent::LifeLost { .. } => {}
                ProgressionEvent::Ignored => warn!(?payload, "detector reported a stale overlap"),
            }
        }

        let grid = session.stage().grid();
        ensure!(
            grid.tile_at(session.player_cell()) == TileKind::Floor,
            "invariant failed: player inside wall at {:?}",
            session.player_cell()
        );
        for (_, enemy) in session.stage().enemies() {
            ensure!(
                grid.is_floor(enemy.mover.cell()),
                "invariant failed: enemy inside wall at {:?}",
                enemy.mover.cell()
            );
        }
        let lives = session.progress().lives;
        ensure!((1..=3).contains(&lives), "invariant failed: {lives} lives");
    }

    println!("Fuzzing completed successfully.");
    println!("Seed: {}", seed.value());
    println!("Progress: {:?}", session.progress());
    println!("Stages advanced: {stages_advanced}, resets: {resets}");
    println!("Snapshot Hash: {}", session.snapshot_hash());
    Ok(())
}
