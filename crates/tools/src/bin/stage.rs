use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use maze_core::{Session, stage_diagram};
use tools::{generate_runtime_seed, load_catalog, load_config, resolve_seed};

/// Prints the first stage of a session as an ASCII diagram.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short = 'q', long)]
    catalog: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let seed = resolve_seed(args.seed, generate_runtime_seed());
    let session = Session::new(
        load_config(args.config.as_deref())?,
        load_catalog(args.catalog.as_deref())?,
        seed.value(),
    )?;
    let stage = session.stage();

    println!("Seed: {}", seed.value());
    println!("Question: {}", stage.question().prompt);
    for (id, pad) in stage.pads() {
        let label = stage.pad_label(id).unwrap_or_default();
        println!("  [{}] {label} at ({}, {})", pad.option_index, pad.cell.x, pad.cell.y);
    }
    println!("Rooms: {}", stage.rooms().len());
    print!("{}", stage_diagram(stage, session.player_cell()));
    Ok(())
}
