//! Interactive XAFS sample preparation calculator.
//!
//! ```sh
//! xafsprep --table data/elam.bin.zst
//! RUST_LOG=debug xafsprep --config xafsprep.toml
//! ```

mod config;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use xafsprep::{ElamTable, Session};

#[derive(Parser)]
#[command(name = "xafsprep")]
#[command(about = "XAFS Sample Prep Calculator: pellet mass and BN dilution")]
#[command(version)]
struct Cli {
    /// TOML config file (defaults to ./xafsprep.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Cross-section table: compiled `.bin.zst` blob or raw Elam `.dat` file.
    #[arg(short, long)]
    table: Option<PathBuf>,
    /// Directory for written sample reports.
    #[arg(short, long)]
    samples_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let file = config::discover(cli.config.as_deref())?;
    let settings = config::resolve(
        file,
        config::Overrides {
            table: cli.table,
            samples_dir: cli.samples_dir,
        },
    );

    let table = ElamTable::open(&settings.table).with_context(|| {
        format!(
            "could not load cross-section table {} (build one with `xafsprep-generate <elam.dat>` or pass --table)",
            settings.table.display()
        )
    })?;
    info!(
        "loaded {} elements from {}",
        table.len(),
        settings.table.display()
    );

    println!("Welcome to the XAFS Sample Prep Calculator");
    println!(
        "Type 'help' for help, 'quit' to quit, and '{}' to abandon a command at any prompt",
        settings.session.cancel_word
    );
    println!();

    let mut session = Session::new(table, settings.session);
    session.run(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
