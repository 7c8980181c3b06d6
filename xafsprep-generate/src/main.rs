//! Compiles an Elam `elam.dat` file into the compressed table loaded by
//! `xafsprep`.
//!
//! ```sh
//! xafsprep-generate XrayDB/data_sources/elam.dat -o data/elam.bin.zst
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, ensure};
use clap::Parser;
use log::info;

use xafsprep_data::{CrossSectionTable, parse_elam};

#[derive(Parser)]
#[command(name = "xafsprep-generate")]
#[command(about = "Compile an Elam data file into a compressed cross-section table")]
#[command(version)]
struct Cli {
    /// Path to `elam.dat` from the XrayDB data sources.
    input: PathBuf,
    /// Output blob path.
    #[arg(short, long, default_value = "data/elam.bin.zst")]
    output: PathBuf,
    /// zstd compression level.
    #[arg(long, default_value_t = 19)]
    level: i32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Parsing {:?}...", cli.input);
    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let table = parse_elam(&text).with_context(|| format!("in {}", cli.input.display()))?;
    ensure!(!table.elements.is_empty(), "no Element blocks found in input");

    println!(
        "  Elam: {} elements, {} levels, {} photo, {} scatter",
        table.elements.len(),
        table.xray_levels.len(),
        table.photoabsorption.len(),
        table.scattering.len(),
    );

    println!("\nSerializing with postcard...");
    let serialized = postcard::to_allocvec(&table)
        .map_err(|e| anyhow!("postcard serialization failed: {e}"))?;
    println!(
        "  Serialized size: {} bytes ({:.2} MB)",
        serialized.len(),
        serialized.len() as f64 / 1_048_576.0
    );

    println!("Compressing with zstd (level {})...", cli.level);
    let compressed =
        zstd::encode_all(&serialized[..], cli.level).context("zstd compression failed")?;
    println!(
        "  Compressed size: {} bytes ({:.2} MB), ratio {:.1}x",
        compressed.len(),
        compressed.len() as f64 / 1_048_576.0,
        serialized.len() as f64 / compressed.len() as f64
    );

    if let Some(parent) = cli.output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&cli.output, &compressed)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    println!("\nWrote {:?}", cli.output);

    println!("Verifying round-trip deserialization...");
    let decompressed = zstd::decode_all(&compressed[..]).context("zstd decompression failed")?;
    ensure!(
        decompressed.len() == serialized.len(),
        "round-trip size mismatch: {} != {}",
        decompressed.len(),
        serialized.len()
    );
    let round_trip: CrossSectionTable = postcard::from_bytes(&decompressed)
        .map_err(|e| anyhow!("postcard deserialization failed: {e}"))?;
    ensure!(
        round_trip.elements.len() == table.elements.len(),
        "round-trip element count mismatch"
    );
    info!("round trip verified for {} elements", round_trip.elements.len());
    println!("  Round-trip OK!");
    Ok(())
}
