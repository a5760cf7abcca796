//! lyra2pow CLI
//!
//! A command-line tool around the header hash chain.
//!
//! # Commands
//!
//! - `hash` - Hash a hex-encoded 80-byte header
//! - `benchmark` - Run performance benchmark

use std::io::Read;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use lyra2pow::pow_hash;

#[derive(Parser)]
#[command(name = "lyra2pow")]
#[command(version = "0.1.0")]
#[command(about = "Chained memory-hard proof-of-work hash for 80-byte block headers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a hex-encoded 80-byte block header
    Hash {
        /// The header as 160 hex characters (read from stdin if omitted)
        header: Option<String>,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of hashes to compute
        #[arg(short, long, default_value = "200")]
        count: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Hash { header } => cmd_hash(header),
        Commands::Benchmark { count } => cmd_benchmark(count),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn cmd_hash(header: Option<String>) -> anyhow::Result<()> {
    let hex_header = match header {
        Some(h) => h,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read header from stdin")?;
            buf
        }
    };

    let bytes = hex::decode(hex_header.trim()).context("header is not valid hex")?;
    let digest = pow_hash(&bytes)?;
    println!("{}", hex::encode(digest));
    Ok(())
}

fn cmd_benchmark(count: u32) -> anyhow::Result<()> {
    if count == 0 {
        anyhow::bail!("benchmark needs at least one hash");
    }

    let mut header = [0u8; 80];
    let start = Instant::now();
    for nonce in 0..count {
        header[72..80].copy_from_slice(&u64::from(nonce).to_le_bytes());
        let _ = pow_hash(&header)?;
    }
    let elapsed = start.elapsed();

    println!("{count} hashes in {elapsed:?}");
    println!(
        "{:.1} H/s",
        f64::from(count) / elapsed.as_secs_f64()
    );
    Ok(())
}
