//! spraypaint: static Huffman file compressor.
//!
//! Three modes:
//! - `compress <input> <output>`: whole-file Huffman compression
//! - `decompress <input> <output>`: the inverse
//! - `generate <output>`: write a seeded sample file for experimentation
//!
//! Bad arguments print usage and exit 0; runtime failures (unreadable
//! input, corrupted container) are fatal and exit nonzero.

mod config;
mod input_gen;

use config::{Config, Mode};
use spraypaint_core::pipeline;
use spraypaint_core::stats::Stats;
use std::fs;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            println!();
            config::print_usage();
            std::process::exit(0);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("spraypaint: {}", err);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> spraypaint_core::Result<()> {
    match config.mode {
        Mode::Compress => transform(config, "Compression", pipeline::compress),
        Mode::Decompress => transform(config, "Decompression", pipeline::decompress),
        Mode::Generate => {
            input_gen::write_sample_file(&config.output_file, config.seed, config.size_bytes)?;
            println!(
                "Wrote {} sample bytes to {} (seed {})",
                config.size_bytes,
                config.output_file.display(),
                config.seed
            );
            Ok(())
        }
    }
}

/// Run one whole-file transformation and report on it.
fn transform(
    config: &Config,
    label: &str,
    op: fn(&[u8]) -> spraypaint_core::Result<Vec<u8>>,
) -> spraypaint_core::Result<()> {
    let input_path = config
        .input_file
        .as_ref()
        .expect("compress/decompress always carry an input path");

    let mut stats = Stats::new();
    let input = fs::read(input_path)?;
    let output = op(&input)?;
    fs::write(&config.output_file, &output)?;

    stats.input_bytes = input.len() as u64;
    stats.output_bytes = output.len() as u64;
    stats.complete();

    if config.print_stats {
        stats.print_summary(label);
    }
    Ok(())
}
