//! Configuration for the spraypaint command line.
//!
//! The surface is positional: `spraypaint <mode> <input> <output>` for
//! compression and decompression, plus a `generate` mode that writes a
//! seeded sample file for trying the compressor out.
//!
//! Invalid argument count or an unrecognized mode prints usage and exits 0;
//! an unreadable input path is reported later as a fatal error.

use std::path::PathBuf;

/// What the invocation asks the tool to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
    Generate,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected mode
    pub mode: Mode,

    /// Input file path (absent for `generate`)
    pub input_file: Option<PathBuf>,

    /// Output file path
    pub output_file: PathBuf,

    /// Seed for sample generation (`generate` only)
    pub seed: u64,

    /// Sample size in bytes (`generate` only)
    pub size_bytes: usize,

    /// Whether to print the run summary
    pub print_stats: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name
    /// already stripped).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        if args.iter().any(|a| a == "--help" || a == "-h") {
            print_usage();
            std::process::exit(0);
        }

        let mode = match args.first().map(String::as_str) {
            Some("compress") => Mode::Compress,
            Some("decompress") => Mode::Decompress,
            Some("generate") => Mode::Generate,
            Some(other) => return Err(format!("unrecognized mode: {}", other)),
            None => return Err("missing mode".to_string()),
        };

        let mut positional: Vec<PathBuf> = Vec::new();
        let mut seed: Option<u64> = None;
        let mut size_bytes: Option<usize> = None;
        let mut print_stats = true;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--size" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--size requires a number".to_string());
                    }
                    size_bytes = Some(args[i].parse().map_err(|_| "invalid size")?);
                }
                "--no-stats" => {
                    print_stats = false;
                }
                arg if arg.starts_with("--") => {
                    return Err(format!("unknown argument: {}", arg));
                }
                path => {
                    positional.push(PathBuf::from(path));
                }
            }
            i += 1;
        }

        let (input_file, output_file) = match mode {
            Mode::Compress | Mode::Decompress => {
                if positional.len() != 2 {
                    return Err(format!(
                        "{} takes exactly <input> <output>, got {} path(s)",
                        mode_name(mode),
                        positional.len()
                    ));
                }
                let output = positional.pop().expect("length checked");
                let input = positional.pop().expect("length checked");
                (Some(input), output)
            }
            Mode::Generate => {
                if positional.len() != 1 {
                    return Err(format!(
                        "generate takes exactly <output>, got {} path(s)",
                        positional.len()
                    ));
                }
                (None, positional.pop().expect("length checked"))
            }
        };

        // Time-based seed when none is given; printed so runs can be repeated.
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            mode,
            input_file,
            output_file,
            seed,
            size_bytes: size_bytes.unwrap_or(256 * 1024),
            print_stats,
        })
    }
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Compress => "compress",
        Mode::Decompress => "decompress",
        Mode::Generate => "generate",
    }
}

pub fn print_usage() {
    println!("spraypaint: static Huffman file compressor");
    println!();
    println!("USAGE:");
    println!("    spraypaint compress <input> <output>");
    println!("    spraypaint decompress <input> <output>");
    println!("    spraypaint generate <output> [--seed N] [--size BYTES]");
    println!();
    println!("OPTIONS:");
    println!("    --seed <N>       Seed for sample generation (default: time-based)");
    println!("    --size <BYTES>   Sample size in bytes (default: 262144)");
    println!("    --no-stats       Don't print the run summary");
    println!("    --help, -h       Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    spraypaint compress book.txt book.spry");
    println!("    spraypaint decompress book.spry book.txt");
    println!("    spraypaint generate sample.bin --seed 42 --size 1048576");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compress_args() {
        let config = Config::from_args(&args(&["compress", "in.txt", "out.spry"])).unwrap();
        assert_eq!(config.mode, Mode::Compress);
        assert_eq!(config.input_file, Some(PathBuf::from("in.txt")));
        assert_eq!(config.output_file, PathBuf::from("out.spry"));
        assert!(config.print_stats);
    }

    #[test]
    fn test_decompress_args() {
        let config =
            Config::from_args(&args(&["decompress", "out.spry", "back.txt", "--no-stats"]))
                .unwrap();
        assert_eq!(config.mode, Mode::Decompress);
        assert!(!config.print_stats);
    }

    #[test]
    fn test_generate_args() {
        let config =
            Config::from_args(&args(&["generate", "sample.bin", "--seed", "7", "--size", "512"]))
                .unwrap();
        assert_eq!(config.mode, Mode::Generate);
        assert_eq!(config.input_file, None);
        assert_eq!(config.seed, 7);
        assert_eq!(config.size_bytes, 512);
    }

    #[test]
    fn test_unrecognized_mode() {
        assert!(Config::from_args(&args(&["inflate", "a", "b"])).is_err());
    }

    #[test]
    fn test_missing_mode() {
        assert!(Config::from_args(&[]).is_err());
    }

    #[test]
    fn test_wrong_path_count() {
        assert!(Config::from_args(&args(&["compress", "only-one"])).is_err());
        assert!(Config::from_args(&args(&["compress", "a", "b", "c"])).is_err());
        assert!(Config::from_args(&args(&["generate"])).is_err());
    }

    #[test]
    fn test_unknown_flag() {
        assert!(Config::from_args(&args(&["compress", "a", "b", "--fast"])).is_err());
    }
}
