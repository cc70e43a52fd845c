//! Configuration for the huffzip command line.
//!
//! Handles parsing command-line arguments and generating sensible defaults.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: `huffzip` with nothing else
//! generates a sample input file and compresses it, printing the seed so
//! the run is reproducible.

use std::path::PathBuf;

/// Which pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Compress a file into a container
    Zip,
    /// Restore a file from a container
    Unzip,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pipeline to run
    pub mode: Mode,

    // === Files ===
    /// Input file path (None = generate a sample, zip mode only)
    pub input_file: Option<PathBuf>,

    /// Output file path
    pub output_file: PathBuf,

    // === Sample generation ===
    /// Seed for sample data (also printed for reproducibility)
    pub seed: u64,

    /// Size of the generated sample in bytes
    pub sample_bytes: usize,

    // === Diagnostics ===
    /// Print the frequency table
    pub dump_freq: bool,

    /// Print the code tree, one leaf per line with its bit path
    pub dump_tree: bool,

    /// Print the run report (sizes, ratio, padding)
    pub print_report: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// The first non-flag argument selects the mode (`zip` or `unzip`,
    /// default `zip`). If --seed is not provided, a time-based seed is used
    /// and printed so the generated sample can be reproduced.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut mode: Option<Mode> = None;
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut dump_freq = false;
        let mut dump_tree = false;
        let mut print_report = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "zip" => {
                    if mode.is_some() {
                        return Err("mode given twice".to_string());
                    }
                    mode = Some(Mode::Zip);
                }
                "unzip" => {
                    if mode.is_some() {
                        return Err("mode given twice".to_string());
                    }
                    mode = Some(Mode::Unzip);
                }
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--sample-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-bytes requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid sample-bytes")?);
                }
                "--dump-freq" => {
                    dump_freq = true;
                }
                "--dump-tree" => {
                    dump_tree = true;
                }
                "--no-report" => {
                    print_report = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        let mode = mode.unwrap_or(Mode::Zip);

        if mode == Mode::Unzip && input_file.is_none() {
            return Err("unzip requires --in <PATH>".to_string());
        }

        // Time-based seed unless pinned
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        let output_file = output_file.unwrap_or_else(|| match (mode, &input_file) {
            (Mode::Zip, Some(path)) => {
                let mut out = path.as_os_str().to_owned();
                out.push(".hz");
                PathBuf::from(out)
            }
            (Mode::Zip, None) => PathBuf::from("./sample.bin.hz"),
            (Mode::Unzip, _) => PathBuf::from("./restored.bin"),
        });

        Ok(Config {
            mode,
            input_file,
            output_file,
            seed,
            sample_bytes: sample_bytes.unwrap_or(256 * 1024),
            dump_freq,
            dump_tree,
            print_report,
        })
    }
}

fn print_help() {
    println!("huffzip: classic-Huffman file compressor");
    println!();
    println!("USAGE:");
    println!("    huffzip [zip|unzip] [OPTIONS]");
    println!();
    println!("MODES:");
    println!("    zip                 Compress --in into a container (default)");
    println!("    unzip               Restore a container back to its original bytes");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>         Input file (zip default: generate a sample)");
    println!("    --out <PATH>        Output file (default: <in>.hz / ./restored.bin)");
    println!();
    println!("    --seed <N>          Seed for sample generation (default: time-based)");
    println!("    --sample-bytes <N>  Generated sample size (default: 262144)");
    println!();
    println!("    --dump-freq         Print the frequency table");
    println!("    --dump-tree         Print the code tree with bit paths");
    println!("    --no-report         Don't print the run report");
    println!("    --help, -h          Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffzip                                  # Compress a generated sample");
    println!("    huffzip zip --in file.bin                # Compress to file.bin.hz");
    println!("    huffzip unzip --in file.bin.hz --out f   # Restore the original");
    println!("    huffzip zip --in file.bin --dump-tree    # Show the code assignment");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, String> {
        let owned: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Config::from_args(&owned)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.mode, Mode::Zip);
        assert!(config.input_file.is_none());
        assert_eq!(config.output_file, PathBuf::from("./sample.bin.hz"));
        assert!(config.print_report);
        assert!(!config.dump_freq);
    }

    #[test]
    fn test_zip_output_derived_from_input() {
        let config = parse(&["zip", "--in", "data/file.bin"]).unwrap();
        assert_eq!(config.output_file, PathBuf::from("data/file.bin.hz"));
    }

    #[test]
    fn test_unzip_requires_input() {
        assert!(parse(&["unzip"]).is_err());

        let config = parse(&["unzip", "--in", "file.bin.hz"]).unwrap();
        assert_eq!(config.mode, Mode::Unzip);
        assert_eq!(config.output_file, PathBuf::from("./restored.bin"));
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = parse(&["zip", "--in", "a", "--out", "b"]).unwrap();
        assert_eq!(config.output_file, PathBuf::from("b"));
    }

    #[test]
    fn test_unknown_argument_rejected() {
        assert!(parse(&["--frobnicate"]).is_err());
    }

    #[test]
    fn test_missing_flag_value_rejected() {
        assert!(parse(&["--in"]).is_err());
        assert!(parse(&["--seed"]).is_err());
    }

    #[test]
    fn test_seed_parsed() {
        let config = parse(&["--seed", "1234"]).unwrap();
        assert_eq!(config.seed, 1234);
    }
}
