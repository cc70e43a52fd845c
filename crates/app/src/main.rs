//! huffzip: command-line Huffman file compressor.
//!
//! Thin wrapper around `huffzip-core`: resolves the configuration, runs one
//! compress or decompress pipeline, prints the run report, and optionally
//! dumps the frequency table or code tree for inspection.

mod config;
mod input_gen;

use config::{Config, Mode};
use huffzip_core::freq::FrequencyTable;
use huffzip_core::tree::HuffmanTree;
use huffzip_core::{compress, decompress, Error};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("run huffzip --help for usage");
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> huffzip_core::Result<()> {
    let input = match (&config.input_file, config.mode) {
        (Some(path), _) => path.clone(),
        (None, Mode::Zip) => generate_sample(config)?,
        (None, Mode::Unzip) => {
            // The parser enforces --in for unzip; surface a stray gap as a
            // missing input rather than panicking
            return Err(Error::InputOpen {
                path: PathBuf::new(),
                source: ErrorKind::NotFound.into(),
            });
        }
    };

    match config.mode {
        Mode::Zip => {
            let report = compress(&input, &config.output_file)?;

            if config.print_report {
                println!("=== Compression ===");
                println!("Input:  {} bytes ({})", report.input_bytes, input.display());
                println!(
                    "Output: {} bytes ({})",
                    report.output_bytes,
                    config.output_file.display()
                );
                println!("Distinct symbols: {}", report.distinct_symbols);
                println!("Pad bits: {}", report.pad_bits);
                println!("Ratio: {:.1}%", report.ratio() * 100.0);
            }

            if config.dump_freq || config.dump_tree {
                let file = File::open(&input).map_err(|e| Error::InputOpen {
                    path: input.clone(),
                    source: e,
                })?;
                let table = FrequencyTable::analyze(BufReader::new(file))?;
                print_dumps(&table, config);
            }
        }
        Mode::Unzip => {
            let report = decompress(&input, &config.output_file)?;

            if config.print_report {
                println!("=== Decompression ===");
                println!("Input:  {} bytes ({})", report.input_bytes, input.display());
                println!(
                    "Output: {} bytes ({})",
                    report.output_bytes,
                    config.output_file.display()
                );
                println!("Distinct symbols: {}", report.distinct_symbols);
            }

            if config.dump_freq || config.dump_tree {
                let table = container_table(&input)?;
                print_dumps(&table, config);
            }
        }
    }

    Ok(())
}

/// Write a seeded sample file and return its path.
fn generate_sample(config: &Config) -> huffzip_core::Result<PathBuf> {
    let path = PathBuf::from("./sample.bin");
    println!(
        "no input given: writing {} sample bytes to {} (seed {})",
        config.sample_bytes,
        path.display(),
        config.seed
    );
    input_gen::write_sample_file(&path, config.seed, config.sample_bytes)?;
    Ok(path)
}

/// Re-read the frequency table stored in a container header.
fn container_table(path: &Path) -> huffzip_core::Result<FrequencyTable> {
    let file = File::open(path).map_err(|e| Error::InputOpen {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);

    let mut pad_byte = [0u8; 1];
    reader.read_exact(&mut pad_byte)?;
    FrequencyTable::read_from(&mut reader)
}

/// Print the requested diagnostic dumps for a frequency table.
fn print_dumps(table: &FrequencyTable, config: &Config) {
    if config.dump_freq {
        println!("=== Frequency Table ===");
        print!("{}", table.render());
    }

    if config.dump_tree {
        match HuffmanTree::from_frequencies(table) {
            Some(tree) => {
                println!("=== Code Tree ===");
                print!("{}", tree.render());
            }
            None => println!("(empty input: no code tree)"),
        }
    }
}
