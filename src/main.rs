//! svev: structural-variant evidence printer
//!
//! Usage: svev --evidence-file <PATH> -O <PATH> [-L <INTERVAL>]... [OPTIONS]

use clap::Parser;
use log::debug;
use std::path::PathBuf;
use std::process;

use svev::commands::PrintEvidenceCommand;
use svev::config::DEFAULT_COMPRESSION_LEVEL;
use svev::error::EvidenceError;
use svev::genome::SequenceDictionary;
use svev::interval::collect_intervals;

#[derive(Parser)]
#[command(name = "svev")]
#[command(version)]
#[command(about = "Prints SV evidence records, optionally restricted to intervals", long_about = None)]
struct Cli {
    /// Input file with extension '.SR.txt', '.PE.txt', '.BAF.txt', or '.RD.txt' (may be gzipped)
    #[arg(long = "evidence-file")]
    evidence_file: PathBuf,

    /// Output file. Filenames ending in '.gz' will be block compressed and indexed
    #[arg(short = 'O', long = "output")]
    output: PathBuf,

    /// Interval to print: a region (chr1:100-200), a .bed file or an interval list (repeatable)
    #[arg(short = 'L', long = "intervals")]
    intervals: Vec<String>,

    /// Output compression level (0-9)
    #[arg(long = "compression-level", default_value_t = DEFAULT_COMPRESSION_LEVEL)]
    compression_level: u32,

    /// Sequence dictionary (.dict, .fai or two-column contig/length file)
    #[arg(long = "sequence-dictionary")]
    sequence_dictionary: Option<PathBuf>,

    /// Print traversal statistics to stderr
    #[arg(long)]
    stats: bool,
}

fn init_logging() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), EvidenceError> {
    let dictionary = cli
        .sequence_dictionary
        .as_ref()
        .map(SequenceDictionary::from_file)
        .transpose()?;
    if let Some(ref dict) = dictionary {
        debug!("Loaded sequence dictionary with {} contigs", dict.len());
    }

    let intervals = collect_intervals(&cli.intervals, dictionary.as_ref())?;
    debug!("Resolved {} intervals", intervals.len());

    let mut cmd = PrintEvidenceCommand::new()
        .with_intervals(intervals)
        .with_compression_level(cli.compression_level);
    if let Some(dict) = dictionary {
        cmd = cmd.with_dictionary(dict);
    }

    let stats = cmd.run(&cli.evidence_file, &cli.output)?;

    if cli.stats {
        eprintln!("Print evidence stats: {}", stats);
    }

    Ok(())
}
