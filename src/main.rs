mod fasta;
mod record;
mod repeat_scan;
mod telomere_filter;

use anyhow::Result;
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::fasta::open_fasta_input;
use crate::telomere_filter::{ScanConfig, TelomereFilter};

/// Parse a base count that may have a metric suffix (k/K=1000, m/M=1e6, g/G=1e9)
fn parse_metric_number(s: &str) -> Result<usize, String> {
    if s.is_empty() {
        return Err("Empty string".to_string());
    }

    let (num_part, suffix) = if s.ends_with(|c: char| c.is_ascii_alphabetic()) {
        let last_char = s.chars().last().unwrap();
        (&s[..s.len() - last_char.len_utf8()], Some(last_char))
    } else {
        (s, None)
    };

    let base: f64 = num_part
        .parse()
        .map_err(|e| format!("Invalid number: {e}"))?;

    let multiplier = match suffix {
        Some('k') | Some('K') => 1000.0,
        Some('m') | Some('M') => 1_000_000.0,
        Some('g') | Some('G') => 1_000_000_000.0,
        Some(c) => {
            return Err(format!(
                "Unknown suffix '{c}'. Use k/K (1000), m/M (1e6), or g/G (1e9)"
            ))
        }
        None => 1.0,
    };

    let result = base * multiplier;

    if result < 0.0 || result > u32::MAX as f64 {
        return Err(format!("Value {result} out of range"));
    }

    Ok(result as usize)
}

/// telosweep - rank assembly contigs by telomere repeats at their ends
///
/// Scans a window at both ends of every FASTA record for runs of telomeric
/// repeat motifs and reports records ordered by how many ends carry them
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input FASTA file (plain, gzip or bgzip; reads stdin if omitted)
    #[clap(value_name = "FASTA")]
    fasta: Option<String>,

    /// Output report file (stdout if not specified)
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Telomere motifs to search for, in tie-break priority order
    #[clap(long = "motifs", num_args = 1.., default_values_t = ["TTAGGG".to_string(), "CCCTAA".to_string()])]
    motifs: Vec<String>,

    /// Minimum consecutive repeats required
    #[clap(short = 'm', long = "min-repeats", default_value = "5")]
    min_repeats: usize,

    /// Window size in bases searched at each end
    #[clap(short = 'w', long = "window", default_value = "200", value_parser = parse_metric_number)]
    window: usize,

    /// Maximum distance between a repeat run and the window edge
    #[clap(long = "max-offset", default_value = "10")]
    max_offset: usize,

    /// Omit records with no telomere at either end
    #[clap(long = "drop-unscored")]
    drop_unscored: bool,

    /// Quiet mode (no progress output)
    #[clap(long = "quiet")]
    quiet: bool,

    /// Number of threads for parallel processing
    #[clap(short = 't', long = "threads", default_value = "8")]
    threads: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Fail fast on configuration errors, before any input is read
    let mut config = ScanConfig {
        motifs: args.motifs.clone(),
        min_repeats: args.min_repeats,
        window: args.window,
        max_offset: args.max_offset,
        drop_unscored: args.drop_unscored,
    };
    config.validate()?;

    // Check if stdin is available when no input specified
    let stdin_available = if args.fasta.is_none() {
        use std::io::IsTerminal;
        !std::io::stdin().is_terminal()
    } else {
        false
    };

    // If no input specified and no stdin, print help
    if args.fasta.is_none() && !stdin_available {
        use clap::CommandFactory;
        Args::command().print_help()?;
        std::process::exit(0);
    }

    // Set up rayon thread pool
    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()?;

    if !args.quiet {
        match args.fasta {
            Some(ref path) => eprintln!("Scanning {path} for telomere repeats..."),
            None => eprintln!("Scanning stdin for telomere repeats..."),
        }
    }

    let filter = TelomereFilter::new(config);

    // Render into memory first so a fatal input error never leaves a
    // partial or truncated report behind
    let mut report = Vec::new();
    match args.fasta {
        Some(ref path) => {
            let input = open_fasta_input(path)?;
            filter.scan_fasta(input, &mut report)?;
        }
        None => {
            let stdin = std::io::stdin();
            filter.scan_fasta(stdin.lock(), &mut report)?;
        }
    }

    match args.output {
        Some(ref path) => {
            let mut out = BufWriter::new(File::create(path)?);
            out.write_all(&report)?;
            out.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&report)?;
            handle.flush()?;
        }
    }

    if !args.quiet {
        eprintln!("Scan complete");
    }

    Ok(())
}
