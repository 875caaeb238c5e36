use anyhow::{bail, Result};
use indexmap::IndexSet;
use log::info;
use rayon::prelude::*;
use std::io::{BufRead, Write};

use crate::fasta::{FastaReader, FastaRecord};
use crate::record::{evaluate_record, rank_records, RecordResult};
use crate::repeat_scan::{
    EndMatch, DEFAULT_MAX_OFFSET, DEFAULT_MIN_REPEATS, DEFAULT_MOTIFS, DEFAULT_WINDOW,
};

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Motifs in tie-break priority order
    pub motifs: Vec<String>,
    pub min_repeats: usize,
    pub window: usize,
    pub max_offset: usize,
    /// Omit records that found nothing at either end
    pub drop_unscored: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            motifs: DEFAULT_MOTIFS.iter().map(|m| m.to_string()).collect(),
            min_repeats: DEFAULT_MIN_REPEATS,
            window: DEFAULT_WINDOW,
            max_offset: DEFAULT_MAX_OFFSET,
            drop_unscored: false,
        }
    }
}

impl ScanConfig {
    /// Normalize the motif set and reject invalid parameters. Must succeed
    /// before any input is read.
    pub fn validate(&mut self) -> Result<()> {
        if self.window == 0 {
            bail!("window must be at least 1 base");
        }
        if self.min_repeats == 0 {
            bail!("min-repeats must be at least 1");
        }
        if self.motifs.is_empty() {
            bail!("at least one telomere motif is required");
        }
        if self.motifs.iter().any(|m| m.is_empty()) {
            bail!("telomere motifs must be non-empty");
        }

        // Uppercase and drop duplicates keeping first-seen order: motif
        // order is the final tie-break between equal candidates
        let unique: IndexSet<String> =
            self.motifs.iter().map(|m| m.to_ascii_uppercase()).collect();
        self.motifs = unique.into_iter().collect();

        Ok(())
    }
}

/// Telomere scan pipeline. Evaluation preserves record input order;
/// ranking reorders by score only.
pub struct TelomereFilter {
    config: ScanConfig,
}

impl TelomereFilter {
    pub fn new(config: ScanConfig) -> Self {
        TelomereFilter { config }
    }

    /// Evaluate every record. Records are scanned in parallel; the result
    /// vector keeps the input order regardless of completion order.
    pub fn scan_records(&self, records: &[FastaRecord]) -> Vec<RecordResult> {
        records
            .par_iter()
            .map(|record| {
                evaluate_record(
                    &record.id,
                    &record.seq,
                    &self.config.motifs,
                    self.config.min_repeats,
                    self.config.window,
                    self.config.max_offset,
                )
            })
            .collect()
    }

    /// Full pipeline: read all records, evaluate, rank, render.
    ///
    /// Input errors surface before anything is written, so a malformed
    /// file never produces a partial report.
    pub fn scan_fasta<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<()> {
        let records = FastaReader::new(input).read_all()?;
        let results = self.scan_records(&records);

        let both = results.iter().filter(|r| r.score == 2).count();
        let one = results.iter().filter(|r| r.score == 1).count();
        info!(
            "{} records scanned: {both} with telomeres at both ends, {one} at one end",
            results.len()
        );

        let ranked = rank_records(results, self.config.drop_unscored);
        write_report(&ranked, output)
    }
}

/// Render ranked results as the text report
pub fn write_report<W: Write>(results: &[RecordResult], out: &mut W) -> Result<()> {
    for result in results {
        writeln!(out, "Entry: {}", result.id)?;
        writeln!(out, "  Length: {}", result.length)?;
        write_end(out, "Left", &result.left)?;
        write_end(out, "Right", &result.right)?;
        writeln!(out)?;
    }
    Ok(())
}

/// One report line per terminus. Positions are 1-based inclusive start
/// and the half-open end value as-is.
fn write_end<W: Write>(out: &mut W, label: &str, hit: &Option<EndMatch>) -> Result<()> {
    match hit {
        Some(m) => writeln!(
            out,
            "  {} telomere: YES ({} x{}) (positions {}-{}) sequence: {}",
            label,
            m.motif,
            m.repeat_count,
            m.start + 1,
            m.end,
            m.matched
        )?,
        None => writeln!(out, "  {} telomere: NO", label)?,
    }
    Ok(())
}
