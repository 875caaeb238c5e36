use std::cmp::Ordering;
// Core end-scanning algorithm that works on one sequence terminus.
// This is the single implementation used for both the left and right ends.

/// Canonical vertebrate telomere repeat and its reverse complement
pub const DEFAULT_MOTIFS: [&str; 2] = ["TTAGGG", "CCCTAA"];

/// Minimum consecutive repeats for a run to qualify
pub const DEFAULT_MIN_REPEATS: usize = 5;

/// Bases searched at each end
pub const DEFAULT_WINDOW: usize = 200;

/// Maximum distance between a run and the outer window edge
pub const DEFAULT_MAX_OFFSET: usize = 10;

/// Which sequence terminus to scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A qualifying repeat run anchored at one terminus
///
/// `start`/`end` are half-open offsets into the full sequence, even though
/// the search only looked at a window. `end - start` is always an exact
/// multiple of the motif length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndMatch {
    pub motif: String,
    pub start: usize,
    pub end: usize,
    pub repeat_count: usize,
    pub matched: String,
}

/// A repeat run inside the search region, region-relative coordinates
#[derive(Debug, Clone, Copy)]
struct Candidate {
    motif_idx: usize,
    begin: usize,
    end: usize,
}

impl Candidate {
    fn length(&self) -> usize {
        self.end - self.begin
    }
}

/// Find every maximal run of at least `min_repeats` back-to-back copies of
/// `motif`, scanning left to right. Runs of the same motif never overlap:
/// after recording a run the scan resumes past its last base.
fn repeat_runs(region: &[u8], motif: &[u8], min_repeats: usize) -> Vec<(usize, usize)> {
    let m = motif.len();
    let mut runs = Vec::new();
    if m == 0 {
        return runs;
    }

    let mut pos = 0;
    while pos + m <= region.len() {
        if &region[pos..pos + m] != motif {
            pos += 1;
            continue;
        }

        // Greedily extend as long as exact copies continue
        let mut count = 1;
        while pos + (count + 1) * m <= region.len()
            && &region[pos + count * m..pos + (count + 1) * m] == motif
        {
            count += 1;
        }

        if count >= min_repeats {
            runs.push((pos, pos + count * m));
            pos += count * m;
        } else {
            pos += 1;
        }
    }

    runs
}

/// Scan one terminus of `seq` for the best qualifying repeat run.
///
/// The search is confined to the first (left) or last (right) `window`
/// bases, clamped to the sequence length. A run is accepted only when it
/// lies within `max_offset` bases of the outer window edge. Among accepted
/// runs the longest wins; length ties go to the outermost run (smallest
/// start on the left, largest end on the right), and remaining ties to the
/// earliest-listed motif.
///
/// Callers validate parameters up front (see `ScanConfig::validate`):
/// `motifs` non-empty with non-empty entries, `min_repeats >= 1`,
/// `window >= 1`. An empty sequence is not an error and yields `None`.
pub fn scan_end(
    seq: &str,
    motifs: &[String],
    min_repeats: usize,
    window: usize,
    side: Side,
    max_offset: usize,
) -> Option<EndMatch> {
    let bytes = seq.as_bytes();
    let region_len = window.min(bytes.len());
    let region_offset = match side {
        Side::Left => 0,
        Side::Right => bytes.len() - region_len,
    };
    let region = &bytes[region_offset..region_offset + region_len];

    let mut best: Option<Candidate> = None;
    for (motif_idx, motif) in motifs.iter().enumerate() {
        for (begin, end) in repeat_runs(region, motif.as_bytes(), min_repeats) {
            let anchored = match side {
                Side::Left => begin <= max_offset,
                Side::Right => region_len - end <= max_offset,
            };
            if !anchored {
                continue;
            }

            let candidate = Candidate {
                motif_idx,
                begin,
                end,
            };

            // Replace the current best only on a strictly better key, so a
            // full tie keeps the earlier candidate: runs are visited in
            // motif input order, then left to right.
            let better = match &best {
                None => true,
                Some(b) => match candidate.length().cmp(&b.length()) {
                    Ordering::Greater => true,
                    Ordering::Less => false,
                    Ordering::Equal => match side {
                        Side::Left => candidate.begin < b.begin,
                        Side::Right => candidate.end > b.end,
                    },
                },
            };
            if better {
                best = Some(candidate);
            }
        }
    }

    best.map(|c| {
        let motif = &motifs[c.motif_idx];
        EndMatch {
            motif: motif.clone(),
            start: region_offset + c.begin,
            end: region_offset + c.end,
            repeat_count: c.length() / motif.len(),
            matched: String::from_utf8_lossy(&region[c.begin..c.end]).into_owned(),
        }
    })
}
