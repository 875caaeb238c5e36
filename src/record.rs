use crate::repeat_scan::{scan_end, EndMatch, Side};

/// Scan outcome for one sequence record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordResult {
    pub id: String,
    pub length: usize,
    pub left: Option<EndMatch>,
    pub right: Option<EndMatch>,
    /// Number of termini with a qualifying repeat (0, 1 or 2)
    pub score: u8,
}

/// Evaluate both termini of one record and package the result
pub fn evaluate_record(
    id: &str,
    seq: &str,
    motifs: &[String],
    min_repeats: usize,
    window: usize,
    max_offset: usize,
) -> RecordResult {
    let left = scan_end(seq, motifs, min_repeats, window, Side::Left, max_offset);
    let right = scan_end(seq, motifs, min_repeats, window, Side::Right, max_offset);
    let score = left.is_some() as u8 + right.is_some() as u8;

    RecordResult {
        id: id.to_string(),
        length: seq.len(),
        left,
        right,
        score,
    }
}

/// Order results by score, best first.
///
/// The sort is stable: records with equal scores keep their input order,
/// with no secondary key on identifier or length. With `drop_unscored`
/// set, records that found nothing at either end are removed first.
pub fn rank_records(mut results: Vec<RecordResult>, drop_unscored: bool) -> Vec<RecordResult> {
    if drop_unscored {
        results.retain(|r| r.score > 0);
    }
    results.sort_by_key(|r| std::cmp::Reverse(r.score));
    results
}
