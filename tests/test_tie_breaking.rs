/// Tie-break determinism for candidate selection: length first, then the
/// outermost position, then motif listing order
use telosweep::repeat_scan::{scan_end, Side};

fn motifs(names: &[&str]) -> Vec<String> {
    names.iter().map(|m| m.to_string()).collect()
}

#[test]
fn test_left_tie_prefers_smaller_start() {
    // Two anchored AC runs of equal length, starting at 0 and 6
    let seq = "ACACTTACAC";
    let hit = scan_end(seq, &motifs(&["AC"]), 2, 200, Side::Left, 10).unwrap();
    assert_eq!(hit.start, 0);
    assert_eq!(hit.end, 4);
}

#[test]
fn test_right_tie_prefers_larger_end() {
    // Same two runs seen from the right: the one ending at the final base wins
    let seq = "ACACTTACAC";
    let hit = scan_end(seq, &motifs(&["AC"]), 2, 200, Side::Right, 10).unwrap();
    assert_eq!(hit.start, 6);
    assert_eq!(hit.end, 10);
}

#[test]
fn test_longer_run_beats_position() {
    // Length dominates the positional tie-break on both sides
    let seq = "ACACTTACACAC";
    let left = scan_end(seq, &motifs(&["AC"]), 2, 200, Side::Left, 10).unwrap();
    assert_eq!((left.start, left.end), (6, 12));

    let seq = "ACACACTTACAC";
    let right = scan_end(seq, &motifs(&["AC"]), 2, 200, Side::Right, 10).unwrap();
    assert_eq!((right.start, right.end), (0, 6));
}

#[test]
fn test_equal_candidates_go_to_first_listed_motif() {
    // "AC" repeated 4 times is simultaneously "ACAC" repeated twice: both
    // motifs produce the identical span, so listing order decides
    let seq = "ACACACACTTTTTTTT";

    let hit = scan_end(seq, &motifs(&["AC", "ACAC"]), 2, 200, Side::Left, 10).unwrap();
    assert_eq!(hit.motif, "AC");
    assert_eq!(hit.repeat_count, 4);
    assert_eq!((hit.start, hit.end), (0, 8));

    let hit = scan_end(seq, &motifs(&["ACAC", "AC"]), 2, 200, Side::Left, 10).unwrap();
    assert_eq!(hit.motif, "ACAC");
    assert_eq!(hit.repeat_count, 2);
    assert_eq!((hit.start, hit.end), (0, 8));
}

#[test]
fn test_motif_order_irrelevant_when_lengths_differ() {
    // AC x7 spans 14 bases; ACACAC only fits twice for 12. The longer run
    // wins even though its motif is listed second
    let seq = format!("{}{}", "AC".repeat(7), "TT".repeat(50));
    let hit = scan_end(&seq, &motifs(&["ACACAC", "AC"]), 2, 200, Side::Left, 10).unwrap();

    assert_eq!(hit.motif, "AC");
    assert_eq!((hit.start, hit.end), (0, 14));
    assert_eq!(hit.repeat_count, 7);
}
