// Split (low-byte stream / high-byte stream) detector tests.
use std::sync::atomic::AtomicBool;

use sidfreq::scan::split::find_split_table_with;
use sidfreq::scan::{Interrupted, find_split_table, split_match_groups};
use sidfreq::{FreqTable, ScanConfig};

use crate::fixture::{noise, place_split, semitone_run};

#[test]
fn test_split_tables_at_10_and_50() {
    // 32 entries stepping one semitone from 1000, the body ending with
    // the high-byte stream.
    let freqs: Vec<u16> = (0..32)
        .map(|i| (1000.0 * 2_f64.powf(i as f64 / 12.0)).round() as u16)
        .collect();
    let mut body = vec![0u8; 82];
    place_split(&mut body, 10, 50, &freqs);

    let found = find_split_table(&body, &ScanConfig::default()).expect("table not found");
    assert_eq!(found.unrefined, (10, 50));
    assert_eq!(found.distance, 40);
    assert_eq!(found.run_len, 12);
    assert!(!found.partial_run);
    // (1, 41) pairs the last low byte as a high byte with zero, and the
    // zero entry at (2, 42) is the first broken step of the window.
    assert_eq!(found.refine_shift, -8);
    assert_eq!(found.table, FreqTable::split(2, 42, 40));
}

#[test]
fn test_split_refinement_skips_detuned_entry() {
    // Entry 4 is 5% sharp, so no probe hit starts before entry 5. The
    // filler-to-table step at entry 0 is the first broken step followed
    // by two clean ones.
    let mut freqs = semitone_run(20, 80);
    freqs[4] += freqs[4] / 20;
    let mut body = vec![0x55u8; 400];
    place_split(&mut body, 40, 120, &freqs);

    let found = find_split_table(&body, &ScanConfig::default()).expect("table not found");
    assert_eq!(found.unrefined, (45, 125));
    assert_eq!(found.refine_shift, -5);
    assert_eq!(found.table, FreqTable::split(40, 120, 80));
}

#[test]
fn test_split_adjacent_streams() {
    let cfg = ScanConfig::default();
    for filler in [0x00u8, 0x55] {
        let mut body = vec![filler; 400];
        place_split(&mut body, 40, 120, &semitone_run(20, 80));

        let found = find_split_table(&body, &cfg).expect("table not found");
        assert_eq!(found.table, FreqTable::split(40, 120, 80), "filler {:#04X}", filler);
        assert_eq!(found.refine_shift, 0);
        assert_eq!(found.distance, 80);
        assert!(found.group_size >= 2);
    }
}

#[test]
fn test_split_partial_run_is_padded() {
    // Streams 300 bytes apart need a 244-hit staircase; a 60-entry table
    // only gives 29 and is accepted as a partial run.
    let mut body = vec![0u8; 500];
    place_split(&mut body, 30, 330, &semitone_run(46, 60));

    let found = find_split_table(&body, &ScanConfig::default()).expect("table not found");
    assert!(found.partial_run);
    assert_eq!(found.run_len, 29);
    assert_eq!(found.table, FreqTable::split(30, 330, 29 + 32));
}

#[test]
fn test_split_single_hit_group_is_never_selected() {
    // A 32-entry table surrounded by noise produces exactly one probe hit.
    let mut body = noise(400, 7);
    place_split(&mut body, 20, 100, &semitone_run(40, 32));
    let cfg = ScanConfig::default();

    let groups = split_match_groups(&body, &cfg);
    let group = groups
        .iter()
        .find(|g| g.distance == 80)
        .expect("probe at (20, 100) should hit");
    assert_eq!(group.members(), &[(20, 100)]);

    assert_eq!(find_split_table(&body, &cfg), None);
}

#[test]
fn test_split_high_stream_first() {
    // High bytes stored before low bytes are found through the reverse probe.
    let mut body = vec![0u8; 400];
    place_split(&mut body, 120, 40, &semitone_run(20, 80));

    let found = find_split_table(&body, &ScanConfig::default()).expect("table not found");
    assert_eq!(found.unrefined, (120, 40));
    assert_eq!(found.distance, 80);
    let (lo, hi) = found.table.entry_offsets(0);
    assert!(lo > hi);
}

#[test]
fn test_split_interrupt() {
    let mut body = vec![0u8; 400];
    place_split(&mut body, 40, 120, &semitone_run(20, 80));
    let stop = AtomicBool::new(true);
    assert_eq!(
        find_split_table_with(&body, &ScanConfig::default(), &stop),
        Err(Interrupted)
    );
}
