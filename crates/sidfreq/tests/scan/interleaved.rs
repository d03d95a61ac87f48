// Interleaved (little-endian word) detector tests.
use std::sync::atomic::AtomicBool;

use sidfreq::scan::interleaved::find_interleaved_table_with;
use sidfreq::scan::{Interrupted, find_interleaved_table, find_split_table};
use sidfreq::{Detection, FreqTable, ScanConfig, TableLayout, detect_table};

use crate::fixture::{place_interleaved, semitone_run};

#[test]
fn test_interleaved_40_entries_at_20() {
    let mut body = vec![0u8; 300];
    place_interleaved(&mut body, 20, &semitone_run(50, 40));
    let cfg = ScanConfig::default();

    assert_eq!(find_split_table(&body, &cfg), None);

    let found = find_interleaved_table(&body, &cfg).expect("table not found");
    assert_eq!(found.table.layout, TableLayout::Interleaved { start: 20 });
    assert!(found.table.len >= 40);
    // 9 word-aligned hits (20..=36), so the first gap is at k = 9
    assert_eq!(found.run_len, 9);
    assert_eq!(found.table.len, 9 + 32);
    assert_eq!(found.probe_hits, 9);
}

#[test]
fn test_interleaved_start_must_leave_tail() {
    // Starts within the last 256 bytes are never probed.
    let mut body = vec![0u8; 300];
    place_interleaved(&mut body, 200, &semitone_run(50, 40));
    assert_eq!(find_interleaved_table(&body, &ScanConfig::default()), None);
}

#[test]
fn test_interleaved_tolerance_is_configurable() {
    // Every step is about 1.03: accepted at 0.05, rejected at 0.01.
    let freqs: Vec<u16> = (0..40)
        .map(|i| (2000.0 * 1.03_f64.powi(i)).round() as u16)
        .collect();
    let mut body = vec![0u8; 300];
    place_interleaved(&mut body, 4, &freqs);

    let loose = ScanConfig::default();
    assert!(find_interleaved_table(&body, &loose).is_some());

    let strict = ScanConfig {
        interleaved_tolerance: 0.01,
        ..ScanConfig::default()
    };
    assert_eq!(find_interleaved_table(&body, &strict), None);
}

#[test]
fn test_interleaved_start_without_gap_is_passed_over() {
    // 300 words rising 2% per step: every start up to 48 sees 255 further
    // hits without a gap, so the first measurable staircase begins at 48.
    let freqs: Vec<u16> = (0..300)
        .map(|i| (150.0 * 1.02_f64.powi(i)).round() as u16)
        .collect();
    let mut body = vec![0u8; 1000];
    place_interleaved(&mut body, 20, &freqs);
    let cfg = ScanConfig::default();

    let found = find_interleaved_table(&body, &cfg).expect("table not found");
    assert_eq!(found.table, FreqTable::interleaved(48, 255 + 32));
    assert_eq!(found.run_len, 255);
    assert_eq!(found.probe_hits, 269);

    let detection = detect_table(&body, &cfg).unwrap();
    assert!(matches!(detection, Detection::Interleaved(_)));
    assert_eq!(*detection.table(), FreqTable::interleaved(48, 287));
}

#[test]
fn test_interleaved_interrupt() {
    let body = vec![0u8; 300];
    let stop = AtomicBool::new(true);
    assert_eq!(
        find_interleaved_table_with(&body, &ScanConfig::default(), &stop),
        Err(Interrupted)
    );
}
