#[path = "common/fixture.rs"]
mod fixture;

use std::sync::atomic::AtomicBool;

use sidfreq::sid::SID_HEADER_LEN;
use sidfreq::{
    Detection, FreqTable, ParseError, TableLayout, TuneConfig, TuneError, detect_table,
    retune_body, retune_body_with, retune_sid,
};

use fixture::{noise, place_interleaved, place_split, semitone_run};

#[test]
fn test_split_detector_wins() {
    // Body holding both layouts: the split table is reported.
    let mut body = vec![0u8; 700];
    place_split(&mut body, 40, 120, &semitone_run(20, 80));
    place_interleaved(&mut body, 300, &semitone_run(50, 40));

    let detection = detect_table(&body, &TuneConfig::default().scan).unwrap();
    assert!(matches!(detection, Detection::Split(_)));
    assert_eq!(*detection.table(), FreqTable::split(40, 120, 80));
}

#[test]
fn test_falls_back_to_interleaved() {
    let mut body = vec![0u8; 300];
    place_interleaved(&mut body, 20, &semitone_run(50, 40));

    let detection = detect_table(&body, &TuneConfig::default().scan).unwrap();
    match detection {
        Detection::Interleaved(m) => {
            assert_eq!(m.table.layout, TableLayout::Interleaved { start: 20 })
        }
        other => panic!("expected interleaved detection, got {:?}", other),
    }
}

#[test]
fn test_no_table_leaves_body_untouched() {
    let mut body = noise(1024, 5);
    let before = body.clone();
    assert_eq!(
        retune_body(&mut body, &TuneConfig::default()),
        Err(TuneError::NoTableFound)
    );
    assert_eq!(body, before);
}

#[test]
fn test_retune_body_reports_start_note() {
    let mut body = vec![0u8; 300];
    place_interleaved(&mut body, 20, &semitone_run(50, 40));

    let report = retune_body(&mut body, &TuneConfig::default()).unwrap();
    assert_eq!(report.retune.start_note, 50);
    // 41 entries (run of 9 padded by 32), all inside the body
    assert_eq!(report.retune.written, 82);
    assert_ne!(body[20..22], semitone_run(50, 1)[0].to_le_bytes());
}

#[test]
fn test_retune_sid_keeps_header_and_length() {
    let mut body = vec![0u8; 400];
    place_split(&mut body, 40, 120, &semitone_run(20, 80));
    let header: Vec<u8> = (0..SID_HEADER_LEN as u8).collect();
    let file: Vec<u8> = header.iter().chain(body.iter()).copied().collect();

    let (out, report) = retune_sid(&file, &TuneConfig::default()).unwrap();
    assert_eq!(out.len(), file.len());
    assert_eq!(&out[..SID_HEADER_LEN], &header[..]);
    assert_eq!(*report.detection.table(), FreqTable::split(40, 120, 80));
    assert_ne!(out, file);
}

#[test]
fn test_retune_sid_short_file() {
    let file = vec![0u8; 0x20];
    assert!(matches!(
        retune_sid(&file, &TuneConfig::default()),
        Err(TuneError::Parse(ParseError::HeaderTooShort(_)))
    ));
}

#[test]
fn test_interrupt_is_reported() {
    let mut body = vec![0u8; 300];
    let stop = AtomicBool::new(true);
    assert_eq!(
        retune_body_with(&mut body, &TuneConfig::default(), &stop),
        Err(TuneError::Interrupted)
    );
}
