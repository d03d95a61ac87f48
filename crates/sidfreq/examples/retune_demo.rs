//! Example demonstrating table detection and retuning on a synthetic body
//!
//! This example builds a player body holding a split frequency table,
//! locates it, retunes it from A4 = 440 Hz to the default target pitch and
//! prints the first few entries before and after.

use sidfreq::pitch::{LEGACY_A4_HZ, chip_to_hz, hz_to_chip, note_to_hz};
use sidfreq::{TuneConfig, retune_body};

fn main() {
    println!("sidfreq retune demo\n");

    let mut body = create_sample_body();
    let before = body.clone();

    let cfg = TuneConfig::default();
    let report = match retune_body(&mut body, &cfg) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("retune failed: {}", e);
            return;
        }
    };

    let table = report.detection.table();
    println!("{}", table);
    println!("first note: {}\n", report.retune.start_note);

    for i in 0..8 {
        let old = table.read_entry(&before, i).unwrap_or(0);
        let new = table.read_entry(&body, i).unwrap_or(0);
        println!(
            "  [{:2}] 0x{:04X} {:8.2}Hz -> 0x{:04X} {:8.2}Hz",
            i,
            old,
            chip_to_hz(old),
            new,
            chip_to_hz(new)
        );
    }
}

/// 96 semitones from C0 stored as a low-byte stream followed by a
/// high-byte stream, with some player code around it.
fn create_sample_body() -> Vec<u8> {
    let mut body = vec![0xEA; 0x300]; // NOP
    let lo = 0x80;
    let hi = lo + 96;
    for i in 0..96 {
        let freq = hz_to_chip(note_to_hz(12.0 + i as f64, LEGACY_A4_HZ));
        let [l, h] = freq.to_le_bytes();
        body[lo + i] = l;
        body[hi + i] = h;
    }
    body
}
