//! Rewrite a located frequency table under a new reference pitch.
//!
//! The first entry fixes the starting note (read under the legacy A4);
//! every following entry is assumed to be one semitone higher than the
//! previous one and is regenerated from scratch under the target A4.
use log::debug;

use crate::binutil::write_u8_within;
use crate::config::PitchConfig;
use crate::pitch::{chip_to_hz, hz_to_chip, hz_to_note, note_to_hz};
use crate::table::FreqTable;
use crate::tune::TuneError;

/// What the retuner did to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetuneOutcome {
    /// Register value of entry 0 before rewriting.
    pub first_freq: u16,
    /// Note number (A4 = 69) of entry 0 under the legacy pitch.
    pub start_note: i32,
    /// Bytes written.
    pub written: usize,
    /// Bytes skipped because they fell past the end of the body.
    pub skipped: usize,
}

/// Note number of the first table entry under `legacy_a4_hz`.
pub fn start_note(table: &FreqTable, body: &[u8], legacy_a4_hz: f64) -> Result<(u16, i32), TuneError> {
    let first_freq = table.read_entry(body, 0)?;
    if first_freq == 0 {
        let (offset, _) = table.entry_offsets(0);
        return Err(TuneError::SilentFirstEntry { offset });
    }
    let note = hz_to_note(chip_to_hz(first_freq), legacy_a4_hz).round() as i32;
    Ok((first_freq, note))
}

/// Register value of `note` under `target_a4_hz`.
pub fn note_to_chip(note: i32, target_a4_hz: f64) -> u16 {
    hz_to_chip(note_to_hz(note as f64, target_a4_hz))
}

/// Rewrite every entry of `table` in place.
///
/// Entries whose bytes fall past the end of `body` are skipped byte by
/// byte; nothing outside the table's positions is touched.
pub fn retune_table(
    body: &mut [u8],
    table: &FreqTable,
    pitch: &PitchConfig,
) -> Result<RetuneOutcome, TuneError> {
    let (first_freq, start) = start_note(table, body, pitch.legacy_a4_hz)?;
    debug!(
        "retune: first entry 0x{:04X} is note {}, rewriting {} entries",
        first_freq, start, table.len
    );

    let mut written = 0;
    let mut skipped = 0;
    for index in 0..table.len {
        let [low, high] = note_to_chip(start + index as i32, pitch.target_a4_hz).to_le_bytes();
        let (lo_off, hi_off) = table.entry_offsets(index);
        for (off, byte) in [(lo_off, low), (hi_off, high)] {
            if write_u8_within(body, off, byte) {
                written += 1;
            } else {
                skipped += 1;
            }
        }
    }

    Ok(RetuneOutcome {
        first_freq,
        start_note: start,
        written,
        skipped,
    })
}
