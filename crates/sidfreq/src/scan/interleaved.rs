//! Detector for tables stored as little-endian words.
//!
//! ```text
//! LHLHLHLH ... LHLHLHLH
//! ^ start
//! ```
//!
//! Offsets are probed with a looser tolerance than the split detector; the
//! staircase filter (`start`, `start + 2`, `start + 4`, ...) does the rest.
use log::{debug, trace};

use crate::binutil::read_u16_le_at;
use crate::config::ScanConfig;
use crate::pitch::is_semitone_step;
use crate::scan::{Interrupt, Interrupted, NeverInterrupt, check_shard};
use crate::table::FreqTable;

/// Result of a successful interleaved scan.
#[derive(Debug, Clone, PartialEq)]
pub struct InterleavedMatch {
    pub table: FreqTable,
    /// Number of further word-aligned hits following the start.
    pub run_len: usize,
    /// Total probe hits over the whole body.
    pub probe_hits: usize,
}

/// Search `body` for an interleaved frequency table.
pub fn find_interleaved_table(body: &[u8], cfg: &ScanConfig) -> Option<InterleavedMatch> {
    find_interleaved_table_with(body, cfg, &NeverInterrupt).unwrap_or(None)
}

/// Like [`find_interleaved_table`] but polls `interrupt` between offset shards.
pub fn find_interleaved_table_with(
    body: &[u8],
    cfg: &ScanConfig,
    interrupt: &dyn Interrupt,
) -> Result<Option<InterleavedMatch>, Interrupted> {
    let limit = body.len().saturating_sub(cfg.interleaved_tail);
    let mut hits: Vec<usize> = Vec::new();
    for start in 0..limit {
        check_shard(start, cfg.shard_len, interrupt)?;
        if probe(body, start, cfg) {
            trace!("possible interleaved table at 0x{:X}", start);
            hits.push(start);
        }
    }
    debug!("interleaved scan: {} probe hits", hits.len());

    // `hits` is ascending, so membership is a binary search. A start whose
    // staircase never gaps has no measurable length and is passed over.
    for &start in &hits {
        let gap = (1..cfg.interleaved_tail).find(|&k| hits.binary_search(&(start + k * 2)).is_err());
        let Some(run_len) = gap else {
            trace!("interleaved scan: no gap after 0x{:X}, skipped", start);
            continue;
        };
        let len = run_len + cfg.length_pad;
        if len > cfg.min_interleaved_len {
            debug!(
                "interleaved scan: staircase at 0x{:X} (run {}, len {})",
                start, run_len, len
            );
            return Ok(Some(InterleavedMatch {
                table: FreqTable::interleaved(start, len),
                run_len,
                probe_hits: hits.len(),
            }));
        }
    }

    Ok(None)
}

fn probe(body: &[u8], start: usize, cfg: &ScanConfig) -> bool {
    for step in 1..cfg.probe_len {
        let (Ok(prev), Ok(cur)) = (
            read_u16_le_at(body, start + (step - 1) * 2),
            read_u16_le_at(body, start + step * 2),
        ) else {
            break;
        };
        if !is_semitone_step(prev, cur, cfg.interleaved_tolerance) {
            return false;
        }
    }
    true
}
