//! Frequency table layouts and entry access.
//!
//! A SID player stores its note frequencies either as two separate byte
//! streams (all low bytes, then all high bytes somewhere else) or as a
//! single stream of little-endian words. `FreqTable` describes where a
//! table of either kind sits inside the file body.
use std::ops::Range;

use crate::binutil::{ParseError, read_u16_split_at};

/// Byte layout of a frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableLayout {
    /// `LLLL... HHHH...`: entry `i` is `body[lo + i] + body[hi + i] * 256`.
    Split { lo: usize, hi: usize },
    /// `LHLH...`: entry `i` is `body[start + 2i] + body[start + 2i + 1] * 256`.
    Interleaved { start: usize },
}

/// A located frequency table: layout plus number of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FreqTable {
    pub layout: TableLayout,
    pub len: usize,
}

impl FreqTable {
    pub fn split(lo: usize, hi: usize, len: usize) -> Self {
        FreqTable {
            layout: TableLayout::Split { lo, hi },
            len,
        }
    }

    pub fn interleaved(start: usize, len: usize) -> Self {
        FreqTable {
            layout: TableLayout::Interleaved { start },
            len,
        }
    }

    /// Body positions of the low and high byte of entry `index`.
    pub fn entry_offsets(&self, index: usize) -> (usize, usize) {
        match self.layout {
            TableLayout::Split { lo, hi } => (lo + index, hi + index),
            TableLayout::Interleaved { start } => {
                let lo = start + index * 2;
                (lo, lo + 1)
            }
        }
    }

    /// Decode entry `index` from `body`.
    pub fn read_entry(&self, body: &[u8], index: usize) -> Result<u16, ParseError> {
        let (lo, hi) = self.entry_offsets(index);
        read_u16_split_at(body, lo, hi).map_err(|e| match e {
            ParseError::OffsetOutOfRange {
                offset,
                needed,
                available,
                ..
            } => ParseError::OffsetOutOfRange {
                offset,
                needed,
                available,
                context: Some(format!("table entry {}", index)),
            },
            other => other,
        })
    }

    /// Body byte ranges covered by the table, clipped to `body_len`.
    pub fn byte_ranges(&self, body_len: usize) -> Vec<Range<usize>> {
        let clip = |r: Range<usize>| r.start.min(body_len)..r.end.min(body_len);
        match self.layout {
            TableLayout::Split { lo, hi } => {
                vec![clip(lo..lo + self.len), clip(hi..hi + self.len)]
            }
            TableLayout::Interleaved { start } => vec![clip(start..start + self.len * 2)],
        }
    }
}

impl std::fmt::Display for FreqTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.layout {
            TableLayout::Split { lo, hi } => write!(
                f,
                "split table lo=0x{:04X} hi=0x{:04X} len={}",
                lo, hi, self.len
            ),
            TableLayout::Interleaved { start } => {
                write!(f, "interleaved table at 0x{:04X} len={}", start, self.len)
            }
        }
    }
}
