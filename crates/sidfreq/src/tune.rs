//! Detect-then-retune pipeline.
//!
//! The split detector runs first: it needs two independent byte streams
//! to agree, so it produces far fewer false positives. The interleaved
//! detector is only tried when the split detector finds nothing. The
//! winning table is retuned exactly once.
use std::fmt;

use log::info;

use crate::binutil::ParseError;
use crate::config::{ScanConfig, TuneConfig};
use crate::retune::{RetuneOutcome, retune_table};
use crate::scan::interleaved::find_interleaved_table_with;
use crate::scan::split::find_split_table_with;
use crate::scan::{InterleavedMatch, Interrupt, Interrupted, NeverInterrupt, SplitMatch};
use crate::sid::{SID_HEADER_LEN, split_sid};
use crate::table::FreqTable;

/// Error type for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TuneError {
    /// Neither detector accepted a table.
    NoTableFound,
    /// The first entry of the located table is zero, so it has no pitch.
    ///
    /// `offset` is the body position of the entry's low byte.
    SilentFirstEntry { offset: usize },
    /// The caller's interrupt fired during the scan.
    Interrupted,
    /// The input could not be read (short header, unreadable first entry).
    Parse(ParseError),
}

impl fmt::Display for TuneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuneError::NoTableFound => write!(f, "no frequency table found"),
            TuneError::SilentFirstEntry { offset } => {
                write!(f, "first table entry at 0x{:X} is zero", offset)
            }
            TuneError::Interrupted => write!(f, "scan interrupted"),
            TuneError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TuneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuneError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for TuneError {
    fn from(e: ParseError) -> Self {
        TuneError::Parse(e)
    }
}

impl From<Interrupted> for TuneError {
    fn from(_: Interrupted) -> Self {
        TuneError::Interrupted
    }
}

/// Which detector found the table, with its trace.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    Split(SplitMatch),
    Interleaved(InterleavedMatch),
}

impl Detection {
    pub fn table(&self) -> &FreqTable {
        match self {
            Detection::Split(m) => &m.table,
            Detection::Interleaved(m) => &m.table,
        }
    }
}

/// Outcome of a full detect-and-retune run.
#[derive(Debug, Clone, PartialEq)]
pub struct TuneReport {
    pub detection: Detection,
    pub retune: RetuneOutcome,
}

/// Locate the frequency table in `body`.
pub fn detect_table(body: &[u8], cfg: &ScanConfig) -> Result<Detection, TuneError> {
    detect_table_with(body, cfg, &NeverInterrupt)
}

/// Like [`detect_table`] but polls `interrupt` between offset shards.
pub fn detect_table_with(
    body: &[u8],
    cfg: &ScanConfig,
    interrupt: &dyn Interrupt,
) -> Result<Detection, TuneError> {
    if let Some(m) = find_split_table_with(body, cfg, interrupt)? {
        info!("found {}", m.table);
        return Ok(Detection::Split(m));
    }
    if let Some(m) = find_interleaved_table_with(body, cfg, interrupt)? {
        info!("found {}", m.table);
        return Ok(Detection::Interleaved(m));
    }
    Err(TuneError::NoTableFound)
}

/// Locate the table in `body` and retune it in place.
///
/// On error `body` is left untouched.
pub fn retune_body(body: &mut [u8], cfg: &TuneConfig) -> Result<TuneReport, TuneError> {
    retune_body_with(body, cfg, &NeverInterrupt)
}

/// Like [`retune_body`] but polls `interrupt` during detection.
pub fn retune_body_with(
    body: &mut [u8],
    cfg: &TuneConfig,
    interrupt: &dyn Interrupt,
) -> Result<TuneReport, TuneError> {
    let detection = detect_table_with(body, &cfg.scan, interrupt)?;
    let retune = retune_table(body, detection.table(), &cfg.pitch)?;
    Ok(TuneReport { detection, retune })
}

/// Retune a whole SID file, returning the rewritten file.
///
/// The output has the same length as `file` and the header is copied
/// through unchanged.
pub fn retune_sid(file: &[u8], cfg: &TuneConfig) -> Result<(Vec<u8>, TuneReport), TuneError> {
    let (header, body) = split_sid(file)?;
    let mut out = Vec::with_capacity(file.len());
    out.extend_from_slice(header);
    out.extend_from_slice(body);
    let report = retune_body(&mut out[SID_HEADER_LEN..], cfg)?;
    Ok((out, report))
}
