//! sidfreq: locate and retune the frequency table of C64 SID music files
//!
//! SID player routines keep their note pitches in a lookup table of 16-bit
//! oscillator register values, one per semitone. Nothing in the file says
//! where that table is. `sidfreq` finds it by pattern matching over the raw
//! player bytes and rewrites it so the song plays against a different A4
//! reference pitch, leaving every other byte alone.
//!
//! Key features:
//! - Two detectors, one per table layout: split low/high byte streams
//!   ([`scan::split`]) and interleaved little-endian words
//!   ([`scan::interleaved`]).
//! - Detection results carry their trace (probe hits, winning group,
//!   staircase length, boundary refinement) so callers can report how a
//!   table was found.
//! - Out-of-range reads end a probe instead of failing; out-of-range writes
//!   are skipped.
//! - Scans can be abandoned through the [`scan::Interrupt`] seam.
//!
//! Example: retune a whole file
//!
//! ```no_run
//! use sidfreq::{TuneConfig, retune_sid};
//!
//! let file: Vec<u8> = std::fs::read("song.sid").unwrap();
//! let (out, report) = retune_sid(&file, &TuneConfig::default()).unwrap();
//! assert_eq!(out.len(), file.len());
//! println!("{} starting at note {}", report.detection.table(), report.retune.start_note);
//! ```
//!
//! Example: detection only, on a body that holds an interleaved table
//!
//! ```rust
//! use sidfreq::pitch::{LEGACY_A4_HZ, hz_to_chip, note_to_hz};
//! use sidfreq::{Detection, ScanConfig, TableLayout, detect_table};
//!
//! let mut body = vec![0u8; 512];
//! for i in 0..48 {
//!     let freq = hz_to_chip(note_to_hz(40.0 + i as f64, LEGACY_A4_HZ));
//!     body[100 + i * 2..102 + i * 2].copy_from_slice(&freq.to_le_bytes());
//! }
//!
//! let detection = detect_table(&body, &ScanConfig::default()).unwrap();
//! assert!(matches!(detection, Detection::Interleaved(_)));
//! assert_eq!(detection.table().layout, TableLayout::Interleaved { start: 100 });
//! ```
mod binutil;
pub mod config;
pub mod pitch;
pub mod retune;
pub mod scan;
pub mod sid;
pub mod table;
pub mod tune;

pub use binutil::ParseError;
pub use config::{PitchConfig, ScanConfig, TuneConfig};
pub use table::{FreqTable, TableLayout};
pub use tune::{
    Detection, TuneError, TuneReport, detect_table, detect_table_with, retune_body,
    retune_body_with, retune_sid,
};
