//! Pitch utilities for SID oscillator frequency computations.
//!
//! This module converts between the 16-bit SID frequency register value
//! (the "chip frequency"), the produced frequency in Hertz for a PAL C64,
//! and MIDI-style note numbers measured against a configurable A4
//! reference pitch.
//!
//! The SID oscillator advances a 24-bit phase accumulator by the register
//! value once per clock, so the produced frequency is
//! `freq * clock / 2^24`. Only the PAL clock is supported.
//!
//! # Examples
//!
//! ## Register value to note number
//!
//! ```rust
//! use sidfreq::pitch::{LEGACY_A4_HZ, chip_to_hz, hz_to_note};
//!
//! // 0x1D45 is A4 in a typical PAL table.
//! let note = hz_to_note(chip_to_hz(0x1D45), LEGACY_A4_HZ);
//! assert_eq!(note.round() as i32, 69);
//! ```
//!
//! ## Note number to register value under another tuning
//!
//! ```rust
//! use sidfreq::pitch::{DEFAULT_TARGET_A4_HZ, hz_to_chip, note_to_hz};
//!
//! let freq = hz_to_chip(note_to_hz(69.0, DEFAULT_TARGET_A4_HZ));
//! assert!(freq > 0x1D45);
//! ```

/// PAL C64 master clock (Hz).
pub const PAL_CLOCK_HZ: f64 = 985_248.0;

/// Phase accumulator range of a SID oscillator (2^24).
const ACCUMULATOR_RANGE: f64 = 16_777_216.0;

/// Reference A4 frequency the tables are assumed to be written in.
pub const LEGACY_A4_HZ: f64 = 440.0;

/// Default A4 the tables are retuned to: one semitone above 424 Hz.
pub const DEFAULT_TARGET_A4_HZ: f64 = 424.0 * SEMITONE_RATIO;

/// Frequency ratio of one 12-EDO semitone (2^(1/12)).
pub const SEMITONE_RATIO: f64 = 1.059_463_094_359_295_3;

/// Note number of A4 in the MIDI-style numbering used here.
const A4_NOTE: f64 = 69.0;

/// Convert a SID register value to the produced frequency in Hz (PAL).
pub fn chip_to_hz(freq: u16) -> f64 {
    (freq as f64) * PAL_CLOCK_HZ / ACCUMULATOR_RANGE
}

/// Convert a frequency in Hz to the SID register value (PAL).
///
/// The value is floored and then clamped into `[0, 0xFFFF]`; `NaN` maps to 0.
/// Scaling by 2^24 happens before the division so that
/// `hz_to_chip(chip_to_hz(f)) == f` holds for every register value.
pub fn hz_to_chip(hz: f64) -> u16 {
    let raw = (hz * ACCUMULATOR_RANGE / PAL_CLOCK_HZ).floor();
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, u16::MAX as f64) as u16
}

/// Note number (A4 = 69) of `hz` when A4 sounds at `reference_hz`.
pub fn hz_to_note(hz: f64, reference_hz: f64) -> f64 {
    12.0 * (hz / reference_hz).log2() + A4_NOTE
}

/// Frequency in Hz of `note` when A4 sounds at `reference_hz`.
pub fn note_to_hz(note: f64, reference_hz: f64) -> f64 {
    (reference_hz / 32.0) * 2_f64.powf((note - 9.0) / 12.0)
}

/// Interval from `from_hz` to `to_hz` in cents.
pub fn cents_between(from_hz: f64, to_hz: f64) -> f64 {
    (to_hz / from_hz).log2() * 1200.0
}

/// Whether `next` is one semitone above `prev` within `tolerance`
/// (absolute error on the ratio).
///
/// A zero `prev` never qualifies.
pub fn is_semitone_step(prev: u16, next: u16, tolerance: f64) -> bool {
    if prev == 0 {
        return false;
    }
    let ratio = next as f64 / prev as f64;
    (ratio - SEMITONE_RATIO).abs() <= tolerance
}
