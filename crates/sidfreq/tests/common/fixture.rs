// Synthetic player bodies used across the integration tests.
#![allow(dead_code)]

use sidfreq::pitch::{LEGACY_A4_HZ, hz_to_chip, note_to_hz};

/// `count` register values for consecutive semitones starting at `first_note`
/// (A4 = 440 Hz).
pub fn semitone_run(first_note: i32, count: usize) -> Vec<u16> {
    (0..count)
        .map(|i| hz_to_chip(note_to_hz((first_note + i as i32) as f64, LEGACY_A4_HZ)))
        .collect()
}

/// Write `freqs` as a low-byte stream at `lo` and a high-byte stream at `hi`.
pub fn place_split(body: &mut [u8], lo: usize, hi: usize, freqs: &[u16]) {
    for (i, f) in freqs.iter().enumerate() {
        let [low, high] = f.to_le_bytes();
        body[lo + i] = low;
        body[hi + i] = high;
    }
}

/// Write `freqs` as little-endian words starting at `start`.
pub fn place_interleaved(body: &mut [u8], start: usize, freqs: &[u16]) {
    for (i, f) in freqs.iter().enumerate() {
        body[start + i * 2..start + i * 2 + 2].copy_from_slice(&f.to_le_bytes());
    }
}

/// Deterministic byte noise (32-bit LCG, top byte).
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut x = seed;
    (0..len)
        .map(|_| {
            x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (x >> 24) as u8
        })
        .collect()
}
