//! Frequency table scanners.
//!
//! Two detectors are provided, one per table layout:
//!
//! - [`split::find_split_table`] looks for a low-byte stream and a
//!   high-byte stream at two different offsets.
//! - [`interleaved::find_interleaved_table`] looks for a stream of
//!   little-endian words.
//!
//! Both work the same way: every candidate start offset is *probed* by
//! decoding a short run of entries and checking that each one is a
//! semitone above its predecessor. Probe hits are then filtered by how
//! many neighbouring offsets also hit, since a genuine table produces a
//! long staircase of hits while coincidences stay isolated.
//!
//! The `*_with` variants poll an [`Interrupt`] between shards of probe
//! offsets so a caller can abandon a long scan.
use std::sync::atomic::{AtomicBool, Ordering};

pub mod interleaved;
pub mod split;

pub use interleaved::{InterleavedMatch, find_interleaved_table};
pub use split::{MatchGroup, SplitMatch, find_split_table, split_match_groups};

/// Cancellation seam polled by the scanners between offset shards.
pub trait Interrupt {
    fn interrupted(&self) -> bool;
}

/// An interrupt that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverInterrupt;

impl Interrupt for NeverInterrupt {
    fn interrupted(&self) -> bool {
        false
    }
}

impl Interrupt for AtomicBool {
    fn interrupted(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Returned by the `*_with` scanners when the interrupt fired mid-scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

/// Poll `interrupt` at the first offset of every shard.
pub(crate) fn check_shard(
    offset: usize,
    shard_len: usize,
    interrupt: &dyn Interrupt,
) -> Result<(), Interrupted> {
    if offset % shard_len.max(1) == 0 && interrupt.interrupted() {
        return Err(Interrupted);
    }
    Ok(())
}
