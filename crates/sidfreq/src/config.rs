//! Tunables for table detection and retuning.
//!
//! The thresholds here were tuned empirically against the tables written
//! by common C64 trackers and player routines. They are exposed so callers
//! can experiment, but the defaults are what the detector is known to work
//! with.
use crate::pitch::{DEFAULT_TARGET_A4_HZ, LEGACY_A4_HZ};

/// Scanner parameters shared by the split and interleaved detectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    /// Maximum distance (exclusive) between the low-byte and high-byte
    /// streams of a split table.
    pub split_window: usize,
    /// Minimum distance between the two streams of a split table. Also the
    /// number of trailing bytes that are never used as a probe start.
    pub split_min_gap: usize,
    /// Allowed absolute error on the semitone ratio for split probes.
    pub split_tolerance: f64,
    /// Allowed absolute error on the semitone ratio for interleaved probes.
    pub interleaved_tolerance: f64,
    /// Number of consecutive entries a probe checks.
    pub probe_len: usize,
    /// Trailing bytes that are never used as an interleaved probe start;
    /// also the cap of the interleaved run search.
    pub interleaved_tail: usize,
    /// Minimum number of probe hits sharing a stream distance.
    pub min_group_size: usize,
    /// Subtracted from the stream distance to get the required run length.
    pub run_distance_bias: usize,
    /// Lower bound of the required run length.
    pub run_floor: usize,
    /// Upper bound of the required run length.
    pub run_ceiling: usize,
    /// A run that breaks after more steps than this is still accepted.
    pub partial_run_threshold: usize,
    /// Half width of the boundary refinement window.
    pub refine_radius: usize,
    /// Entries added to the run length when the table end is uncertain.
    pub length_pad: usize,
    /// Interleaved candidates must be longer than this.
    pub min_interleaved_len: usize,
    /// Offsets probed between two interrupt checks.
    pub shard_len: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            split_window: 640,
            split_min_gap: 6,
            split_tolerance: 0.01,
            interleaved_tolerance: 0.05,
            probe_len: 32,
            interleaved_tail: 256,
            min_group_size: 2,
            run_distance_bias: 56,
            run_floor: 12,
            run_ceiling: 256,
            partial_run_threshold: 24,
            refine_radius: 32,
            length_pad: 32,
            min_interleaved_len: 6,
            shard_len: 256,
        }
    }
}

impl ScanConfig {
    /// Number of consecutive probe hits a split group needs for a stream
    /// distance of `distance` bytes.
    pub fn required_run(&self, distance: usize) -> usize {
        distance
            .saturating_sub(self.run_distance_bias)
            .max(self.run_floor)
            .min(self.run_ceiling)
    }
}

/// Reference pitches used when reading and rewriting a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchConfig {
    /// A4 the table is assumed to be written in; only used to find the
    /// first note of the table.
    pub legacy_a4_hz: f64,
    /// A4 the table is rewritten to.
    pub target_a4_hz: f64,
}

impl Default for PitchConfig {
    fn default() -> Self {
        PitchConfig {
            legacy_a4_hz: LEGACY_A4_HZ,
            target_a4_hz: DEFAULT_TARGET_A4_HZ,
        }
    }
}

/// Full configuration of the detect-then-retune pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TuneConfig {
    pub scan: ScanConfig,
    pub pitch: PitchConfig,
}
