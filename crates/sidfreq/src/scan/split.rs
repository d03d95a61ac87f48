//! Detector for tables stored as two separate byte streams.
//!
//! ```text
//! LLLLLL ... LLLLLL   HHHHHH ... HHHHHH
//! ^ lo                ^ hi
//! ```
//!
//! The search runs in three passes:
//!
//! 1. Probe every `(lo, hi)` pair inside the search window, in both
//!    orientations.
//! 2. Group the probe hits by stream distance `|hi - lo|`, keeping the
//!    order in which each distance was first seen, and drop groups that
//!    are too small to be structural.
//! 3. Walk each group looking for a staircase `(lo + k, hi + k)` of hits,
//!    then refine the start of the accepted staircase.
use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::binutil::{displace, read_u16_split_at};
use crate::config::ScanConfig;
use crate::pitch::is_semitone_step;
use crate::scan::{Interrupt, Interrupted, NeverInterrupt, check_shard};
use crate::table::FreqTable;

/// A probe hit: (low-byte stream offset, high-byte stream offset).
pub type StreamPair = (usize, usize);

/// Probe hits sharing one stream distance.
#[derive(Debug, Clone)]
pub struct MatchGroup {
    pub distance: usize,
    members: Vec<StreamPair>,
    index: HashSet<StreamPair>,
}

impl MatchGroup {
    fn new(distance: usize) -> Self {
        MatchGroup {
            distance,
            members: Vec::new(),
            index: HashSet::new(),
        }
    }

    fn push(&mut self, pair: StreamPair) {
        if self.index.insert(pair) {
            self.members.push(pair);
        }
    }

    /// Members in discovery order.
    pub fn members(&self) -> &[StreamPair] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, pair: StreamPair) -> bool {
        self.index.contains(&pair)
    }
}

/// Result of a successful split scan, with the trace of how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitMatch {
    /// The located table, after boundary refinement.
    pub table: FreqTable,
    /// Staircase start before refinement.
    pub unrefined: StreamPair,
    /// Displacement applied by boundary refinement.
    pub refine_shift: isize,
    /// Stream distance of the winning group.
    pub distance: usize,
    /// Number of hits in the winning group.
    pub group_size: usize,
    /// Staircase length found (the required run length when complete).
    pub run_len: usize,
    /// Whether the staircase broke before reaching the required run length.
    pub partial_run: bool,
    /// Total probe hits over the whole body.
    pub probe_hits: usize,
    /// Number of groups that passed the size filter.
    pub significant_groups: usize,
}

/// A staircase of hits found inside one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: StreamPair,
    len: usize,
    partial: bool,
}

/// Search `body` for a split frequency table.
pub fn find_split_table(body: &[u8], cfg: &ScanConfig) -> Option<SplitMatch> {
    find_split_table_with(body, cfg, &NeverInterrupt).unwrap_or(None)
}

/// Like [`find_split_table`] but polls `interrupt` between offset shards.
pub fn find_split_table_with(
    body: &[u8],
    cfg: &ScanConfig,
    interrupt: &dyn Interrupt,
) -> Result<Option<SplitMatch>, Interrupted> {
    let hits = collect_hits(body, cfg, interrupt)?;
    let groups = group_by_distance(&hits);
    let significant: Vec<&MatchGroup> = groups
        .iter()
        .filter(|g| g.len() >= cfg.min_group_size)
        .collect();
    debug!(
        "split scan: {} probe hits, {} distance groups, {} significant",
        hits.len(),
        groups.len(),
        significant.len()
    );

    for group in &significant {
        let Some(run) = find_run(group, cfg) else {
            continue;
        };
        debug!(
            "split scan: staircase at lo=0x{:X} hi=0x{:X} (distance {}, run {}{})",
            run.start.0,
            run.start.1,
            group.distance,
            run.len,
            if run.partial { ", partial" } else { "" }
        );

        let shift = refine_shift(body, run.start, cfg).unwrap_or(0);
        let (lo, hi) = match (displace(run.start.0, shift), displace(run.start.1, shift)) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => run.start,
        };
        let len = if run.partial {
            run.len + cfg.length_pad
        } else {
            group.distance
        };

        return Ok(Some(SplitMatch {
            table: FreqTable::split(lo, hi, len),
            unrefined: run.start,
            refine_shift: shift,
            distance: group.distance,
            group_size: group.len(),
            run_len: run.len,
            partial_run: run.partial,
            probe_hits: hits.len(),
            significant_groups: significant.len(),
        }));
    }

    Ok(None)
}

/// Probe hits of `body` grouped by stream distance, in first-seen order.
///
/// Includes the groups too small to be considered by
/// [`find_split_table`]; useful for reporting.
pub fn split_match_groups(body: &[u8], cfg: &ScanConfig) -> Vec<MatchGroup> {
    collect_hits(body, cfg, &NeverInterrupt)
        .map(|hits| group_by_distance(&hits))
        .unwrap_or_default()
}

/// Pass 1: probe every pair in the window, both orientations.
fn collect_hits(
    body: &[u8],
    cfg: &ScanConfig,
    interrupt: &dyn Interrupt,
) -> Result<Vec<StreamPair>, Interrupted> {
    let limit = body.len().saturating_sub(cfg.split_min_gap);
    let mut hits = Vec::new();

    for a in 0..limit {
        check_shard(a, cfg.shard_len, interrupt)?;
        let end = limit.min(a + cfg.split_window);
        for b in (a + cfg.split_min_gap)..end {
            if probe(body, a, b, cfg) {
                trace!("possible split table lo=0x{:X} hi=0x{:X}", a, b);
                hits.push((a, b));
            }
            if probe(body, b, a, cfg) {
                trace!("possible split table lo=0x{:X} hi=0x{:X}", b, a);
                hits.push((b, a));
            }
        }
    }

    Ok(hits)
}

/// Check `probe_len` entries starting at `(lo, hi)`. Running off the end of
/// the body ends the probe without rejecting it.
fn probe(body: &[u8], lo: usize, hi: usize, cfg: &ScanConfig) -> bool {
    for step in 1..cfg.probe_len {
        let (Ok(prev), Ok(cur)) = (
            read_u16_split_at(body, lo + step - 1, hi + step - 1),
            read_u16_split_at(body, lo + step, hi + step),
        ) else {
            break;
        };
        if !is_semitone_step(prev, cur, cfg.split_tolerance) {
            return false;
        }
    }
    true
}

/// Pass 2: bucket hits by stream distance, ordered by first appearance.
fn group_by_distance(hits: &[StreamPair]) -> Vec<MatchGroup> {
    let mut groups: Vec<MatchGroup> = Vec::new();
    let mut slots: HashMap<usize, usize> = HashMap::new();

    for &pair in hits {
        let distance = pair.0.abs_diff(pair.1);
        let slot = *slots.entry(distance).or_insert_with(|| {
            groups.push(MatchGroup::new(distance));
            groups.len() - 1
        });
        groups[slot].push(pair);
    }

    groups
}

/// Pass 3: first member of `group` that starts a long enough staircase.
fn find_run(group: &MatchGroup, cfg: &ScanConfig) -> Option<Run> {
    let required = cfg.required_run(group.distance);

    for &(lo, hi) in group.members() {
        let gap = (1..required).find(|&k| !group.contains((lo + k, hi + k)));
        match gap {
            None => {
                return Some(Run {
                    start: (lo, hi),
                    len: required,
                    partial: false,
                });
            }
            Some(k) if k > cfg.partial_run_threshold => {
                return Some(Run {
                    start: (lo, hi),
                    len: k,
                    partial: true,
                });
            }
            Some(_) => {}
        }
    }

    None
}

/// Find how far the staircase start should move so it lines up with the
/// first real table entry.
///
/// Steps `-radius..radius` around `start` are classified as broken (both
/// entries readable, predecessor non-zero, ratio off) or not. The first
/// broken step followed by two unbroken ones marks the table start.
fn refine_shift(body: &[u8], start: StreamPair, cfg: &ScanConfig) -> Option<isize> {
    let radius = cfg.refine_radius as isize;
    let broken: Vec<bool> = (-radius..radius)
        .map(|d| step_broken(body, start, d, cfg.split_tolerance))
        .collect();

    let shift = broken
        .windows(3)
        .position(|w| w[0] && !w[1] && !w[2])
        .map(|j| j as isize - radius);
    if let Some(s) = shift {
        debug!("split scan: boundary refinement shift {}", s);
    }
    shift
}

fn step_broken(body: &[u8], (lo, hi): StreamPair, d: isize, tolerance: f64) -> bool {
    let entry = |delta: isize| -> Option<u16> {
        let l = displace(lo, delta)?;
        let h = displace(hi, delta)?;
        read_u16_split_at(body, l, h).ok()
    };
    match (entry(d - 1), entry(d)) {
        (Some(prev), Some(cur)) => prev != 0 && !is_semitone_step(prev, cur, tolerance),
        _ => false,
    }
}
