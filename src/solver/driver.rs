//! The outer search: enumerate every feasible control-room roster,
//! run greedy construction plus refinement for each, and keep the best
//! assignment found. Strict improvement only, so ties keep the roster
//! enumerated first.

use crate::config::ROOM_CAPACITY;
use crate::solver::greedy::greedy_assignment;
use crate::solver::refine::refine;
use crate::solver::{Assignment, ShipContext};
use tracing::debug;

/// Receives updates while a search runs. `on_progress` fires once per
/// roster tried with a monotonically increasing `done`; returning
/// `false` aborts the search between configurations. `yield_point`
/// fires every `yield_interval` rosters so a single-threaded host can
/// process its event loop between bursts.
pub trait ProgressSink {
    fn on_progress(&mut self, _done: usize, _total: usize) -> bool {
        true
    }
    fn yield_point(&mut self) {}
}

/// Sink for callers that just want the answer.
pub struct NoProgress;

impl ProgressSink for NoProgress {}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub assignment: Assignment,
    pub efficiency: f64,
    pub swaps: usize,
    pub configs_tried: usize,
    pub aborted: bool,
}

/// All k-subsets of `0..n`, lexicographic by index. Matches the order a
/// "take the head, recurse on the tail" generator would produce.
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k == 0 {
        out.push(Vec::new());
        return out;
    }
    if n < k {
        return out;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.clone());
        let mut i = k;
        while i > 0 && idx[i - 1] == n - k + (i - 1) {
            i -= 1;
        }
        if i == 0 {
            break;
        }
        idx[i - 1] += 1;
        for j in i..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
    out
}

/// Members eligible for control-room enumeration: those with the regen
/// talent at their selected rank.
pub fn control_candidates(ctx: &ShipContext) -> Vec<usize> {
    (0..ctx.members.len())
        .filter(|&m| ctx.control_candidate(m))
        .collect()
}

/// Every feasible control-room roster: the empty roster plus all
/// combinations of candidates up to room capacity.
pub fn control_rosters(candidates: &[usize]) -> Vec<Vec<usize>> {
    let mut rosters = vec![Vec::new()];
    for k in 1..=candidates.len().min(ROOM_CAPACITY) {
        for combo in combinations(candidates.len(), k) {
            rosters.push(combo.into_iter().map(|i| candidates[i]).collect());
        }
    }
    rosters
}

pub fn drive(ctx: &ShipContext, sink: &mut dyn ProgressSink) -> SearchOutcome {
    let candidates = control_candidates(ctx);
    let rosters = control_rosters(&candidates);
    let total = rosters.len();
    debug!(
        candidates = candidates.len(),
        rosters = total,
        members = ctx.members.len(),
        "enumerating control-room rosters"
    );

    let yield_interval = ctx.cfg.search.yield_interval.max(1);
    let mut best_assignment = Assignment::empty(ctx.ship.len());
    let mut best_efficiency = f64::NEG_INFINITY;
    let mut best_swaps = 0;
    let mut tried = 0;
    let mut aborted = false;

    for roster in &rosters {
        tried += 1;

        let mut assignment = greedy_assignment(ctx, roster);
        let outcome = refine(ctx, &mut assignment);

        if outcome.total > best_efficiency {
            best_efficiency = outcome.total;
            best_assignment = assignment;
            best_swaps = outcome.swaps;
        }

        if !sink.on_progress(tried, total) {
            aborted = true;
            break;
        }
        if tried % yield_interval == 0 {
            sink.yield_point();
        }
    }

    debug!(
        tried,
        best_efficiency, best_swaps, aborted, "control-roster enumeration finished"
    );

    SearchOutcome {
        assignment: best_assignment,
        efficiency: best_efficiency,
        swaps: best_swaps,
        configs_tried: tried,
        aborted,
    }
}
