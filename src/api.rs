//! Caller-facing services: run an optimization, re-run the analysis
//! under rank bumps, and apply manual occupant edits. This is the seam
//! a host UI talks to; everything below it is pure in-memory work.

use crate::config::Config;
use crate::error::CfResult;
use crate::model::{CharacterTable, Rank, ShipConfig};
use crate::results::{build_results, empty_report, LayoutReport};
use crate::solver::driver::{drive, ProgressSink};
use crate::solver::roi::{self, RoiReport};
use crate::solver::{Assignment, ShipContext};

#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    pub report: LayoutReport,
    /// Raw placement, kept alongside the report so manual edits can
    /// start from what the optimizer found.
    pub assignment: Assignment,
    pub efficiency: f64,
    pub configs_tried: usize,
    pub aborted: bool,
}

/// Runs the full search and builds the display report for the best
/// assignment. An empty selection short-circuits to an all-empty
/// report; the progress contract still gets its completion call.
pub fn optimize(
    table: &CharacterTable,
    selection: &[(String, Rank)],
    ship: &ShipConfig,
    cfg: &Config,
    sink: &mut dyn ProgressSink,
) -> CfResult<OptimizeOutcome> {
    if selection.is_empty() {
        sink.on_progress(0, 0);
        return Ok(OptimizeOutcome {
            report: empty_report(ship),
            assignment: Assignment::empty(ship.len()),
            efficiency: 0.0,
            configs_tried: 0,
            aborted: false,
        });
    }

    let ctx = ShipContext::new(table, selection, ship.clone(), cfg.clone())?;
    let outcome = drive(&ctx, sink);
    let report = build_results(&ctx, &outcome.assignment, outcome.swaps);
    Ok(OptimizeOutcome {
        report,
        assignment: outcome.assignment,
        efficiency: outcome.efficiency,
        configs_tried: outcome.configs_tried,
        aborted: outcome.aborted,
    })
}

/// Builds a context without running the search. Useful for rebuilding
/// reports after manual edits.
pub fn context(
    table: &CharacterTable,
    selection: &[(String, Rank)],
    ship: &ShipConfig,
    cfg: &Config,
) -> CfResult<ShipContext> {
    ShipContext::new(table, selection, ship.clone(), cfg.clone())
}

/// Re-derives the report for an assignment, e.g. after a drag-and-drop
/// edit. Swap count reads zero in that case.
pub fn rebuild(ctx: &ShipContext, assignment: &Assignment) -> LayoutReport {
    build_results(ctx, assignment, 0)
}

/// Applies a manually edited placement given by character names. The
/// edit is validated first (every name must be in the selection, no
/// character twice, no room over capacity) and on any violation the
/// prior assignment is kept and `false` returned.
pub fn apply_manual_edit(
    ctx: &ShipContext,
    current: &mut Assignment,
    edited: &[Vec<String>],
) -> bool {
    if edited.len() != current.room_count() {
        return false;
    }
    let mut rooms = Vec::with_capacity(edited.len());
    for names in edited {
        let mut room = Vec::with_capacity(names.len());
        for name in names {
            match ctx.member_index(name) {
                Some(m) => room.push(m),
                None => return false,
            }
        }
        rooms.push(room);
    }
    let candidate = Assignment::from_rooms(rooms);
    if candidate.check(ctx.members.len()).is_err() {
        return false;
    }
    *current = candidate;
    true
}

/// Ranks every affordable rank upgrade by its marginal efficiency gain.
pub fn analyze_roi(
    table: &CharacterTable,
    selection: &[(String, Rank)],
    ship: &ShipConfig,
    cfg: &Config,
    sink: &mut dyn ProgressSink,
) -> CfResult<RoiReport> {
    roi::analyze(table, selection, ship, cfg, sink)
}
