//! Marginal-value analysis: how much total efficiency each character's
//! rank upgrade would buy. Re-runs the full driver, totals only, with
//! one character's rank bumped per trial.

use crate::config::Config;
use crate::error::CfResult;
use crate::model::{CharacterTable, Rank, ShipConfig};
use crate::solver::driver::{drive, NoProgress, ProgressSink};
use crate::solver::ShipContext;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiRow {
    pub name: String,
    pub current_rank: Rank,
    pub target_rank: Rank,
    pub new_efficiency: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiReport {
    pub baseline: f64,
    pub results: Vec<RoiRow>,
    pub aborted: bool,
}

/// Runs one sub-optimization per (character, reachable higher rank)
/// pair and reports the efficiency delta against the unmodified
/// baseline, ranked descending. Progress counts pairs; yields follow
/// the driver's interval. An empty selection reports a zero baseline
/// and no rows without running the search, like the optimize path.
pub fn analyze(
    table: &CharacterTable,
    selection: &[(String, Rank)],
    ship: &ShipConfig,
    cfg: &Config,
    sink: &mut dyn ProgressSink,
) -> CfResult<RoiReport> {
    if selection.is_empty() {
        sink.on_progress(0, 0);
        return Ok(RoiReport {
            baseline: 0.0,
            results: Vec::new(),
            aborted: false,
        });
    }

    let base_ctx = ShipContext::new(table, selection, ship.clone(), cfg.clone())?;
    let baseline = drive(&base_ctx, &mut NoProgress).efficiency;

    let pairs: Vec<(usize, Rank)> = selection
        .iter()
        .enumerate()
        .flat_map(|(i, (_, rank))| rank.reachable_above().iter().map(move |&t| (i, t)))
        .collect();
    let total = pairs.len();
    debug!(baseline, pairs = total, "starting rank-upgrade analysis");

    let yield_interval = cfg.search.yield_interval.max(1);
    let mut results = Vec::with_capacity(total);
    let mut aborted = false;

    for (done, &(member, target_rank)) in pairs.iter().enumerate() {
        let mut bumped = selection.to_vec();
        bumped[member].1 = target_rank;
        let ctx = ShipContext::new(table, &bumped, ship.clone(), cfg.clone())?;
        let new_efficiency = drive(&ctx, &mut NoProgress).efficiency;

        results.push(RoiRow {
            name: selection[member].0.clone(),
            current_rank: selection[member].1,
            target_rank,
            new_efficiency,
            delta: new_efficiency - baseline,
        });

        let done = done + 1;
        if !sink.on_progress(done, total) {
            aborted = true;
            break;
        }
        if done % yield_interval == 0 {
            sink.yield_point();
        }
    }
    if total == 0 {
        sink.on_progress(0, 0);
    }

    results.sort_by(|a, b| b.delta.total_cmp(&a.delta));

    Ok(RoiReport {
        baseline,
        results,
        aborted,
    })
}
