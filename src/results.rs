//! Pure result builder: turns a finished assignment into the
//! display-ready breakdown. No hidden state: the same assignment and
//! context always produce an identical report, whether it came from
//! the optimizer or from a manual edit.

use crate::model::{Rank, RoomKind, Stat, TalentTier};
use crate::solver::eval::{room_efficiency, room_stats, uptime_fraction};
use crate::solver::{Assignment, ShipContext};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLine {
    pub stat: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorReport {
    pub name: String,
    pub rank: Rank,
    /// Contributions toward this room; empty when nothing matched.
    /// Drop reduction shows up as a negative "Mood Drop" delta.
    pub stats: Vec<StatLine>,
    /// Highest talent tier that contributed.
    pub tier: TalentTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEfficiency {
    pub product: Stat,
    pub effective: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomReport {
    pub name: String,
    pub kind: RoomKind,
    pub target: Option<String>,
    pub operators: Vec<OperatorReport>,
    /// `None` for the control room, which has no output of its own.
    pub efficiency: Option<f64>,
    /// Per-product split for multi-product rooms.
    pub efficiency_by_product: Option<Vec<ProductEfficiency>>,
    pub production_bonus: f64,
    pub slow_mood_drop: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Occupant-weighted mean uptime across production rooms (%).
    pub uptime: f64,
    /// Mean effective efficiency of manufacturing and growth rooms.
    pub avg_production: f64,
    /// Effective efficiency of the reception room.
    pub clue_efficiency: f64,
    pub global_regen_bonus: f64,
    pub swaps_made: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub rooms: Vec<RoomReport>,
    pub summary: Summary,
}

pub fn build_results(ctx: &ShipContext, assignment: &Assignment, swaps_made: usize) -> LayoutReport {
    let rates = &ctx.cfg.rates;
    let control = ctx.ship.control_index();
    let regen = room_stats(ctx, control, assignment.occupants(control)).mood_regen;

    let mut rooms = Vec::with_capacity(ctx.ship.len());
    let mut uptime_acc = 0.0;
    let mut uptime_weight = 0.0;

    for i in 0..ctx.ship.len() {
        let kind = ctx.ship.kind(i);
        let occupants = assignment.occupants(i);
        let relevant = ctx.ship.active_stats(i);

        let mut production_bonus = 0.0;
        let mut slow_mood_drop = 0.0;

        let operators: Vec<OperatorReport> = occupants
            .iter()
            .map(|&m| {
                let member = &ctx.members[m];
                let mut stats = Vec::new();
                let mut tier = TalentTier::T1;
                for t in member.talents_in(kind) {
                    if relevant.contains(&t.stat) {
                        production_bonus += t.value;
                        stats.push(StatLine {
                            stat: t.stat.to_string(),
                            value: t.value,
                        });
                        tier = tier.max(t.tier);
                    } else if t.stat == Stat::SlowMoodDrop {
                        slow_mood_drop += t.value;
                        stats.push(StatLine {
                            stat: "Mood Drop".to_string(),
                            value: -t.value,
                        });
                        tier = tier.max(t.tier);
                    }
                }
                if stats.is_empty() {
                    tier = TalentTier::T1;
                }
                OperatorReport {
                    name: member.name.clone(),
                    rank: member.rank,
                    stats,
                    tier,
                }
            })
            .collect();

        let (efficiency, efficiency_by_product) = if kind == RoomKind::ControlNexus {
            (None, None)
        } else if relevant.len() > 1 {
            let mut split = Vec::with_capacity(relevant.len());
            for &product in &relevant {
                let mut bonus = 0.0;
                for &m in occupants {
                    for t in ctx.members[m].talents_in(kind) {
                        if t.stat == product {
                            bonus += t.value;
                        }
                    }
                }
                let eff =
                    room_efficiency(rates, occupants.len(), bonus, slow_mood_drop, regen);
                split.push(ProductEfficiency {
                    product,
                    effective: eff.effective,
                });
            }
            let avg = split.iter().map(|p| p.effective).sum::<f64>() / split.len() as f64;
            (Some(avg), Some(split))
        } else {
            let eff = room_efficiency(
                rates,
                occupants.len(),
                production_bonus,
                slow_mood_drop,
                regen,
            );
            (Some(eff.effective), None)
        };

        if kind != RoomKind::ControlNexus && !occupants.is_empty() {
            let weight = occupants.len() as f64;
            uptime_acc += uptime_fraction(rates, slow_mood_drop, regen) * weight;
            uptime_weight += weight;
        }

        rooms.push(RoomReport {
            name: kind.to_string(),
            kind,
            target: ctx.ship.target(i).map(|t| t.display()),
            operators,
            efficiency,
            efficiency_by_product,
            production_bonus,
            slow_mood_drop,
        });
    }

    let uptime = if uptime_weight > 0.0 {
        uptime_acc / uptime_weight * 100.0
    } else {
        uptime_fraction(rates, 0.0, regen) * 100.0
    };

    let production_rooms: Vec<&RoomReport> = rooms
        .iter()
        .filter(|r| {
            r.kind == RoomKind::ManufacturingCabin || r.kind == RoomKind::GrowthChamber
        })
        .collect();
    let avg_production = if production_rooms.is_empty() {
        0.0
    } else {
        production_rooms
            .iter()
            .filter_map(|r| r.efficiency)
            .sum::<f64>()
            / production_rooms.len() as f64
    };

    let clue_efficiency = rooms
        .iter()
        .find(|r| r.kind == RoomKind::ReceptionRoom)
        .and_then(|r| r.efficiency)
        .unwrap_or(0.0);

    LayoutReport {
        rooms,
        summary: Summary {
            uptime,
            avg_production,
            clue_efficiency,
            global_regen_bonus: regen,
            swaps_made,
        },
    }
}

/// The report an empty selection produces: every room listed, nobody
/// assigned, all aggregates zero.
pub fn empty_report(ship: &crate::model::ShipConfig) -> LayoutReport {
    let control = ship.control_index();
    let rooms = (0..ship.len())
        .map(|i| {
            let kind = ship.kind(i);
            RoomReport {
                name: kind.to_string(),
                kind,
                target: ship.target(i).map(|t| t.display()),
                operators: Vec::new(),
                efficiency: if i == control { None } else { Some(0.0) },
                efficiency_by_product: None,
                production_bonus: 0.0,
                slow_mood_drop: 0.0,
            }
        })
        .collect();
    LayoutReport {
        rooms,
        summary: Summary {
            uptime: 0.0,
            avg_production: 0.0,
            clue_efficiency: 0.0,
            global_regen_bonus: 0.0,
            swaps_made: 0,
        },
    }
}
