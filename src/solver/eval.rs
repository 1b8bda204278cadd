//! The efficiency model and the cached total used by the local search.
//!
//! A room's effective output is `nominal * uptime`, where nominal grows
//! with occupancy and production talents and uptime is the work/rest
//! duty cycle driven by mood drop and the control room's pooled regen.
//! The control room itself produces nothing; it only feeds the global
//! regen modifier into every other room's uptime.

use crate::config::BaseRates;
use crate::model::Stat;
use crate::solver::{Assignment, ShipContext};

/// Fraction of wall-clock time a room spends working, given its summed
/// mood-drop reduction and the global regen bonus. Drop reduction is
/// clamped below 100 so the effective drop stays positive.
pub fn uptime_fraction(rates: &BaseRates, drop_reduction: f64, regen_bonus: f64) -> f64 {
    let clamped = drop_reduction.min(rates.max_drop_reduction);
    let effective_drop = rates.base_mood_drop * (1.0 - clamped / 100.0);
    let effective_regen = rates.base_mood_regen * (1.0 + regen_bonus / 100.0);

    let work_hours = 100.0 / effective_drop;
    let rest_hours = 100.0 / effective_regen;

    work_hours / (work_hours + rest_hours)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomEfficiency {
    pub nominal: f64,
    pub uptime: f64,
    pub effective: f64,
}

pub fn room_efficiency(
    rates: &BaseRates,
    occupant_count: usize,
    production_bonus: f64,
    drop_reduction: f64,
    global_regen: f64,
) -> RoomEfficiency {
    let base = rates.base_efficiency + rates.operator_bonus * occupant_count as f64;
    let nominal = base * (1.0 + production_bonus / 100.0);
    let uptime = uptime_fraction(rates, drop_reduction, global_regen);
    RoomEfficiency {
        nominal,
        uptime,
        effective: nominal * uptime,
    }
}

/// Summed talent contributions of a room's occupants, split the way the
/// efficiency model consumes them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoomStats {
    pub production_bonus: f64,
    pub slow_mood_drop: f64,
    pub mood_regen: f64,
}

pub fn room_stats(ctx: &ShipContext, room: usize, occupants: &[usize]) -> RoomStats {
    let kind = ctx.ship.kind(room);
    let relevant = ctx.ship.active_stats(room);
    let mut stats = RoomStats::default();
    for &m in occupants {
        for t in ctx.members[m].talents_in(kind) {
            // Regen is tracked separately even for the control room,
            // where it is also the "production" stat.
            if t.stat == Stat::MoodRegen {
                stats.mood_regen += t.value;
            } else if relevant.contains(&t.stat) {
                stats.production_bonus += t.value;
            } else if t.stat == Stat::SlowMoodDrop {
                stats.slow_mood_drop += t.value;
            }
        }
    }
    stats
}

/// The global regen modifier pooled from the control room's occupants.
pub fn global_regen(ctx: &ShipContext, assignment: &Assignment) -> f64 {
    let control = ctx.ship.control_index();
    room_stats(ctx, control, assignment.occupants(control)).mood_regen
}

/// Effective efficiency of a non-control room. Multi-product rooms get
/// the arithmetic mean over their active products, each product seeing
/// only its own summed bonus; drop reduction and regen are shared.
pub fn room_effective(ctx: &ShipContext, room: usize, occupants: &[usize], regen: f64) -> f64 {
    let kind = ctx.ship.kind(room);
    let rates = &ctx.cfg.rates;
    let stats = room_stats(ctx, room, occupants);
    let products = ctx.ship.active_stats(room);

    if products.len() > 1 {
        let mut sum = 0.0;
        for &product in &products {
            let mut bonus = 0.0;
            for &m in occupants {
                for t in ctx.members[m].talents_in(kind) {
                    if t.stat == product {
                        bonus += t.value;
                    }
                }
            }
            sum += room_efficiency(
                rates,
                occupants.len(),
                bonus,
                stats.slow_mood_drop,
                regen,
            )
            .effective;
        }
        sum / products.len() as f64
    } else {
        room_efficiency(
            rates,
            occupants.len(),
            stats.production_bonus,
            stats.slow_mood_drop,
            regen,
        )
        .effective
    }
}

/// Cached per-room efficiencies and their sum, the search objective.
/// Candidate moves are probed against this cache: when the control room
/// is untouched only the affected rooms are re-scored; a control-room
/// touch invalidates the shared regen and rebuilds everything.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalState {
    pub per_room: Vec<f64>,
    pub total: f64,
    pub global_regen: f64,
}

impl EvalState {
    pub fn full(ctx: &ShipContext, assignment: &Assignment) -> Self {
        let control = ctx.ship.control_index();
        let regen = global_regen(ctx, assignment);
        let mut per_room = Vec::with_capacity(assignment.room_count());
        let mut total = 0.0;
        for i in 0..assignment.room_count() {
            let eff = if i == control {
                0.0
            } else {
                room_effective(ctx, i, assignment.occupants(i), regen)
            };
            per_room.push(eff);
            total += eff;
        }
        Self {
            per_room,
            total,
            global_regen: regen,
        }
    }

    /// Total the assignment would score, given that only `touched`
    /// rooms changed since this state was computed. The assignment is
    /// already mutated; this never commits anything.
    pub fn probe(&self, ctx: &ShipContext, assignment: &Assignment, touched: &[usize]) -> f64 {
        let control = ctx.ship.control_index();
        if touched.contains(&control) {
            return Self::full(ctx, assignment).total;
        }
        let mut total = self.total;
        for (i, &room) in touched.iter().enumerate() {
            if touched[..i].contains(&room) {
                continue;
            }
            total -= self.per_room[room];
            total += room_effective(ctx, room, assignment.occupants(room), self.global_regen);
        }
        total
    }

    /// Folds an accepted move into the cache.
    pub fn commit(&mut self, ctx: &ShipContext, assignment: &Assignment, touched: &[usize]) {
        let control = ctx.ship.control_index();
        if touched.contains(&control) {
            *self = Self::full(ctx, assignment);
            return;
        }
        for (i, &room) in touched.iter().enumerate() {
            if touched[..i].contains(&room) {
                continue;
            }
            let eff = room_effective(ctx, room, assignment.occupants(room), self.global_regen);
            self.total += eff - self.per_room[room];
            self.per_room[room] = eff;
        }
    }
}
