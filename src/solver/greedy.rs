//! Phase 1: greedy construction. With the control room fixed, fill the
//! remaining rooms slot by slot, always taking the best-scoring
//! eligible character under the room's current state. Order-dependent
//! by design; the refiner cleans up after it.

use crate::config::ROOM_CAPACITY;
use crate::model::Stat;
use crate::solver::eval::{room_stats, uptime_fraction};
use crate::solver::{Assignment, ShipContext};

struct RoomScore {
    score: f64,
    mood_value: f64,
}

/// Scores one member for one room given the room's accumulated mood
/// drop so far. `None` means the member has no talent for this room
/// kind at all and can only be a filler pick.
fn score_for_room(
    ctx: &ShipContext,
    member: usize,
    room: usize,
    current_drop: f64,
    regen: f64,
) -> Option<RoomScore> {
    let kind = ctx.ship.kind(room);
    let mut any = false;
    let mut production = 0.0;
    let mut mood = 0.0;
    let relevant = ctx.ship.active_stats(room);
    for t in ctx.members[member].talents_in(kind) {
        any = true;
        if relevant.contains(&t.stat) {
            production += t.value;
        } else if t.stat == Stat::SlowMoodDrop {
            mood += t.value;
        }
    }
    if !any {
        return None;
    }

    // Value the uptime gain this member's drop reduction would add on
    // top of the room's running total, scaled to a full room's nominal
    // output so it is commensurate with production percentage points.
    let rates = &ctx.cfg.rates;
    let gain = uptime_fraction(rates, current_drop + mood, regen)
        - uptime_fraction(rates, current_drop, regen);
    Some(RoomScore {
        score: production + gain * 100.0 * rates.full_room_factor(),
        mood_value: mood,
    })
}

fn fill_room(
    ctx: &ShipContext,
    room: usize,
    assignment: &mut Assignment,
    available: &mut Vec<usize>,
    regen: f64,
) {
    let mut current_drop = 0.0;
    for _ in 0..ROOM_CAPACITY {
        let mut best_pos = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut best_mood = 0.0;
        for (pos, &m) in available.iter().enumerate() {
            if let Some(s) = score_for_room(ctx, m, room, current_drop, regen) {
                if s.score > best_score {
                    best_score = s.score;
                    best_pos = Some(pos);
                    best_mood = s.mood_value;
                }
            }
        }

        if let Some(pos) = best_pos {
            let m = available.remove(pos);
            assignment.rooms[room].push(m);
            current_drop += best_mood;
        } else if !available.is_empty() {
            // Nobody matches this room; any occupant still brings the
            // flat per-operator bonus.
            let m = available.remove(0);
            assignment.rooms[room].push(m);
        }
    }
}

/// Builds a complete assignment around a fixed control-room roster.
pub fn greedy_assignment(ctx: &ShipContext, fixed_control: &[usize]) -> Assignment {
    let control = ctx.ship.control_index();
    let mut assignment = Assignment::empty(ctx.ship.len());
    assignment.rooms[control] = fixed_control.to_vec();

    let mut available: Vec<usize> = (0..ctx.members.len())
        .filter(|m| !fixed_control.contains(m))
        .collect();

    let regen = room_stats(ctx, control, fixed_control).mood_regen;

    for room in 0..ctx.ship.len() {
        if room == control {
            continue;
        }
        fill_room(ctx, room, &mut assignment, &mut available, regen);
    }

    assignment
}
