//! Phase 2: local search. Repeatedly applies improving moves (pairwise
//! cross-room swaps, substitutions from the unassigned pool, and single
//! relocations) until a full pass finds nothing or the iteration cap
//! hits. Every candidate is probed through the delta-evaluation cache;
//! only accepted moves are committed.

use crate::config::ROOM_CAPACITY;
use crate::solver::eval::EvalState;
use crate::solver::{Assignment, ShipContext};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefineOutcome {
    pub iterations: usize,
    pub swaps: usize,
    pub total: f64,
}

enum Placement {
    Append(usize),
    Displace(usize, usize),
}

pub fn refine(ctx: &ShipContext, assignment: &mut Assignment) -> RefineOutcome {
    let control = ctx.ship.control_index();
    let epsilon = ctx.cfg.search.epsilon;
    let max_iterations = ctx.cfg.search.max_iterations;
    let room_count = assignment.room_count();

    let mut eval = EvalState::full(ctx, assignment);
    let mut best = eval.total;
    let mut iterations = 0;
    let mut swaps = 0;
    let mut improved = true;

    while improved && iterations < max_iterations {
        improved = false;
        iterations += 1;

        // Pairwise cross-room swaps.
        for room_a in 0..room_count {
            for room_b in room_a + 1..room_count {
                for slot_a in 0..assignment.rooms[room_a].len() {
                    for slot_b in 0..assignment.rooms[room_b].len() {
                        let a = assignment.rooms[room_a][slot_a];
                        let b = assignment.rooms[room_b][slot_b];

                        if room_a == control && !ctx.control_compatible(b) {
                            continue;
                        }
                        if room_b == control && !ctx.control_compatible(a) {
                            continue;
                        }

                        assignment.rooms[room_a][slot_a] = b;
                        assignment.rooms[room_b][slot_b] = a;

                        let candidate = eval.probe(ctx, assignment, &[room_a, room_b]);
                        if candidate > best + epsilon {
                            eval.commit(ctx, assignment, &[room_a, room_b]);
                            best = candidate;
                            improved = true;
                            swaps += 1;
                        } else {
                            assignment.rooms[room_a][slot_a] = a;
                            assignment.rooms[room_b][slot_b] = b;
                        }
                    }
                }
            }
        }

        // Substitutions from the unassigned pool. The incumbent is
        // re-homed wherever it helps most (appended to a spare slot,
        // swapped over somebody, or left unassigned); the whole edit
        // commits only if it beats the current best. First improvement
        // ends the phase, since the pool has changed.
        let unassigned = ctx.unassigned(assignment);
        'substitution: for room in 0..room_count {
            for slot in 0..assignment.rooms[room].len() {
                let incumbent = assignment.rooms[room][slot];

                for &candidate_member in &unassigned {
                    if room == control && !ctx.control_compatible(candidate_member) {
                        continue;
                    }

                    assignment.rooms[room][slot] = candidate_member;

                    let mut best_candidate = eval.probe(ctx, assignment, &[room]);
                    let mut placement: Option<Placement> = None;

                    for target in 0..room_count {
                        if target == room {
                            continue;
                        }
                        if target == control && !ctx.control_compatible(incumbent) {
                            continue;
                        }

                        if assignment.rooms[target].len() < ROOM_CAPACITY {
                            assignment.rooms[target].push(incumbent);
                            let c = eval.probe(ctx, assignment, &[room, target]);
                            if c > best_candidate {
                                best_candidate = c;
                                placement = Some(Placement::Append(target));
                            }
                            assignment.rooms[target].pop();
                        }

                        for target_slot in 0..assignment.rooms[target].len() {
                            let displaced = assignment.rooms[target][target_slot];
                            assignment.rooms[target][target_slot] = incumbent;
                            let c = eval.probe(ctx, assignment, &[room, target]);
                            if c > best_candidate {
                                best_candidate = c;
                                placement = Some(Placement::Displace(target, target_slot));
                            }
                            assignment.rooms[target][target_slot] = displaced;
                        }
                    }

                    if best_candidate > best + epsilon {
                        let touched: Vec<usize> = match placement {
                            Some(Placement::Append(target)) => {
                                assignment.rooms[target].push(incumbent);
                                vec![room, target]
                            }
                            Some(Placement::Displace(target, target_slot)) => {
                                // Whoever was displaced drops back into
                                // the pool for the next iteration.
                                assignment.rooms[target][target_slot] = incumbent;
                                vec![room, target]
                            }
                            None => vec![room],
                        };
                        eval.commit(ctx, assignment, &touched);
                        best = best_candidate;
                        improved = true;
                        swaps += 1;
                        break 'substitution;
                    } else {
                        assignment.rooms[room][slot] = incumbent;
                    }
                }
            }
        }

        // Relocations into rooms with spare capacity. Never empties a
        // room completely.
        for room_a in 0..room_count {
            for room_b in 0..room_count {
                if room_a == room_b {
                    continue;
                }
                let mut slot_a = 0;
                while slot_a < assignment.rooms[room_a].len() {
                    if assignment.rooms[room_a].len() <= 1
                        || assignment.rooms[room_b].len() >= ROOM_CAPACITY
                    {
                        break;
                    }
                    let a = assignment.rooms[room_a][slot_a];
                    if room_b == control && !ctx.control_compatible(a) {
                        slot_a += 1;
                        continue;
                    }

                    assignment.rooms[room_a].remove(slot_a);
                    assignment.rooms[room_b].push(a);

                    let candidate = eval.probe(ctx, assignment, &[room_a, room_b]);
                    if candidate > best + epsilon {
                        eval.commit(ctx, assignment, &[room_a, room_b]);
                        best = candidate;
                        improved = true;
                        swaps += 1;
                    } else {
                        assignment.rooms[room_b].pop();
                        assignment.rooms[room_a].insert(slot_a, a);
                    }
                    slot_a += 1;
                }
            }
        }

        debug_assert!(
            (eval.total - EvalState::full(ctx, assignment).total).abs() < 1e-9,
            "delta-evaluation cache drifted from a full recomputation"
        );
    }

    RefineOutcome {
        iterations,
        swaps,
        total: best,
    }
}
