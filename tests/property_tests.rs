use crewforge::config::Config;
use crewforge::model::{
    CharacterData, CharacterTable, Rank, RoomKind, ShipConfig, Stat, TierRecord,
};
use crewforge::solver::driver::{drive, NoProgress};
use crewforge::solver::eval::EvalState;
use crewforge::solver::{Assignment, ShipContext};
use proptest::prelude::*;

const ROOMS: [RoomKind; 4] = [
    RoomKind::ControlNexus,
    RoomKind::ReceptionRoom,
    RoomKind::ManufacturingCabin,
    RoomKind::GrowthChamber,
];

const STATS: [Stat; 8] = [
    Stat::WeaponExp,
    Stat::OperatorExp,
    Stat::FungalMatter,
    Stat::Plant,
    Stat::RareMineral,
    Stat::ClueCollectingEfficiency,
    Stat::SlowMoodDrop,
    Stat::MoodRegen,
];

const RANKS: [Rank; 4] = [Rank::E1, Rank::E2, Rank::E3, Rank::E4];

fn arb_tier() -> impl Strategy<Value = TierRecord> {
    (0..ROOMS.len(), 0..STATS.len(), 0.0..50.0f64).prop_map(|(r, s, v)| TierRecord {
        room: ROOMS[r],
        stat: STATS[s],
        value: v,
    })
}

fn arb_character() -> impl Strategy<Value = CharacterData> {
    proptest::array::uniform4(arb_tier()).prop_map(|tiers| CharacterData { tiers })
}

fn arb_roster() -> impl Strategy<Value = Vec<(CharacterData, usize)>> {
    proptest::collection::vec((arb_character(), 0..RANKS.len()), 1..8)
}

fn build_ctx(roster: Vec<(CharacterData, usize)>) -> ShipContext {
    let mut table = CharacterTable::default();
    let mut selection = Vec::new();
    for (i, (data, rank)) in roster.into_iter().enumerate() {
        let name = format!("m{i}");
        table.insert(&name, data);
        selection.push((name, RANKS[rank]));
    }
    ShipContext::new(&table, &selection, ShipConfig::standard(), Config::default()).unwrap()
}

proptest! {
    #[test]
    fn prop_search_result_is_always_valid(roster in arb_roster()) {
        let ctx = build_ctx(roster);
        let outcome = drive(&ctx, &mut NoProgress);

        prop_assert!(outcome.assignment.check(ctx.members.len()).is_ok());
        prop_assert!(outcome.efficiency.is_finite());
        prop_assert!(outcome.efficiency >= 0.0);
        prop_assert!(!outcome.aborted);

        for &m in outcome.assignment.occupants(0) {
            prop_assert!(ctx.control_compatible(m));
        }
    }

    #[test]
    fn prop_reported_efficiency_matches_recompute(roster in arb_roster()) {
        let ctx = build_ctx(roster);
        let outcome = drive(&ctx, &mut NoProgress);
        let full = EvalState::full(&ctx, &outcome.assignment).total;
        prop_assert!(
            (outcome.efficiency - full).abs() < 1e-6,
            "driver reported {} but the layout scores {}",
            outcome.efficiency,
            full
        );
    }

    #[test]
    fn prop_probe_agrees_with_full_rebuild(
        roster in arb_roster(),
        from in 0..5usize,
        to in 0..5usize,
    ) {
        let ctx = build_ctx(roster);
        let outcome = drive(&ctx, &mut NoProgress);
        let base = outcome.assignment;
        prop_assume!(from != to);
        prop_assume!(!base.occupants(from).is_empty());
        prop_assume!(base.occupants(to).len() < 3);

        let eval = EvalState::full(&ctx, &base);
        let mut rooms: Vec<Vec<usize>> = base.rooms().to_vec();
        let moved = rooms[from].remove(0);
        rooms[to].push(moved);
        let mutated = Assignment::from_rooms(rooms);

        let probed = eval.probe(&ctx, &mutated, &[from, to]);
        let full = EvalState::full(&ctx, &mutated).total;
        prop_assert!((probed - full).abs() < 1e-6);
    }

    #[test]
    fn prop_talent_resolution_is_deduplicated(character in arb_character(), rank in 0..RANKS.len()) {
        let mut table = CharacterTable::default();
        table.insert("x", character);
        let talents = table.talents_for_rank("x", RANKS[rank]);
        prop_assert!(talents.len() <= 2);
        for (i, a) in talents.iter().enumerate() {
            for b in &talents[i + 1..] {
                prop_assert!(
                    (a.room, a.stat) != (b.room, b.stat),
                    "duplicate (room, stat) survived resolution"
                );
            }
        }
    }
}
