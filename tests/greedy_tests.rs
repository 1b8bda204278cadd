use crewforge::config::Config;
use crewforge::model::{
    CharacterData, CharacterTable, Rank, RoomKind, ShipConfig, Stat, TierRecord,
};
use crewforge::solver::greedy::greedy_assignment;
use crewforge::solver::ShipContext;

fn tier(room: RoomKind, stat: Stat, value: f64) -> TierRecord {
    TierRecord { room, stat, value }
}

/// A character whose E4 talents (t3, t4) are both manufacturing.
fn maker(weapon_exp: f64) -> CharacterData {
    CharacterData {
        tiers: [
            tier(RoomKind::ManufacturingCabin, Stat::WeaponExp, 5.0),
            tier(RoomKind::GrowthChamber, Stat::Plant, 5.0),
            tier(RoomKind::ManufacturingCabin, Stat::WeaponExp, weapon_exp),
            tier(RoomKind::ManufacturingCabin, Stat::OperatorExp, 10.0),
        ],
    }
}

fn receptionist() -> CharacterData {
    CharacterData {
        tiers: [
            tier(RoomKind::ReceptionRoom, Stat::ClueCollectingEfficiency, 10.0),
            tier(RoomKind::GrowthChamber, Stat::Plant, 5.0),
            tier(RoomKind::ReceptionRoom, Stat::ClueCollectingEfficiency, 20.0),
            tier(RoomKind::ReceptionRoom, Stat::SlowMoodDrop, 15.0),
        ],
    }
}

fn regen_char() -> CharacterData {
    CharacterData {
        tiers: [
            tier(RoomKind::ControlNexus, Stat::MoodRegen, 8.0),
            tier(RoomKind::ReceptionRoom, Stat::ClueCollectingEfficiency, 5.0),
            tier(RoomKind::ControlNexus, Stat::MoodRegen, 12.0),
            tier(RoomKind::ControlNexus, Stat::SlowMoodDrop, 5.0),
        ],
    }
}

fn ctx_with(chars: Vec<(&str, CharacterData)>) -> ShipContext {
    let mut table = CharacterTable::default();
    let mut selection = Vec::new();
    for (name, data) in chars {
        table.insert(name, data);
        selection.push((name.to_string(), Rank::E4));
    }
    ShipContext::new(&table, &selection, ShipConfig::standard(), Config::default()).unwrap()
}

#[test]
fn test_fixed_control_roster_is_kept() {
    let ctx = ctx_with(vec![
        ("M1", maker(10.0)),
        ("R1", regen_char()),
        ("M2", maker(20.0)),
    ]);
    let asg = greedy_assignment(&ctx, &[1]);
    assert_eq!(asg.occupants(0), &[1]);
    assert!(asg.check(ctx.members.len()).is_ok());
    // The control member is placed exactly once.
    let placements = asg.rooms().iter().filter(|r| r.contains(&1)).count();
    assert_eq!(placements, 1);
}

#[test]
fn test_everyone_gets_placed() {
    let ctx = ctx_with(vec![
        ("M1", maker(10.0)),
        ("M2", maker(20.0)),
        ("M3", maker(30.0)),
        ("R1", receptionist()),
        ("C1", regen_char()),
    ]);
    let asg = greedy_assignment(&ctx, &[]);
    assert_eq!(asg.assigned_count(), 5);
    assert!(asg.check(ctx.members.len()).is_ok());
    assert!(asg.occupants(0).is_empty());
}

#[test]
fn test_specialist_claims_reception_before_fillers() {
    let ctx = ctx_with(vec![
        ("M1", maker(10.0)),
        ("R1", receptionist()),
        ("M2", maker(20.0)),
    ]);
    let asg = greedy_assignment(&ctx, &[]);
    // Reception fills first; the only eligible member takes the first
    // slot, fillers follow in roster order.
    assert_eq!(asg.occupants(1)[0], 1);
}

#[test]
fn test_best_scorer_picked_first() {
    // Six manufacturing-only members: the first three become reception
    // fillers, the rest are placed into the first cabin best-first.
    let ctx = ctx_with(vec![
        ("F1", maker(1.0)),
        ("F2", maker(2.0)),
        ("F3", maker(3.0)),
        ("Weak", maker(10.0)),
        ("Strong", maker(30.0)),
        ("Mid", maker(20.0)),
    ]);
    let asg = greedy_assignment(&ctx, &[]);
    assert_eq!(asg.occupants(1), &[0, 1, 2]);
    assert_eq!(asg.occupants(2), &[4, 5, 3]);
}

#[test]
fn test_rooms_never_exceed_capacity() {
    let chars: Vec<(&str, CharacterData)> = vec![
        ("A", maker(10.0)),
        ("B", maker(11.0)),
        ("C", maker(12.0)),
        ("D", maker(13.0)),
        ("E", maker(14.0)),
        ("F", maker(15.0)),
        ("G", maker(16.0)),
        ("H", receptionist()),
        ("I", regen_char()),
    ];
    let ctx = ctx_with(chars);
    let asg = greedy_assignment(&ctx, &[8]);
    assert!(asg.check(ctx.members.len()).is_ok());
    for room in asg.rooms() {
        assert!(room.len() <= 3);
    }
    assert_eq!(asg.assigned_count(), 9);
}
