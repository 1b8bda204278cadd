use crewforge::api;
use crewforge::config::Config;
use crewforge::model::{
    CharacterData, CharacterTable, Rank, RoomKind, ShipConfig, Stat, TierRecord,
};
use crewforge::solver::Assignment;

fn tier(room: RoomKind, stat: Stat, value: f64) -> TierRecord {
    TierRecord { room, stat, value }
}

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

fn fixture() -> (CharacterTable, Vec<(String, Rank)>, ShipConfig, Config) {
    let mut table = CharacterTable::default();
    table.insert("Ada", maker(20.0));
    table.insert("Bel", maker(10.0));
    table.insert("Cor", regen_char());
    let selection = vec![
        ("Ada".to_string(), Rank::E4),
        ("Bel".to_string(), Rank::E4),
        ("Cor".to_string(), Rank::E4),
    ];
    (table, selection, ShipConfig::standard(), Config::default())
}

fn rooms(names: &[&[&str]]) -> Vec<Vec<String>> {
    names
        .iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn test_valid_edit_replaces_assignment() {
    let (table, selection, ship, cfg) = fixture();
    let ctx = api::context(&table, &selection, &ship, &cfg).unwrap();
    let mut current = Assignment::empty(5);

    let ok = api::apply_manual_edit(
        &ctx,
        &mut current,
        &rooms(&[&["Cor"], &[], &["Ada", "Bel"], &[], &[]]),
    );
    assert!(ok);
    assert_eq!(current.occupants(0), &[2]);
    assert_eq!(current.occupants(2), &[0, 1]);
    assert_eq!(ctx.members[2].name, "Cor");
    assert_eq!(ctx.members[2].rank, Rank::E4);
}

#[test]
fn test_unknown_name_is_rejected() {
    let (table, selection, ship, cfg) = fixture();
    let ctx = api::context(&table, &selection, &ship, &cfg).unwrap();
    let mut current =
        Assignment::from_rooms(vec![vec![2], vec![], vec![0], vec![1], vec![]]);
    let before = current.clone();

    let ok = api::apply_manual_edit(
        &ctx,
        &mut current,
        &rooms(&[&[], &["Ghost"], &["Ada"], &["Bel"], &["Cor"]]),
    );
    assert!(!ok);
    assert_eq!(current, before, "a rejected edit must keep the prior layout");
}

#[test]
fn test_duplicate_placement_is_rejected() {
    let (table, selection, ship, cfg) = fixture();
    let ctx = api::context(&table, &selection, &ship, &cfg).unwrap();
    let mut current = Assignment::empty(5);

    let ok = api::apply_manual_edit(
        &ctx,
        &mut current,
        &rooms(&[&[], &["Ada"], &["Ada"], &[], &[]]),
    );
    assert!(!ok);
    assert_eq!(current, Assignment::empty(5));
}

#[test]
fn test_overfull_room_is_rejected() {
    let (mut table, mut selection, ship, cfg) = fixture();
    table.insert("Dee", maker(5.0));
    selection.push(("Dee".to_string(), Rank::E4));
    let ctx = api::context(&table, &selection, &ship, &cfg).unwrap();
    let mut current = Assignment::empty(5);

    let ok = api::apply_manual_edit(
        &ctx,
        &mut current,
        &rooms(&[&[], &[], &["Ada", "Bel", "Cor", "Dee"], &[], &[]]),
    );
    assert!(!ok);
}

#[test]
fn test_wrong_room_count_is_rejected() {
    let (table, selection, ship, cfg) = fixture();
    let ctx = api::context(&table, &selection, &ship, &cfg).unwrap();
    let mut current = Assignment::empty(5);

    let ok = api::apply_manual_edit(&ctx, &mut current, &rooms(&[&["Ada"], &[]]));
    assert!(!ok);
}

#[test]
fn test_rebuild_is_deterministic() {
    let (table, selection, ship, cfg) = fixture();
    let ctx = api::context(&table, &selection, &ship, &cfg).unwrap();
    let asg = Assignment::from_rooms(vec![vec![2], vec![1], vec![0], vec![], vec![]]);

    let first = api::rebuild(&ctx, &asg);
    let second = api::rebuild(&ctx, &asg);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_optimizer_report_matches_rebuild_of_its_assignment() {
    let (table, selection, ship, cfg) = fixture();
    let out = api::optimize(
        &table,
        &selection,
        &ship,
        &cfg,
        &mut crewforge::solver::driver::NoProgress,
    )
    .unwrap();
    let ctx = api::context(&table, &selection, &ship, &cfg).unwrap();
    let rebuilt = api::rebuild(&ctx, &out.assignment);
    // Swap counts differ by construction; the room breakdowns must not.
    assert_eq!(out.report.rooms, rebuilt.rooms);
    assert_eq!(out.report.summary.uptime, rebuilt.summary.uptime);
}

#[test]
fn test_empty_selection_yields_empty_report() {
    let (table, _, ship, cfg) = fixture();
    let out = api::optimize(
        &table,
        &[],
        &ship,
        &cfg,
        &mut crewforge::solver::driver::NoProgress,
    )
    .unwrap();
    assert_eq!(out.efficiency, 0.0);
    assert_eq!(out.configs_tried, 0);
    assert_eq!(out.report.rooms.len(), 5);
    assert!(out.report.rooms.iter().all(|r| r.operators.is_empty()));
    assert_eq!(out.report.summary.avg_production, 0.0);
}

#[test]
fn test_duplicate_selection_is_an_error() {
    let (table, _, ship, cfg) = fixture();
    let selection = vec![
        ("Ada".to_string(), Rank::E4),
        ("Ada".to_string(), Rank::E2),
    ];
    assert!(api::context(&table, &selection, &ship, &cfg).is_err());
}
