use crewforge::error::CrewForgeError;
use crewforge::model::{CharacterTable, Rank, RoomKind, Stat, TalentTier};

const MINIMAL: &str = r#"{
  "Testchar": {
    "tiers": [
      {"room": "Control Nexus", "stat": "Mood Regen", "value": 8},
      {"room": "Manufacturing Cabin", "stat": "Weapon EXP", "value": 20},
      {"room": "Control Nexus", "stat": "Mood Regen", "value": 12},
      {"room": "Manufacturing Cabin", "stat": "Weapon EXP", "value": 30}
    ]
  }
}"#;

#[test]
fn test_parse_game_vocabulary() {
    let table = CharacterTable::from_json_str(MINIMAL).unwrap();
    assert_eq!(table.len(), 1);

    let data = table.get("Testchar").unwrap();
    assert_eq!(data.tiers[0].room, RoomKind::ControlNexus);
    assert_eq!(data.tiers[0].stat, Stat::MoodRegen);
    assert_eq!(data.tiers[0].value, 8.0);
    assert_eq!(data.tiers[3].stat, Stat::WeaponExp);

    // E4 resolves to the upgraded slots.
    let talents = table.talents_for_rank("Testchar", Rank::E4);
    assert_eq!(talents.len(), 2);
    assert_eq!(talents[0].value, 12.0);
    assert_eq!(talents[0].tier, TalentTier::T3);
    assert_eq!(talents[1].value, 30.0);
}

#[test]
fn test_load_from_tempfile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chars.json");
    std::fs::write(&path, MINIMAL).unwrap();

    let table = CharacterTable::load_from_file(&path).unwrap();
    assert!(table.contains("Testchar"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = CharacterTable::load_from_file("/nonexistent/chars.json").unwrap_err();
    assert!(matches!(err, CrewForgeError::Io(_)));
}

#[test]
fn test_malformed_json_is_rejected() {
    let err = CharacterTable::from_json_str("{\"X\": {\"tiers\": []}}").unwrap_err();
    assert!(matches!(err, CrewForgeError::Json(_)));

    let err = CharacterTable::from_json_str("not json").unwrap_err();
    assert!(matches!(err, CrewForgeError::Json(_)));
}

#[test]
fn test_unknown_stat_is_rejected() {
    let bad = MINIMAL.replace("Mood Regen", "Vibes");
    assert!(CharacterTable::from_json_str(&bad).is_err());
}

#[test]
fn test_shipped_table_loads() {
    let table = CharacterTable::load_from_file("data/characters.json").unwrap();
    assert_eq!(table.len(), 22);
    assert!(table.contains("Perlica"));

    // Perlica is the canonical control pick: regen at t1, upgraded at t3.
    let talents = table.talents_for_room("Perlica", RoomKind::ControlNexus, Rank::E4);
    assert_eq!(talents.len(), 1);
    assert_eq!(talents[0].stat, Stat::MoodRegen);
    assert_eq!(talents[0].value, 12.0);

    // Every entry resolves at every rank without panicking.
    for name in table.names() {
        for rank in [Rank::E1, Rank::E2, Rank::E3, Rank::E4] {
            let talents = table.talents_for_rank(name, rank);
            assert!(!talents.is_empty());
            assert!(talents.len() <= 2);
        }
    }
}
