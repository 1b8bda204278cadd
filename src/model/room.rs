use crate::error::{CfResult, CrewForgeError};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Every stat a ship talent can carry. Clue rate-ups exist in the data
/// with zero magnitude; they make a character eligible for a room but
/// contribute nothing to efficiency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Stat {
    #[serde(rename = "Weapon EXP")]
    #[strum(to_string = "Weapon EXP", serialize = "weapon_exp")]
    WeaponExp,
    #[serde(rename = "Operator EXP")]
    #[strum(to_string = "Operator EXP", serialize = "operator_exp")]
    OperatorExp,
    #[serde(rename = "Fungal Matter")]
    #[strum(to_string = "Fungal Matter", serialize = "fungal_matter")]
    FungalMatter,
    #[serde(rename = "Plant")]
    #[strum(to_string = "Plant", serialize = "plant")]
    Plant,
    #[serde(rename = "Rare Mineral")]
    #[strum(to_string = "Rare Mineral", serialize = "rare_mineral")]
    RareMineral,
    #[serde(rename = "Clue Collecting Efficiency")]
    #[strum(to_string = "Clue Collecting Efficiency", serialize = "clue_efficiency")]
    ClueCollectingEfficiency,
    #[serde(rename = "Slow Mood Drop")]
    #[strum(to_string = "Slow Mood Drop", serialize = "slow_mood_drop")]
    SlowMoodDrop,
    #[serde(rename = "Mood Regen")]
    #[strum(to_string = "Mood Regen", serialize = "mood_regen")]
    MoodRegen,
    #[serde(rename = "Clue 1 Rate-UP")]
    #[strum(to_string = "Clue 1 Rate-UP", serialize = "clue1_rate_up")]
    Clue1RateUp,
    #[serde(rename = "Clue 2 Rate-UP")]
    #[strum(to_string = "Clue 2 Rate-UP", serialize = "clue2_rate_up")]
    Clue2RateUp,
    #[serde(rename = "Clue 3 Rate-UP")]
    #[strum(to_string = "Clue 3 Rate-UP", serialize = "clue3_rate_up")]
    Clue3RateUp,
    #[serde(rename = "Clue 4 Rate-UP")]
    #[strum(to_string = "Clue 4 Rate-UP", serialize = "clue4_rate_up")]
    Clue4RateUp,
    #[serde(rename = "Clue 5 Rate-UP")]
    #[strum(to_string = "Clue 5 Rate-UP", serialize = "clue5_rate_up")]
    Clue5RateUp,
    #[serde(rename = "Clue 6 Rate-UP")]
    #[strum(to_string = "Clue 6 Rate-UP", serialize = "clue6_rate_up")]
    Clue6RateUp,
    #[serde(rename = "Clue 7 Rate-UP")]
    #[strum(to_string = "Clue 7 Rate-UP", serialize = "clue7_rate_up")]
    Clue7RateUp,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum RoomKind {
    #[serde(rename = "Control Nexus")]
    #[strum(to_string = "Control Nexus", serialize = "control_nexus")]
    ControlNexus,
    #[serde(rename = "Reception Room")]
    #[strum(to_string = "Reception Room", serialize = "reception")]
    ReceptionRoom,
    #[serde(rename = "Manufacturing Cabin")]
    #[strum(to_string = "Manufacturing Cabin", serialize = "manufacturing")]
    ManufacturingCabin,
    #[serde(rename = "Growth Chamber")]
    #[strum(to_string = "Growth Chamber", serialize = "growth")]
    GrowthChamber,
}

impl RoomKind {
    /// Stats a room of this kind produces when no explicit target is set.
    pub fn production_stats(self) -> &'static [Stat] {
        match self {
            Self::ManufacturingCabin => &[Stat::WeaponExp, Stat::OperatorExp],
            Self::GrowthChamber => &[Stat::FungalMatter, Stat::Plant, Stat::RareMineral],
            Self::ReceptionRoom => &[Stat::ClueCollectingEfficiency],
            Self::ControlNexus => &[Stat::MoodRegen],
        }
    }
}

/// What a configurable room is currently set to produce. Manufacturing
/// cabins run one product at a time; growth chambers run any subset of
/// their three products, averaged into the room's efficiency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomTarget {
    Single(Stat),
    Multi(Vec<Stat>),
}

impl RoomTarget {
    pub fn stats(&self) -> &[Stat] {
        match self {
            Self::Single(s) => std::slice::from_ref(s),
            Self::Multi(v) => v,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Single(s) => s.to_string(),
            Self::Multi(v) => v
                .iter()
                .map(Stat::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// The fixed shape of the ship: an ordered list of room kinds with an
/// optional target per room. Exactly one control room.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipConfig {
    rooms: Vec<RoomKind>,
    targets: Vec<Option<RoomTarget>>,
    control: usize,
}

impl ShipConfig {
    pub fn new(rooms: Vec<RoomKind>, targets: Vec<Option<RoomTarget>>) -> CfResult<Self> {
        if rooms.is_empty() {
            return Err(CrewForgeError::Validation("ship has no rooms".into()));
        }
        if rooms.len() != targets.len() {
            return Err(CrewForgeError::Validation(format!(
                "{} rooms but {} target slots",
                rooms.len(),
                targets.len()
            )));
        }
        let controls: Vec<usize> = rooms
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == RoomKind::ControlNexus)
            .map(|(i, _)| i)
            .collect();
        if controls.len() != 1 {
            return Err(CrewForgeError::Validation(format!(
                "ship must have exactly one Control Nexus, found {}",
                controls.len()
            )));
        }
        Ok(Self {
            control: controls[0],
            rooms,
            targets,
        })
    }

    /// Default ship: control, reception, three manufacturing cabins on
    /// Weapon EXP.
    pub fn standard() -> Self {
        Self::with_bays([RoomKind::ManufacturingCabin; 3])
    }

    /// Control + reception with the three configurable bays set to the
    /// given kinds, each carrying its kind's default target.
    pub fn with_bays(bays: [RoomKind; 3]) -> Self {
        let mut rooms = vec![RoomKind::ControlNexus, RoomKind::ReceptionRoom];
        rooms.extend(bays);
        debug_assert_eq!(rooms.len(), crate::config::ROOM_COUNT);
        let targets = rooms.iter().map(|k| Self::default_target(*k)).collect();
        // The room list above always carries exactly one control room.
        Self {
            rooms,
            targets,
            control: 0,
        }
    }

    /// The target a room of this kind gets when freshly configured.
    pub fn default_target(kind: RoomKind) -> Option<RoomTarget> {
        match kind {
            RoomKind::ManufacturingCabin => Some(RoomTarget::Single(Stat::WeaponExp)),
            RoomKind::GrowthChamber => Some(RoomTarget::Multi(vec![
                Stat::FungalMatter,
                Stat::Plant,
                Stat::RareMineral,
            ])),
            _ => None,
        }
    }

    pub fn rooms(&self) -> &[RoomKind] {
        &self.rooms
    }

    pub fn kind(&self, index: usize) -> RoomKind {
        self.rooms[index]
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn control_index(&self) -> usize {
        self.control
    }

    pub fn target(&self, index: usize) -> Option<&RoomTarget> {
        self.targets.get(index).and_then(|t| t.as_ref())
    }

    pub fn set_target(&mut self, index: usize, target: RoomTarget) -> CfResult<()> {
        if index >= self.rooms.len() {
            return Err(CrewForgeError::Validation(format!(
                "room index {index} out of range"
            )));
        }
        if index == self.control {
            return Err(CrewForgeError::Validation(
                "the Control Nexus has no production target".into(),
            ));
        }
        let kind = self.rooms[index];
        if target.stats().is_empty() {
            return Err(CrewForgeError::Validation(
                "a production target needs at least one stat".into(),
            ));
        }
        // Only growth chambers run a subset of products; every other
        // room kind is single-product.
        if matches!(target, RoomTarget::Multi(_)) && kind != RoomKind::GrowthChamber {
            return Err(CrewForgeError::Validation(format!(
                "a {kind} runs a single product at a time"
            )));
        }
        for stat in target.stats() {
            if !kind.production_stats().contains(stat) {
                return Err(CrewForgeError::Validation(format!(
                    "'{stat}' is not produced by a {kind}"
                )));
            }
        }
        self.targets[index] = Some(target);
        Ok(())
    }

    /// The stats that count as production for a room: its explicit
    /// target if set, otherwise its kind's defaults.
    pub fn active_stats(&self, index: usize) -> Vec<Stat> {
        match self.target(index) {
            Some(t) => t.stats().to_vec(),
            None => self.rooms[index].production_stats().to_vec(),
        }
    }
}
