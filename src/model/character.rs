use crate::error::CfResult;
use crate::model::room::{RoomKind, Stat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Elite ranks. `max` in imported data is an alias for E4 (both slots
/// fully upgraded, same active tiers).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Rank {
    #[serde(rename = "e1")]
    #[strum(to_string = "E1")]
    E1,
    #[serde(rename = "e2")]
    #[strum(to_string = "E2")]
    E2,
    #[serde(rename = "e3")]
    #[strum(to_string = "E3")]
    E3,
    #[serde(rename = "e4", alias = "max")]
    #[strum(to_string = "E4", serialize = "max")]
    E4,
}

/// The four talent tier records every character carries, in data order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum TalentTier {
    #[serde(rename = "t1")]
    #[strum(to_string = "e1")]
    T1,
    #[serde(rename = "t2")]
    #[strum(to_string = "e2")]
    T2,
    #[serde(rename = "t3")]
    #[strum(to_string = "e3")]
    T3,
    #[serde(rename = "t4")]
    #[strum(to_string = "e4")]
    T4,
}

impl TalentTier {
    /// Position of this tier's record in a character's `tiers` array.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Rank {
    pub const MAX: Rank = Rank::E4;

    /// Which talent tiers are live at this rank, in resolution walk
    /// order. Slot 1 upgrades at E3, slot 2 at E4; the E3 pair walks
    /// the upgraded slot first, which is what makes first-seen-wins
    /// dedup keep the upgraded record on a key collision.
    pub fn active_tiers(self) -> &'static [TalentTier] {
        match self {
            Rank::E1 => &[TalentTier::T1],
            Rank::E2 => &[TalentTier::T1, TalentTier::T2],
            Rank::E3 => &[TalentTier::T3, TalentTier::T2],
            Rank::E4 => &[TalentTier::T3, TalentTier::T4],
        }
    }

    /// Ranks strictly above this one, ascending.
    pub fn reachable_above(self) -> &'static [Rank] {
        match self {
            Rank::E1 => &[Rank::E2, Rank::E3, Rank::E4],
            Rank::E2 => &[Rank::E3, Rank::E4],
            Rank::E3 => &[Rank::E4],
            Rank::E4 => &[],
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::MAX
    }
}

/// One tier's contribution as it appears in the data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRecord {
    pub room: RoomKind,
    pub stat: Stat,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterData {
    pub tiers: [TierRecord; 4],
}

/// A talent a character actually provides at some rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Talent {
    pub room: RoomKind,
    pub stat: Stat,
    pub value: f64,
    pub tier: TalentTier,
}

/// The static character talent table, keyed by character name. Loaded
/// once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct CharacterTable {
    chars: HashMap<String, CharacterData>,
}

impl CharacterTable {
    pub fn from_reader<R: Read>(reader: R) -> CfResult<Self> {
        let chars: HashMap<String, CharacterData> = serde_json::from_reader(reader)?;
        Ok(Self { chars })
    }

    pub fn from_json_str(json: &str) -> CfResult<Self> {
        let chars: HashMap<String, CharacterData> = serde_json::from_str(json)?;
        Ok(Self { chars })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn insert(&mut self, name: impl Into<String>, data: CharacterData) {
        self.chars.insert(name.into(), data);
    }

    pub fn get(&self, name: &str) -> Option<&CharacterData> {
        self.chars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// All character names, sorted for stable iteration.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.chars.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Talents a character provides at the given rank. Walks the rank's
    /// active tiers in order and keeps the first record seen per
    /// (room, stat) key; later collisions are skipped even when their
    /// magnitude is larger. Unknown characters resolve to no talents.
    pub fn talents_for_rank(&self, name: &str, rank: Rank) -> Vec<Talent> {
        let Some(data) = self.chars.get(name) else {
            return Vec::new();
        };
        let mut talents: Vec<Talent> = Vec::with_capacity(2);
        for &tier in rank.active_tiers() {
            let rec = &data.tiers[tier.index()];
            if talents
                .iter()
                .any(|t| t.room == rec.room && t.stat == rec.stat)
            {
                continue;
            }
            talents.push(Talent {
                room: rec.room,
                stat: rec.stat,
                value: rec.value,
                tier,
            });
        }
        talents
    }

    /// Same as [`talents_for_rank`], filtered to one room kind.
    ///
    /// [`talents_for_rank`]: Self::talents_for_rank
    pub fn talents_for_room(&self, name: &str, room: RoomKind, rank: Rank) -> Vec<Talent> {
        let mut talents = self.talents_for_rank(name, rank);
        talents.retain(|t| t.room == room);
        talents
    }
}
