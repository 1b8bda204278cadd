pub mod driver;
pub mod eval;
pub mod greedy;
pub mod refine;
pub mod roi;

use crate::config::{Config, ROOM_CAPACITY};
use crate::error::{CfResult, CrewForgeError};
use crate::model::{CharacterTable, Rank, RoomKind, ShipConfig, Stat, Talent};

/// One selected character with talents resolved at their chosen rank.
/// Ranks are fixed for the lifetime of a context; a rank change means a
/// new context.
#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub rank: Rank,
    pub talents: Vec<Talent>,
}

impl Member {
    pub fn talents_in(&self, room: RoomKind) -> impl Iterator<Item = &Talent> {
        self.talents.iter().filter(move |t| t.room == room)
    }
}

/// Everything one optimization run needs: the resolved roster, the ship
/// shape, and the tuning constants. Owned by the caller and passed by
/// reference into the constructor, refiner, and result builder.
#[derive(Debug, Clone)]
pub struct ShipContext {
    pub members: Vec<Member>,
    pub ship: ShipConfig,
    pub cfg: Config,
}

impl ShipContext {
    /// Resolves each selected character's talents against the table.
    /// Characters missing from the table are kept with no talents (they
    /// still fill slots for the flat occupancy bonus). Duplicate names
    /// are a caller bug and rejected.
    pub fn new(
        table: &CharacterTable,
        selection: &[(String, Rank)],
        ship: ShipConfig,
        cfg: Config,
    ) -> CfResult<Self> {
        let mut members = Vec::with_capacity(selection.len());
        for (name, rank) in selection {
            if members.iter().any(|m: &Member| m.name == *name) {
                return Err(CrewForgeError::Validation(format!(
                    "character '{name}' selected twice"
                )));
            }
            members.push(Member {
                name: name.clone(),
                rank: *rank,
                talents: table.talents_for_rank(name, *rank),
            });
        }
        Ok(Self { members, ship, cfg })
    }

    pub fn member_index(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|m| m.name == name)
    }

    /// Whether a member may occupy the control room at all: any control
    /// talent at their rank qualifies.
    pub fn control_compatible(&self, member: usize) -> bool {
        self.members[member]
            .talents_in(RoomKind::ControlNexus)
            .next()
            .is_some()
    }

    /// Whether a member is worth enumerating as a control-room pick:
    /// they must actually carry the regen talent.
    pub fn control_candidate(&self, member: usize) -> bool {
        self.members[member]
            .talents_in(RoomKind::ControlNexus)
            .any(|t| t.stat == Stat::MoodRegen)
    }

    /// Members not placed anywhere in the assignment, in roster order.
    pub fn unassigned(&self, assignment: &Assignment) -> Vec<usize> {
        (0..self.members.len())
            .filter(|&m| !assignment.contains(m))
            .collect()
    }
}

/// Room index -> ordered occupant list (member indices). The search
/// mutates this in place; manual edits replace it wholesale after
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub(crate) rooms: Vec<Vec<usize>>,
}

impl Assignment {
    pub fn empty(room_count: usize) -> Self {
        Self {
            rooms: vec![Vec::new(); room_count],
        }
    }

    pub fn from_rooms(rooms: Vec<Vec<usize>>) -> Self {
        Self { rooms }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn occupants(&self, room: usize) -> &[usize] {
        &self.rooms[room]
    }

    pub fn rooms(&self) -> &[Vec<usize>] {
        &self.rooms
    }

    pub fn contains(&self, member: usize) -> bool {
        self.rooms.iter().any(|r| r.contains(&member))
    }

    pub fn assigned_count(&self) -> usize {
        self.rooms.iter().map(Vec::len).sum()
    }

    /// Checks the structural invariants: capacity respected, member
    /// indices in range, nobody placed twice.
    pub fn check(&self, member_count: usize) -> CfResult<()> {
        let mut seen = vec![false; member_count];
        for (i, room) in self.rooms.iter().enumerate() {
            if room.len() > ROOM_CAPACITY {
                return Err(CrewForgeError::Validation(format!(
                    "room {i} holds {} occupants (capacity {ROOM_CAPACITY})",
                    room.len()
                )));
            }
            for &m in room {
                if m >= member_count {
                    return Err(CrewForgeError::Validation(format!(
                        "room {i} references unknown member index {m}"
                    )));
                }
                if seen[m] {
                    return Err(CrewForgeError::Validation(format!(
                        "member index {m} placed in more than one room"
                    )));
                }
                seen[m] = true;
            }
        }
        Ok(())
    }
}
