pub mod character;
pub mod room;

pub use character::{CharacterData, CharacterTable, Rank, Talent, TalentTier, TierRecord};
pub use room::{RoomKind, RoomTarget, ShipConfig, Stat};
