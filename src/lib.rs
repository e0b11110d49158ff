//! Converters for outfit and skin unlock dumps.
//!
//! Both formats are read line by line into [`dump::LineOutcome`]s, and the
//! accepted records are written out as a single JSON array.

pub mod cli;
pub mod dump;
pub mod guid;
pub mod outfit;
pub mod skin;

pub use dump::{Conversion, DumpError, LineOutcome, Rejection};
pub use outfit::{AvatarItem, FieldTag, OutfitDump, UnlockedItem};
pub use skin::{EquipmentUnlock, SkinDump};

/// Every converted record is unlocked at this level.
pub const UNLOCKED_LEVEL: i32 = 1;
