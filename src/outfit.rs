//! Outfit dumps (`outfits_with_guids.txt`).
//!
//! Each line starts with three preamble tokens followed by tag/value pairs:
//!
//! ```text
//! <ignored> <ignored> <ignored> P: <guid> S: <guid> M: <guid> D: <guid>
//! ```
//!
//! Any tag may be missing. The four values become the comma separated
//! `AvatarItemDesc` of an unlocked avatar item.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{
    UNLOCKED_LEVEL,
    dump::{Conversion, LineOutcome, Rejection},
    guid::is_guid,
};

/// Number of leading tokens on a line that never hold a value.
pub const PREAMBLE_TOKENS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display)]
pub enum FieldTag {
    #[strum(serialize = "P:")]
    Primary,
    #[strum(serialize = "S:")]
    Secondary,
    #[strum(serialize = "M:")]
    Material,
    #[strum(serialize = "D:")]
    Decal,
}

impl FieldTag {
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldTag::Primary => "PrimaryId",
            FieldTag::Secondary => "SecondaryId",
            FieldTag::Material => "MaterialId",
            FieldTag::Decal => "DecalId",
        }
    }
}

/// The four guid slots of one outfit line. Empty slots are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarItem {
    pub primary: String,
    pub secondary: String,
    pub material: String,
    pub decal: String,
}

impl AvatarItem {
    pub fn get(&self, tag: FieldTag) -> &str {
        match tag {
            FieldTag::Primary => &self.primary,
            FieldTag::Secondary => &self.secondary,
            FieldTag::Material => &self.material,
            FieldTag::Decal => &self.decal,
        }
    }

    fn get_mut(&mut self, tag: FieldTag) -> &mut String {
        match tag {
            FieldTag::Primary => &mut self.primary,
            FieldTag::Secondary => &mut self.secondary,
            FieldTag::Material => &mut self.material,
            FieldTag::Decal => &mut self.decal,
        }
    }

    /// Checks the slots in P, S, M, D order and stops at the first bad one.
    pub fn validate(&self) -> Result<(), Rejection> {
        match FieldTag::iter().find(|tag| {
            let value = self.get(*tag);
            !value.is_empty() && !is_guid(value)
        }) {
            Some(tag) => Err(Rejection::InvalidGuid {
                field: tag.field_name().to_string(),
                value: self.get(tag).to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn desc(&self) -> String {
        FieldTag::iter()
            .map(|tag| self.get(tag))
            .collect::<Vec<&str>>()
            .join(",")
    }

    pub fn to_unlocked(&self) -> UnlockedItem {
        UnlockedItem {
            unlocked_level: UNLOCKED_LEVEL,
            avatar_item_desc: self.desc(),
        }
    }
}

/// An entry of the avatar items list served to the game client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnlockedItem {
    pub unlocked_level: i32,
    pub avatar_item_desc: String,
}

pub fn parse_line(line: &str) -> LineOutcome<AvatarItem> {
    let parts: Vec<&str> = line.split(' ').collect();

    let mut item = AvatarItem::default();

    // The last preamble token can still act as a tag for the first value.
    for pair in parts.windows(2).skip(PREAMBLE_TOKENS - 1) {
        if let Ok(tag) = pair[0].parse::<FieldTag>() {
            *item.get_mut(tag) = pair[1].trim().to_string();
        }
    }

    match item.validate() {
        Ok(()) => LineOutcome::Accepted(item),
        Err(reason) => LineOutcome::Rejected(reason),
    }
}

pub fn outfits_from_lines<S: AsRef<str>>(lines: &[S]) -> Vec<LineOutcome<AvatarItem>> {
    OutfitDump::outcomes(lines)
}

pub fn convert_outfits<S: AsRef<str>>(lines: &[S]) -> Vec<UnlockedItem> {
    OutfitDump::convert(lines)
}

pub struct OutfitDump;

impl Conversion for OutfitDump {
    const DEFAULT_INPUT: &'static str = "outfits_with_guids.txt";

    type Parsed = AvatarItem;
    type Record = UnlockedItem;

    fn parse_line(line: &str) -> LineOutcome<AvatarItem> {
        parse_line(line)
    }

    /// The first accepted record of a dump is a leading artifact and is always
    /// dropped, whatever it contains. With nothing accepted the document is
    /// simply empty rather than an error.
    fn finish(accepted: Vec<AvatarItem>) -> Vec<UnlockedItem> {
        accepted
            .iter()
            .skip(1)
            .map(AvatarItem::to_unlocked)
            .collect()
    }
}
