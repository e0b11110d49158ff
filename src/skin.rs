//! Skin dumps (`skins.txt`), one `<prefab name> <modification guid>` pair per line.

use serde::{Deserialize, Serialize};

use crate::{
    UNLOCKED_LEVEL,
    dump::{Conversion, LineOutcome, Rejection},
    guid::is_guid,
};

/// An unlocked equipment skin as served to the game client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EquipmentUnlock {
    pub prefab_name: String,
    pub modification_guid: String,
    pub unlocked_level: i32,
    pub favorited: bool,
}

impl EquipmentUnlock {
    pub fn new(prefab_name: &str, modification_guid: &str) -> Self {
        Self {
            prefab_name: prefab_name.to_string(),
            modification_guid: modification_guid.to_string(),
            unlocked_level: UNLOCKED_LEVEL,
            favorited: false,
        }
    }
}

pub fn parse_line(line: &str) -> LineOutcome<EquipmentUnlock> {
    let line = line.trim_end_matches('\n');
    let parts: Vec<&str> = line.split(' ').collect();

    let [prefab_name, guid] = parts[..] else {
        return LineOutcome::Rejected(Rejection::ColumnCount { found: parts.len() });
    };

    if !is_guid(guid) {
        return LineOutcome::Rejected(Rejection::InvalidGuid {
            field: "ModificationGuid".to_string(),
            value: guid.to_string(),
        });
    }

    LineOutcome::Accepted(EquipmentUnlock::new(prefab_name, guid))
}

pub fn skins_from_lines<S: AsRef<str>>(lines: &[S]) -> Vec<LineOutcome<EquipmentUnlock>> {
    SkinDump::outcomes(lines)
}

pub fn convert_skins<S: AsRef<str>>(lines: &[S]) -> Vec<EquipmentUnlock> {
    SkinDump::convert(lines)
}

pub struct SkinDump;

impl Conversion for SkinDump {
    const DEFAULT_INPUT: &'static str = "skins.txt";

    type Parsed = EquipmentUnlock;
    type Record = EquipmentUnlock;

    fn parse_line(line: &str) -> LineOutcome<EquipmentUnlock> {
        parse_line(line)
    }

    fn finish(accepted: Vec<EquipmentUnlock>) -> Vec<EquipmentUnlock> {
        accepted
    }
}
