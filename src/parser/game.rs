use num_enum::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Team ids as reported by the demo parsing service; unknown ids are unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, FromPrimitive)]
#[serde(from = "u8")]
#[repr(u8)]
pub enum Team {
    #[num_enum(default)]
    Unassigned = 0,
    Spectators = 1,
    Terrorists = 2,
    CounterTerrorists = 3,
}

impl Team {
    /// Short side tag used in event payloads, `?` for anyone not on a playing team.
    pub fn side(self) -> &'static str {
        match self {
            Team::Terrorists => "T",
            Team::CounterTerrorists => "CT",
            _ => "?",
        }
    }
}

impl Default for Team {
    fn default() -> Self {
        Team::Unassigned
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, FromPrimitive)]
#[serde(from = "u8")]
#[repr(u8)]
pub enum HitGroup {
    #[num_enum(default)]
    Generic = 0,
    Head = 1,
    Chest = 2,
    Stomach = 3,
    LeftArm = 4,
    RightArm = 5,
    LeftLeg = 6,
    RightLeg = 7,
    Neck = 8,
    Gear = 10,
}

impl Default for HitGroup {
    fn default() -> Self {
        HitGroup::Generic
    }
}

impl HitGroup {
    pub fn name(self) -> &'static str {
        match self {
            HitGroup::Generic => "Generic",
            HitGroup::Head => "Head",
            HitGroup::Chest => "Chest",
            HitGroup::Stomach => "Stomach",
            HitGroup::LeftArm => "LeftArm",
            HitGroup::RightArm => "RightArm",
            HitGroup::LeftLeg => "LeftLeg",
            HitGroup::RightLeg => "RightLeg",
            HitGroup::Neck => "Neck",
            HitGroup::Gear => "Gear",
        }
    }
}

impl fmt::Display for HitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Serialized by name so the payload matches the raw line.
impl Serialize for HitGroup {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
