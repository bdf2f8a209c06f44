use num_enum::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Equipment identifiers as reported by the demo parsing service.
///
/// Ids the service adds later fall back to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Deserialize, FromPrimitive)]
#[serde(from = "u16")]
#[repr(u16)]
pub enum Equipment {
    #[num_enum(default)]
    Unknown = 0,

    P2000 = 1,
    Glock = 2,
    P250 = 3,
    Deagle = 4,
    FiveSeven = 5,
    DualBerettas = 6,
    Tec9 = 7,
    Cz = 8,
    Usp = 9,
    Revolver = 10,

    Mp7 = 101,
    Mp9 = 102,
    Bizon = 103,
    Mac10 = 104,
    Ump = 105,
    P90 = 106,
    Mp5 = 107,

    SawedOff = 201,
    Nova = 202,
    Mag7 = 203,
    Xm1014 = 204,
    M249 = 205,
    Negev = 206,

    Galil = 301,
    Famas = 302,
    Ak47 = 303,
    M4a4 = 304,
    M4a1 = 305,
    Scout = 306,
    Sg553 = 307,
    Aug = 308,
    Awp = 309,
    Scar20 = 310,
    G3sg1 = 311,

    Zeus = 401,
    Kevlar = 402,
    Helmet = 403,
    Bomb = 404,
    Knife = 405,
    DefuseKit = 406,
    World = 407,

    Decoy = 501,
    Molotov = 502,
    Incendiary = 503,
    Flash = 504,
    Smoke = 505,
    He = 506,
}

impl Equipment {
    pub fn name(self) -> &'static str {
        match self {
            Equipment::Unknown => "UNKNOWN",
            Equipment::P2000 => "P2000",
            Equipment::Glock => "Glock-18",
            Equipment::P250 => "P250",
            Equipment::Deagle => "Desert Eagle",
            Equipment::FiveSeven => "Five-SeveN",
            Equipment::DualBerettas => "Dual Berettas",
            Equipment::Tec9 => "Tec-9",
            Equipment::Cz => "CZ75 Auto",
            Equipment::Usp => "USP-S",
            Equipment::Revolver => "R8 Revolver",
            Equipment::Mp7 => "MP7",
            Equipment::Mp9 => "MP9",
            Equipment::Bizon => "PP-Bizon",
            Equipment::Mac10 => "MAC-10",
            Equipment::Ump => "UMP-45",
            Equipment::P90 => "P90",
            Equipment::Mp5 => "MP5-SD",
            Equipment::SawedOff => "Sawed-Off",
            Equipment::Nova => "Nova",
            Equipment::Mag7 => "MAG-7",
            Equipment::Xm1014 => "XM1014",
            Equipment::M249 => "M249",
            Equipment::Negev => "Negev",
            Equipment::Galil => "Galil AR",
            Equipment::Famas => "FAMAS",
            Equipment::Ak47 => "AK-47",
            Equipment::M4a4 => "M4A4",
            Equipment::M4a1 => "M4A1",
            Equipment::Scout => "SSG 08",
            Equipment::Sg553 => "SG 553",
            Equipment::Aug => "AUG",
            Equipment::Awp => "AWP",
            Equipment::Scar20 => "SCAR-20",
            Equipment::G3sg1 => "G3SG1",
            Equipment::Zeus => "Zeus x27",
            Equipment::Kevlar => "Kevlar Vest",
            Equipment::Helmet => "Kevlar + Helmet",
            Equipment::Bomb => "C4",
            Equipment::Knife => "Knife",
            Equipment::DefuseKit => "Defuse Kit",
            Equipment::World => "World",
            Equipment::Decoy => "Decoy Grenade",
            Equipment::Molotov => "Molotov",
            Equipment::Incendiary => "Incendiary Grenade",
            Equipment::Flash => "Flashbang",
            Equipment::Smoke => "Smoke Grenade",
            Equipment::He => "HE Grenade",
        }
    }
}

impl Default for Equipment {
    fn default() -> Self {
        Equipment::Unknown
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Equipment {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Renders an inventory as `[A, B]`, or `[]` when empty.
pub fn format_inventory(weapons: &[Equipment]) -> String {
    let names: Vec<&str> = weapons.iter().map(|w| w.name()).collect();
    format!("[{}]", names.join(", "))
}
