//! Boundary to the demo parsing service.
//!
//! Decoding the binary capture is done elsewhere; a [`DemoSource`] hands the
//! decoded occurrences to an [`OccurrenceHandler`] one at a time, in capture
//! order, together with the game state at that point.

mod stream;

pub use stream::OccurrenceStream;

use crate::parser::{game::HitGroup, game::Team, weapon::Equipment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector { x, y, z }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Player {
    pub name: String,
    pub team: Team,
    pub position: Vector,
    pub last_place_name: String,
    pub weapons: Vec<Equipment>,
    pub health: i32,
    pub armor: i32,
    pub has_helmet: bool,
    pub money: i32,
}

impl Player {
    pub fn is_playing(&self) -> bool {
        matches!(self.team, Team::Terrorists | Team::CounterTerrorists)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoHeader {
    pub map_name: String,
    pub tick_rate: Option<u32>,
    pub playback_ticks: Option<u32>,
}

/// Game state as seen by the parsing service at the current occurrence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub ingame_tick: u32,
    pub total_rounds_played: u32,
    pub score_t: i32,
    pub score_ct: i32,
    pub participants: Vec<Player>,
}

impl GameState {
    /// Participants currently on a playing team.
    pub fn playing(&self) -> impl Iterator<Item = &Player> {
        self.participants.iter().filter(|p| p.is_playing())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Kill {
    pub killer: Option<Player>,
    pub victim: Option<Player>,
    pub weapon: Equipment,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoundStart {
    pub time_limit: i32,
    pub objective: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WarmupChanged {
    pub is_warmup: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoundEnd {
    pub winner: Team,
    pub reason: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeaponFire {
    pub shooter: Option<Player>,
    pub weapon: Equipment,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerHurt {
    pub attacker: Option<Player>,
    pub player: Option<Player>,
    pub weapon: Equipment,
    pub health: i32,
    pub armor: i32,
    pub health_damage: i32,
    pub armor_damage: i32,
    pub hit_group: HitGroup,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Occurrence {
    Kill(Kill),
    RoundStart(RoundStart),
    WarmupChanged(WarmupChanged),
    RoundEnd(RoundEnd),
    WeaponFire(WeaponFire),
    PlayerHurt(PlayerHurt),
    FrameDone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OccurrenceKind {
    Kill,
    RoundStart,
    WarmupChanged,
    RoundEnd,
    WeaponFire,
    PlayerHurt,
    FrameDone,
}

impl Occurrence {
    pub fn kind(&self) -> OccurrenceKind {
        match self {
            Occurrence::Kill(_) => OccurrenceKind::Kill,
            Occurrence::RoundStart(_) => OccurrenceKind::RoundStart,
            Occurrence::WarmupChanged(_) => OccurrenceKind::WarmupChanged,
            Occurrence::RoundEnd(_) => OccurrenceKind::RoundEnd,
            Occurrence::WeaponFire(_) => OccurrenceKind::WeaponFire,
            Occurrence::PlayerHurt(_) => OccurrenceKind::PlayerHurt,
            Occurrence::FrameDone => OccurrenceKind::FrameDone,
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read capture: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed record on line {line}: {source}")]
    Malformed {
        line: usize,
        source: serde_json::Error,
    },
    #[error("tick went backwards on line {line}: {previous} -> {tick}")]
    TickRegression { line: usize, previous: u32, tick: u32 },
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Receives the occurrences of one capture.
pub trait OccurrenceHandler {
    type Output;

    fn does_handle(kind: OccurrenceKind) -> bool;

    fn handle_header(&mut self, _header: &DemoHeader) {}

    fn handle_occurrence(&mut self, occurrence: &Occurrence, state: &GameState);

    fn into_output(self, state: &GameState) -> Self::Output;
}

/// A parsing service that drives a handler to the end of a capture.
pub trait DemoSource {
    fn parse<H: OccurrenceHandler>(self, handler: H) -> ParseResult<(DemoHeader, H::Output)>;
}
