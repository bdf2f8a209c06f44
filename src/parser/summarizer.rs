use crate::{
    config::{Config, ConfigError},
    parser::{
        event::Event, formatter::EventFormatter, player::TargetPlayer, position::PositionTracker,
    },
    source::{DemoHeader, GameState, Occurrence, OccurrenceHandler, OccurrenceKind},
};
use fnv::FnvHashMap;
use serde::Serialize;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickData {
    pub tick: u32,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureSummary {
    pub map_name: String,
    pub tick_rate: u32,
    pub duration: f64,
    pub total_ticks: u32,
    pub ticks: Vec<TickData>,
}

impl CaptureSummary {
    pub fn event_count(&self) -> usize {
        self.ticks.iter().map(|t| t.events.len()).sum()
    }
}

/// Events grouped by the tick they happened on, in arrival order.
#[derive(Debug, Default)]
pub struct TickEvents {
    ticks: FnvHashMap<u32, Vec<Event>>,
    events: usize,
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tick: u32, event: Event) {
        trace!("tick {tick}: {}", event.kind());
        self.ticks.entry(tick).or_default().push(event);
        self.events += 1;
    }

    /// Number of distinct ticks holding at least one event.
    pub fn tick_count(&self) -> usize {
        self.ticks.len()
    }

    pub fn event_count(&self) -> usize {
        self.events
    }

    pub fn into_sorted(self) -> Vec<TickData> {
        let mut ticks: Vec<TickData> = self
            .ticks
            .into_iter()
            .map(|(tick, events)| TickData { tick, events })
            .collect();
        ticks.sort_unstable_by_key(|t| t.tick);
        ticks
    }
}

pub fn finalize(
    map_name: String,
    tick_rate: u32,
    total_ticks: u32,
    events: TickEvents,
) -> Result<CaptureSummary, ConfigError> {
    if tick_rate == 0 {
        return Err(ConfigError::ZeroTickRate);
    }

    Ok(CaptureSummary {
        map_name,
        tick_rate,
        duration: f64::from(total_ticks) / f64::from(tick_rate),
        total_ticks,
        ticks: events.into_sorted(),
    })
}

/// Collects the target player's view of a capture into tick buckets.
#[derive(Debug)]
pub struct MatchAnalyzer {
    formatter: EventFormatter,
    positions: PositionTracker,
    events: TickEvents,
    header: DemoHeader,
    default_tick_rate: u32,
    last_tick: u32,
}

impl MatchAnalyzer {
    pub fn new(config: &Config) -> Self {
        MatchAnalyzer {
            formatter: EventFormatter::new(TargetPlayer::new(&config.target_player)),
            positions: PositionTracker::new(),
            events: TickEvents::new(),
            header: DemoHeader::default(),
            default_tick_rate: config.default_tick_rate,
            last_tick: 0,
        }
    }

    fn tick_rate(&self) -> u32 {
        match self.header.tick_rate {
            Some(rate) if rate > 0 => rate,
            Some(_) => {
                warn!(
                    "Capture reports a zero tick rate, using {}",
                    self.default_tick_rate
                );
                self.default_tick_rate
            }
            None => {
                debug!(
                    "Capture has no tick rate, using {}",
                    self.default_tick_rate
                );
                self.default_tick_rate
            }
        }
    }
}

impl OccurrenceHandler for MatchAnalyzer {
    type Output = Result<CaptureSummary, ConfigError>;

    fn does_handle(_kind: OccurrenceKind) -> bool {
        true
    }

    fn handle_header(&mut self, header: &DemoHeader) {
        debug!(
            "Map: {}, tick rate: {:?}, playback ticks: {:?}",
            header.map_name, header.tick_rate, header.playback_ticks
        );
        self.header = header.clone();
    }

    fn handle_occurrence(&mut self, occurrence: &Occurrence, state: &GameState) {
        let tick = state.ingame_tick;
        self.last_tick = self.last_tick.max(tick);

        match occurrence {
            Occurrence::Kill(kill) => {
                self.events.add(tick, self.formatter.kill(tick, kill));
            }
            Occurrence::RoundStart(start) => {
                self.events
                    .add(tick, self.formatter.round_start(tick, state, start));
            }
            Occurrence::WarmupChanged(change) => {
                self.events
                    .add(tick, self.formatter.warmup_changed(tick, change));
            }
            Occurrence::RoundEnd(end) => {
                self.events
                    .add(tick, self.formatter.round_end(tick, state, end));
            }
            Occurrence::WeaponFire(fire) => {
                if let Some(event) = self.formatter.weapon_fire(tick, fire) {
                    self.events.add(tick, event);
                }
            }
            Occurrence::PlayerHurt(hurt) => {
                if let Some(event) = self.formatter.player_hurt(tick, hurt) {
                    self.events.add(tick, event);
                }
            }
            Occurrence::FrameDone => {
                for event in self.formatter.frame_done(tick, state, &mut self.positions) {
                    self.events.add(tick, event);
                }
            }
        }
    }

    fn into_output(self, state: &GameState) -> Self::Output {
        let tick_rate = self.tick_rate();
        let total_ticks = self
            .header
            .playback_ticks
            .unwrap_or_else(|| self.last_tick.max(state.ingame_tick));

        debug!(
            "Finalizing {} events over {} ticks",
            self.events.event_count(),
            self.events.tick_count()
        );
        finalize(self.header.map_name, tick_rate, total_ticks, self.events)
    }
}
