use super::{
    DemoHeader, DemoSource, GameState, Kill, Occurrence, OccurrenceHandler, ParseError,
    ParseResult, PlayerHurt, RoundEnd, RoundStart, WarmupChanged, WeaponFire,
};
use serde::Deserialize;
use std::io::BufRead;
use tracing::{debug, trace};

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record {
    Header(DemoHeader),
    State(GameState),
    Kill(Kill),
    RoundStart(RoundStart),
    WarmupChanged(WarmupChanged),
    RoundEnd(RoundEnd),
    WeaponFire(WeaponFire),
    PlayerHurt(PlayerHurt),
    FrameDone,
}

/// Line-delimited JSON export of a decoded capture.
///
/// Each non-blank line holds one record tagged by `kind`. A `header` record
/// carries capture metadata, a `state` record replaces the current game state
/// (including the tick), and every other record is an occurrence observed at
/// the current state.
pub struct OccurrenceStream<R> {
    reader: R,
}

impl<R: BufRead> OccurrenceStream<R> {
    pub fn new(reader: R) -> Self {
        OccurrenceStream { reader }
    }
}

impl<R: BufRead> DemoSource for OccurrenceStream<R> {
    fn parse<H: OccurrenceHandler>(self, mut handler: H) -> ParseResult<(DemoHeader, H::Output)> {
        let mut header = DemoHeader::default();
        let mut state = GameState::default();

        for (index, line) in self.reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let record: Record = serde_json::from_str(&line)
                .map_err(|source| ParseError::Malformed { line: number, source })?;

            let occurrence = match record {
                Record::Header(new_header) => {
                    debug!("header: map {}", new_header.map_name);
                    handler.handle_header(&new_header);
                    header = new_header;
                    continue;
                }
                Record::State(new_state) => {
                    if new_state.ingame_tick < state.ingame_tick {
                        return Err(ParseError::TickRegression {
                            line: number,
                            previous: state.ingame_tick,
                            tick: new_state.ingame_tick,
                        });
                    }
                    trace!("state at tick {}", new_state.ingame_tick);
                    state = new_state;
                    continue;
                }
                Record::Kill(e) => Occurrence::Kill(e),
                Record::RoundStart(e) => Occurrence::RoundStart(e),
                Record::WarmupChanged(e) => Occurrence::WarmupChanged(e),
                Record::RoundEnd(e) => Occurrence::RoundEnd(e),
                Record::WeaponFire(e) => Occurrence::WeaponFire(e),
                Record::PlayerHurt(e) => Occurrence::PlayerHurt(e),
                Record::FrameDone => Occurrence::FrameDone,
            };

            if H::does_handle(occurrence.kind()) {
                handler.handle_occurrence(&occurrence, &state);
            }
        }

        let output = handler.into_output(&state);
        Ok((header, output))
    }
}
