use crate::{
    parser::{
        event::{
            DamageData, Event, EventData, KillData, PlayerFrameData, RoundEndData, RoundResult,
            RoundStartData, ShotData, WarmupData,
        },
        game::Team,
        player::{inventory, location, player_key, position, side_name, TargetPlayer},
        position::{Movement, PositionTracker},
    },
    source::{
        GameState, Kill, Player, PlayerHurt, RoundEnd, RoundStart, WarmupChanged, WeaponFire,
    },
};

/// Builds events from occurrences, keeping only the target player's
/// perspective-specific ones.
#[derive(Debug, Clone)]
pub struct EventFormatter {
    target: TargetPlayer,
}

impl EventFormatter {
    pub fn new(target: TargetPlayer) -> Self {
        EventFormatter { target }
    }

    pub fn kill(&self, tick: u32, kill: &Kill) -> Event {
        let (killer_side, killer_name) = side_name(kill.killer.as_ref());
        let (victim_side, victim_name) = side_name(kill.victim.as_ref());
        Event::new(
            tick,
            EventData::Kill(KillData {
                killer_side: killer_side.into(),
                killer_name: killer_name.into(),
                victim_side: victim_side.into(),
                victim_name: victim_name.into(),
                weapon: kill.weapon,
                killer_pos: position(kill.killer.as_ref()),
                victim_pos: position(kill.victim.as_ref()),
            }),
        )
    }

    pub fn round_start(&self, tick: u32, state: &GameState, start: &RoundStart) -> Event {
        Event::new(
            tick,
            EventData::RoundStart(RoundStartData {
                round: state.total_rounds_played.saturating_add(1),
                time_limit: start.time_limit,
                objective: start.objective.clone(),
            }),
        )
    }

    pub fn warmup_changed(&self, tick: u32, change: &WarmupChanged) -> Event {
        let data = WarmupData {
            is_warmup: change.is_warmup,
        };
        if change.is_warmup {
            Event::new(tick, EventData::WarmupStart(data))
        } else {
            Event::new(tick, EventData::WarmupEnd(data))
        }
    }

    pub fn round_end(&self, tick: u32, state: &GameState, end: &RoundEnd) -> Event {
        let winner = match end.winner {
            Team::Terrorists => "T",
            Team::CounterTerrorists => "CT",
            _ => "none",
        };

        // Only the first playing participant matching the target counts.
        let target = state.playing().find(|p| self.target.matches(Some(*p)));
        let (target_team, result) = match target {
            Some(p) if p.team == end.winner => (p.team.side(), RoundResult::Won),
            Some(p) => (p.team.side(), RoundResult::Lost),
            None => ("", RoundResult::Lost),
        };

        Event::new(
            tick,
            EventData::RoundEnd(RoundEndData {
                round: state.total_rounds_played,
                winner: winner.into(),
                reason: end.reason.to_string(),
                target_team: target_team.into(),
                result,
                score_t: state.score_t,
                score_ct: state.score_ct,
            }),
        )
    }

    /// `None` unless the target player fired.
    pub fn weapon_fire(&self, tick: u32, fire: &WeaponFire) -> Option<Event> {
        let shooter = fire.shooter.as_ref();
        if !self.target.matches(shooter) {
            return None;
        }

        let (side, name) = side_name(shooter);
        Some(Event::new(
            tick,
            EventData::Shot(ShotData {
                side: side.into(),
                name: name.into(),
                weapon: fire.weapon,
                position: position(shooter),
                location: location(shooter),
                inventory: inventory(shooter),
            }),
        ))
    }

    /// `None` unless the target player dealt or took the damage.
    pub fn player_hurt(&self, tick: u32, hurt: &PlayerHurt) -> Option<Event> {
        let attacker = hurt.attacker.as_ref();
        let victim = hurt.player.as_ref();
        if !self.target.matches(attacker) && !self.target.matches(victim) {
            return None;
        }

        let (attacker_side, attacker_name) = side_name(attacker);
        let (victim_side, victim_name) = side_name(victim);
        Some(Event::new(
            tick,
            EventData::Damage(DamageData {
                attacker_side: attacker_side.into(),
                attacker_name: attacker_name.into(),
                victim_side: victim_side.into(),
                victim_name: victim_name.into(),
                weapon: hurt.weapon,
                attacker_pos: position(attacker),
                victim_pos: position(victim),
                location: location(victim),
                health: hurt.health,
                armor: hurt.armor,
                hp_damage: hurt.health_damage,
                armor_damage: hurt.armor_damage,
                hit_group: hurt.hit_group,
            }),
        ))
    }

    /// One `move`/`stand` event per playing participant matching the target.
    pub fn frame_done(
        &self,
        tick: u32,
        state: &GameState,
        positions: &mut PositionTracker,
    ) -> Vec<Event> {
        state
            .playing()
            .filter(|p| self.target.matches(Some(*p)))
            .map(|p| self.player_frame(tick, p, positions))
            .collect()
    }

    fn player_frame(&self, tick: u32, player: &Player, positions: &mut PositionTracker) -> Event {
        let data = PlayerFrameData {
            side: player.team.side().into(),
            name: player.name.clone(),
            position: player.position,
            location: player.last_place_name.clone(),
            inventory: inventory(Some(player)),
            health: player.health,
            armor: player.armor,
            helmet: player.has_helmet.into(),
            money: player.money,
        };

        match positions.observe(&player_key(player), player.position) {
            Movement::Moved => Event::new(tick, EventData::Move(data)),
            Movement::Stood => Event::new(tick, EventData::Stand(data)),
        }
    }
}
