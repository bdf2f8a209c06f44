use crate::{
    parser::{game::HitGroup, weapon::Equipment},
    source::Vector,
};
use serde::Serialize;
use std::fmt;

/// One formatted occurrence: a typed payload and its fixed-format text line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    #[serde(flatten)]
    pub data: EventData,
    pub raw_line: String,
}

impl Event {
    pub fn new(tick: u32, data: EventData) -> Self {
        let raw_line = data.raw_line(tick);
        Event { data, raw_line }
    }

    pub fn kind(&self) -> &'static str {
        self.data.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EventData {
    Kill(KillData),
    RoundStart(RoundStartData),
    WarmupStart(WarmupData),
    WarmupEnd(WarmupData),
    RoundEnd(RoundEndData),
    Shot(ShotData),
    Damage(DamageData),
    Move(PlayerFrameData),
    Stand(PlayerFrameData),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KillData {
    pub killer_side: String,
    pub killer_name: String,
    pub victim_side: String,
    pub victim_name: String,
    pub weapon: Equipment,
    pub killer_pos: Vector,
    pub victim_pos: Vector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundStartData {
    pub round: u32,
    pub time_limit: i32,
    pub objective: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarmupData {
    pub is_warmup: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundResult {
    Won,
    Lost,
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundResult::Won => f.write_str("won"),
            RoundResult::Lost => f.write_str("lost"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundEndData {
    pub round: u32,
    /// `T`, `CT` or `none`.
    pub winner: String,
    pub reason: String,
    /// Side of the target player, empty when they are not playing.
    pub target_team: String,
    pub result: RoundResult,
    pub score_t: i32,
    pub score_ct: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotData {
    pub side: String,
    pub name: String,
    pub weapon: Equipment,
    pub position: Vector,
    pub location: String,
    pub inventory: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageData {
    pub attacker_side: String,
    pub attacker_name: String,
    pub victim_side: String,
    pub victim_name: String,
    pub weapon: Equipment,
    pub attacker_pos: Vector,
    pub victim_pos: Vector,
    pub location: String,
    pub health: i32,
    pub armor: i32,
    pub hp_damage: i32,
    pub armor_damage: i32,
    pub hit_group: HitGroup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerFrameData {
    pub side: String,
    pub name: String,
    pub position: Vector,
    pub location: String,
    pub inventory: String,
    pub health: i32,
    pub armor: i32,
    pub helmet: u8,
    pub money: i32,
}

fn pos(v: &Vector) -> String {
    format!("({:.1},{:.1},{:.1})", v.x, v.y, v.z)
}

impl EventData {
    pub fn kind(&self) -> &'static str {
        match self {
            EventData::Kill(_) => "kill",
            EventData::RoundStart(_) => "round_start",
            EventData::WarmupStart(_) => "warmup_start",
            EventData::WarmupEnd(_) => "warmup_end",
            EventData::RoundEnd(_) => "round_end",
            EventData::Shot(_) => "shot",
            EventData::Damage(_) => "damage",
            EventData::Move(_) => "move",
            EventData::Stand(_) => "stand",
        }
    }

    pub fn raw_line(&self, tick: u32) -> String {
        match self {
            EventData::Kill(k) => format!(
                "<kill><tick>{tick}</tick><killer><side>{}</side><name>{}</name><weapon>{}</weapon><pos>{}</pos></killer><victim><side>{}</side><name>{}</name><pos>{}</pos></victim></kill>",
                k.killer_side,
                k.killer_name,
                k.weapon,
                pos(&k.killer_pos),
                k.victim_side,
                k.victim_name,
                pos(&k.victim_pos),
            ),
            EventData::RoundStart(r) => format!(
                "<round_start><tick>{tick}</tick><round>{}</round><timeLimit>{}</timeLimit><objective>{}</objective></round_start>",
                r.round, r.time_limit, r.objective,
            ),
            EventData::WarmupStart(_) | EventData::WarmupEnd(_) => {
                let kind = self.kind();
                format!("<{kind}><tick>{tick}</tick></{kind}>")
            }
            EventData::RoundEnd(r) => format!(
                "<round_end><tick>{tick}</tick><round>{}</round><winner>{}</winner><reason>{}</reason><targetTeam>{}</targetTeam><result>{}</result><scoreT>{}</scoreT><scoreCT>{}</scoreCT></round_end>",
                r.round, r.winner, r.reason, r.target_team, r.result, r.score_t, r.score_ct,
            ),
            EventData::Shot(s) => format!(
                "<shot><tick>{tick}</tick><side>{}</side><name>{}</name><weapon>{}</weapon><pos>{}</pos><location>{}</location><inv>{}</inv></shot>",
                s.side,
                s.name,
                s.weapon,
                pos(&s.position),
                s.location,
                s.inventory,
            ),
            EventData::Damage(d) => format!(
                "<damage><tick>{tick}</tick><attacker><side>{}</side><name>{}</name><weapon>{}</weapon><pos>{}</pos></attacker><victim><side>{}</side><name>{}</name><pos>{}</pos><location>{}</location><hp>{}</hp><armor>{}</armor><hpDamage>{}</hpDamage><armorDamage>{}</armorDamage><hitgroup>{}</hitgroup></victim></damage>",
                d.attacker_side,
                d.attacker_name,
                d.weapon,
                pos(&d.attacker_pos),
                d.victim_side,
                d.victim_name,
                pos(&d.victim_pos),
                d.location,
                d.health,
                d.armor,
                d.hp_damage,
                d.armor_damage,
                d.hit_group,
            ),
            EventData::Move(p) | EventData::Stand(p) => {
                let kind = self.kind();
                format!(
                    "<{kind}><tick>{tick}</tick><player><side>{}</side><name>{}</name><pos>{}</pos><location>{}</location><inv>{}</inv><health>{}</health><armor>{}</armor><helmet>{}</helmet><money>{}</money></player></{kind}>",
                    p.side,
                    p.name,
                    pos(&p.position),
                    p.location,
                    p.inventory,
                    p.health,
                    p.armor,
                    p.helmet,
                    p.money,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_type_data_raw_line() {
        let event = Event::new(
            50,
            EventData::RoundStart(RoundStartData {
                round: 1,
                time_limit: 115,
                objective: "BOMB TARGET".into(),
            }),
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "round_start",
                "data": {"round": 1, "time_limit": 115, "objective": "BOMB TARGET"},
                "raw_line": "<round_start><tick>50</tick><round>1</round><timeLimit>115</timeLimit><objective>BOMB TARGET</objective></round_start>"
            })
        );
    }

    #[test]
    fn kill_line_rounds_positions() {
        let event = Event::new(
            100,
            EventData::Kill(KillData {
                killer_side: "T".into(),
                killer_name: "a".into(),
                victim_side: "CT".into(),
                victim_name: "b".into(),
                weapon: Equipment::Ak47,
                killer_pos: Vector::new(1.04, -2.26, 3.0),
                victim_pos: Vector::new(10.0, 20.96, -0.5),
            }),
        );
        assert_eq!(event.kind(), "kill");
        assert_eq!(
            event.raw_line,
            "<kill><tick>100</tick><killer><side>T</side><name>a</name><weapon>AK-47</weapon><pos>(1.0,-2.3,3.0)</pos></killer><victim><side>CT</side><name>b</name><pos>(10.0,21.0,-0.5)</pos></victim></kill>"
        );

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["data"]["weapon"], "AK-47");
        assert_eq!(value["data"]["killer_pos"], json!({"x": 1.04, "y": -2.26, "z": 3.0}));
    }

    #[test]
    fn warmup_line_uses_kind_tag() {
        let start = Event::new(7, EventData::WarmupStart(WarmupData { is_warmup: true }));
        assert_eq!(start.raw_line, "<warmup_start><tick>7</tick></warmup_start>");
        let end = Event::new(9, EventData::WarmupEnd(WarmupData { is_warmup: false }));
        assert_eq!(end.raw_line, "<warmup_end><tick>9</tick></warmup_end>");
        assert_eq!(
            serde_json::to_value(&end).unwrap()["data"],
            json!({"is_warmup": false})
        );
    }
}
