use crate::{
    parser::weapon::format_inventory,
    source::{Player, Vector},
};

/// Substitute for the side and name of a player the service could not resolve.
pub const UNKNOWN: &str = "?";

/// The player whose shots, damage and movement are kept.
///
/// Matching is a case-insensitive substring test against the player name.
#[derive(Debug, Clone)]
pub struct TargetPlayer {
    needle: String,
}

impl TargetPlayer {
    pub fn new(name: &str) -> Self {
        TargetPlayer {
            needle: name.to_lowercase(),
        }
    }

    pub fn matches(&self, player: Option<&Player>) -> bool {
        player.is_some_and(|p| p.name.to_lowercase().contains(&self.needle))
    }
}

pub fn side_name(player: Option<&Player>) -> (&str, &str) {
    match player {
        Some(p) => (p.team.side(), p.name.as_str()),
        None => (UNKNOWN, UNKNOWN),
    }
}

pub fn position(player: Option<&Player>) -> Vector {
    player.map(|p| p.position).unwrap_or_default()
}

pub fn location(player: Option<&Player>) -> String {
    player.map(|p| p.last_place_name.clone()).unwrap_or_default()
}

pub fn inventory(player: Option<&Player>) -> String {
    match player {
        Some(p) => format_inventory(&p.weapons),
        None => format_inventory(&[]),
    }
}

/// Key used to track a player's position between frames.
pub fn player_key(player: &Player) -> String {
    format!("{}_{}", player.team.side(), player.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{game::Team, weapon::Equipment};

    fn player(name: &str, team: Team) -> Player {
        Player {
            name: name.into(),
            team,
            ..Default::default()
        }
    }

    #[test]
    fn target_matching_is_case_insensitive_substring() {
        let target = TargetPlayer::new("VadimkaYbivaet");
        assert!(target.matches(Some(&player("vadimkaybivaet", Team::Terrorists))));
        assert!(target.matches(Some(&player("[clan] VADIMKAYBIVAET!", Team::Spectators))));
        assert!(!target.matches(Some(&player("Vadimka", Team::Terrorists))));
        assert!(!target.matches(None));
    }

    #[test]
    fn absent_player_uses_sentinels() {
        assert_eq!(side_name(None), ("?", "?"));
        assert_eq!(position(None), Vector::default());
        assert_eq!(location(None), "");
        assert_eq!(inventory(None), "[]");
    }

    #[test]
    fn present_player_fields() {
        let mut p = player("s1mple", Team::CounterTerrorists);
        p.weapons = vec![Equipment::Awp, Equipment::Knife];
        assert_eq!(side_name(Some(&p)), ("CT", "s1mple"));
        assert_eq!(inventory(Some(&p)), "[AWP, Knife]");
        assert_eq!(player_key(&p), "CT_s1mple");
        assert_eq!(player_key(&player("x", Team::Unassigned)), "?_x");
    }
}
