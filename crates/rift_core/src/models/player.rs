use serde::{Deserialize, Serialize};

use super::team::TeamId;

pub type PlayerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "TOP")]
    Top,
    #[serde(rename = "JGL")]
    Jungle,
    #[serde(rename = "MID")]
    Mid,
    #[serde(rename = "BOT")]
    Bot,
    #[serde(rename = "SUP")]
    Support,
}

impl Role {
    /// Canonical role code string (e.g., "JGL").
    pub fn code(&self) -> &'static str {
        match self {
            Role::Top => "TOP",
            Role::Jungle => "JGL",
            Role::Mid => "MID",
            Role::Bot => "BOT",
            Role::Support => "SUP",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team_id: TeamId,
    pub name: String,
    pub role: Role,
    pub mental: u8,
    pub teamfight: u8,
    pub focus: u8,
    pub laning: u8,
    /// Part of the active five-player lineup.
    pub starter: bool,
}

impl Player {
    pub fn new(id: PlayerId, team_id: TeamId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            team_id,
            name: name.into(),
            role,
            mental: 50,
            teamfight: 50,
            focus: 50,
            laning: 50,
            starter: false,
        }
    }

    pub fn with_stats(mut self, mental: u8, teamfight: u8, focus: u8, laning: u8) -> Self {
        self.mental = mental;
        self.teamfight = teamfight;
        self.focus = focus;
        self.laning = laning;
        self
    }

    pub fn as_starter(mut self) -> Self {
        self.starter = true;
        self
    }

    pub fn stat_sum(&self) -> u32 {
        self.mental as u32 + self.teamfight as u32 + self.focus as u32 + self.laning as u32
    }

    /// Overall rating: mean of the four core stats.
    pub fn overall(&self) -> u8 {
        (self.stat_sum() / 4) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_is_mean_of_core_stats() {
        let player = Player::new(1, 1, "Faker", Role::Mid).with_stats(90, 80, 70, 60);
        assert_eq!(player.stat_sum(), 300);
        assert_eq!(player.overall(), 75);
    }

    #[test]
    fn test_role_codes() {
        assert_eq!(Role::Jungle.code(), "JGL");
        assert_eq!(Role::Support.code(), "SUP");
    }
}
