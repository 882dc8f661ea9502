use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::team::TeamId;

pub type FixtureId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixtureKind {
    #[serde(rename = "league")]
    League,
    #[serde(rename = "friendly")]
    Friendly,
    #[serde(rename = "cup")]
    Cup,
    #[serde(rename = "worlds")]
    Worlds,
    #[serde(rename = "promotion")]
    Promotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixtureStatus {
    #[serde(rename = "SCHEDULED")]
    Scheduled,
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "FINISHED")]
    Finished,
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

/// A single best-of-3 match between two teams.
///
/// Created by the season/bracket builders, mutated only by the scheduler,
/// immutable once `Finished`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub kind: FixtureKind,
    pub home: TeamId,
    pub away: TeamId,
    pub status: FixtureStatus,
    pub scheduled_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub home_score: u8,
    pub away_score: u8,
}

impl Fixture {
    pub fn scheduled(
        id: FixtureId,
        kind: FixtureKind,
        home: TeamId,
        away: TeamId,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            home,
            away,
            status: FixtureStatus::Scheduled,
            scheduled_at,
            started_at: None,
            finished_at: None,
            home_score: 0,
            away_score: 0,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == FixtureStatus::Scheduled && self.scheduled_at <= now
    }

    /// Winner of a finished fixture. `None` while unresolved, and `None` for
    /// a level score — a best-of-3 cannot tie, so a tied record stays
    /// unresolved rather than crediting either side.
    pub fn winner(&self) -> Option<TeamId> {
        if self.status != FixtureStatus::Finished {
            return None;
        }
        if self.home_score > self.away_score {
            Some(self.home)
        } else if self.away_score > self.home_score {
            Some(self.away)
        } else {
            None
        }
    }

    pub fn loser(&self) -> Option<TeamId> {
        self.winner().map(|w| if w == self.home { self.away } else { self.home })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_only_when_scheduled_and_past() {
        let now = Utc::now();
        let mut fx = Fixture::scheduled(1, FixtureKind::League, 1, 2, now - chrono::Duration::minutes(1));
        assert!(fx.is_due(now));

        fx.status = FixtureStatus::Finished;
        assert!(!fx.is_due(now));

        let future = Fixture::scheduled(2, FixtureKind::League, 1, 2, now + chrono::Duration::minutes(1));
        assert!(!future.is_due(now));
    }

    #[test]
    fn test_winner_requires_finished() {
        let now = Utc::now();
        let mut fx = Fixture::scheduled(1, FixtureKind::Cup, 7, 9, now);
        assert_eq!(fx.winner(), None);

        fx.status = FixtureStatus::Finished;
        fx.home_score = 1;
        fx.away_score = 2;
        assert_eq!(fx.winner(), Some(9));
        assert_eq!(fx.loser(), Some(7));
    }

    #[test]
    fn test_level_score_has_no_winner() {
        let mut fx = Fixture::scheduled(1, FixtureKind::League, 7, 9, Utc::now());
        fx.status = FixtureStatus::Finished;
        assert_eq!(fx.winner(), None);
        assert_eq!(fx.loser(), None);
    }
}
