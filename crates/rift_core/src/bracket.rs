//! Elimination bracket and promotion series builders.
//!
//! Worlds runs a fixed eight-team bracket: two seeded regions feed four
//! quarterfinals, winners meet in the semifinals and the final. Slots whose
//! teams depend on an unfinished earlier round stay TBD; `advance` is the
//! explicit administrative step that fills them, never the scheduler.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::models::fixture::{Fixture, FixtureId, FixtureKind};
use crate::models::team::TeamId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "east")]
    East,
    #[serde(rename = "west")]
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Round {
    #[serde(rename = "QF")]
    Quarterfinal,
    #[serde(rename = "SF")]
    Semifinal,
    #[serde(rename = "F")]
    Final,
}

impl Round {
    pub fn label(&self) -> &'static str {
        match self {
            Round::Quarterfinal => "QF",
            Round::Semifinal => "SF",
            Round::Final => "F",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedEntry {
    pub team_id: TeamId,
    pub seed: u8,
    pub region: Region,
    pub eliminated: bool,
}

impl SeedEntry {
    pub fn new(team_id: TeamId, seed: u8, region: Region) -> Self {
        Self { team_id, seed, region, eliminated: false }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketSlot {
    pub round: Round,
    pub match_number: u8,
    /// TBD until the feeding round has been advanced.
    pub home: Option<TeamId>,
    pub away: Option<TeamId>,
    pub fixture_id: Option<FixtureId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bracket {
    pub participants: Vec<SeedEntry>,
    pub slots: Vec<BracketSlot>,
    pub champion: Option<TeamId>,
}

/// Build the eight-team worlds bracket from seeded regional participants.
///
/// Quarterfinals pair seed 1 vs 4 and 2 vs 3 within each region; east feeds
/// semifinal 5, west feeds semifinal 6.
pub fn build_worlds_bracket(participants: Vec<SeedEntry>) -> Result<Bracket> {
    if participants.len() != 8 {
        return Err(CoreError::Validation(format!(
            "worlds bracket needs 8 participants, got {}",
            participants.len()
        )));
    }

    let mut east: Vec<&SeedEntry> =
        participants.iter().filter(|p| p.region == Region::East).collect();
    let mut west: Vec<&SeedEntry> =
        participants.iter().filter(|p| p.region == Region::West).collect();
    if east.len() != 4 || west.len() != 4 {
        return Err(CoreError::Validation(format!(
            "worlds bracket needs 4 participants per region, got {} east / {} west",
            east.len(),
            west.len()
        )));
    }

    east.sort_by_key(|p| p.seed);
    west.sort_by_key(|p| p.seed);
    for region in [&east, &west] {
        let seeds: Vec<u8> = region.iter().map(|p| p.seed).collect();
        if seeds != vec![1, 2, 3, 4] {
            return Err(CoreError::Validation(format!("region seeds must be 1-4, got {:?}", seeds)));
        }
    }

    let qf = |number: u8, high: &SeedEntry, low: &SeedEntry| BracketSlot {
        round: Round::Quarterfinal,
        match_number: number,
        home: Some(high.team_id),
        away: Some(low.team_id),
        fixture_id: None,
    };
    let tbd = |round: Round, number: u8| BracketSlot {
        round,
        match_number: number,
        home: None,
        away: None,
        fixture_id: None,
    };

    let slots = vec![
        qf(1, east[0], east[3]),
        qf(2, east[1], east[2]),
        qf(3, west[0], west[3]),
        qf(4, west[1], west[2]),
        tbd(Round::Semifinal, 5),
        tbd(Round::Semifinal, 6),
        tbd(Round::Final, 7),
    ];

    Ok(Bracket { participants, slots, champion: None })
}

impl Bracket {
    pub fn slot(&self, match_number: u8) -> Option<&BracketSlot> {
        self.slots.iter().find(|s| s.match_number == match_number)
    }

    fn slot_mut(&mut self, match_number: u8) -> Result<&mut BracketSlot> {
        self.slots
            .iter_mut()
            .find(|s| s.match_number == match_number)
            .ok_or_else(|| CoreError::NotFound(format!("bracket match {}", match_number)))
    }

    /// Emit fixtures for every fully-determined, not-yet-scheduled slot of a
    /// round. Undetermined slots are left alone.
    pub fn schedule_round(
        &mut self,
        round: Round,
        start: DateTime<Utc>,
        spacing: Duration,
        next_id: &mut FixtureId,
    ) -> Vec<Fixture> {
        let mut fixtures = Vec::new();
        let mut slot_index = 0i32;
        for slot in self.slots.iter_mut().filter(|s| s.round == round) {
            let (Some(home), Some(away)) = (slot.home, slot.away) else { continue };
            if slot.fixture_id.is_some() {
                continue;
            }
            let fixture = Fixture::scheduled(
                *next_id,
                FixtureKind::Worlds,
                home,
                away,
                start + spacing * slot_index,
            );
            slot.fixture_id = Some(fixture.id);
            fixtures.push(fixture);
            *next_id += 1;
            slot_index += 1;
        }
        fixtures
    }

    /// Fill the next round from a decided match and mark the loser
    /// eliminated. Match 7 crowns the champion instead of feeding a slot.
    pub fn advance(&mut self, match_number: u8, winner: TeamId) -> Result<()> {
        let (home, away) = {
            let slot = self.slot_mut(match_number)?;
            match (slot.home, slot.away) {
                (Some(h), Some(a)) => (h, a),
                _ => {
                    return Err(CoreError::InvalidState(format!(
                        "bracket match {} is not determined yet",
                        match_number
                    )))
                }
            }
        };
        if winner != home && winner != away {
            return Err(CoreError::InvalidState(format!(
                "team {} did not play bracket match {}",
                winner, match_number
            )));
        }

        let loser = if winner == home { away } else { home };
        if let Some(entry) = self.participants.iter_mut().find(|p| p.team_id == loser) {
            entry.eliminated = true;
        }

        match match_number {
            1 => self.slot_mut(5)?.home = Some(winner),
            2 => self.slot_mut(5)?.away = Some(winner),
            3 => self.slot_mut(6)?.home = Some(winner),
            4 => self.slot_mut(6)?.away = Some(winner),
            5 => self.slot_mut(7)?.home = Some(winner),
            6 => self.slot_mut(7)?.away = Some(winner),
            7 => self.champion = Some(winner),
            n => return Err(CoreError::NotFound(format!("bracket match {}", n))),
        }
        Ok(())
    }
}

/// Pair bottom-of-table league teams against challenger seeds, one best-of-3
/// each, league side hosting. Standings are not touched by these fixtures.
pub fn build_promotion_series(
    league_bottom: &[TeamId],
    challengers: &[TeamId],
    start: DateTime<Utc>,
    spacing: Duration,
    next_id: &mut FixtureId,
) -> Result<Vec<Fixture>> {
    if league_bottom.len() != challengers.len() {
        return Err(CoreError::Validation(format!(
            "promotion series needs matching sides, got {} vs {}",
            league_bottom.len(),
            challengers.len()
        )));
    }

    let mut fixtures = Vec::with_capacity(league_bottom.len());
    for (i, (&home, &away)) in league_bottom.iter().zip(challengers).enumerate() {
        fixtures.push(Fixture::scheduled(
            *next_id,
            FixtureKind::Promotion,
            home,
            away,
            start + spacing * i as i32,
        ));
        *next_id += 1;
    }
    Ok(fixtures)
}
