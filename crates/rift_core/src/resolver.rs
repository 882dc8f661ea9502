//! Best-of-3 outcome resolution.
//!
//! Each set draws `U(0, power)` independently for both sides, with the home
//! side drawing against its power plus a fixed advantage; the larger draw
//! takes the set and the first side to two set wins takes the match. The
//! random source is injected so outcomes are reproducible under a seeded RNG.

use rand::Rng;
use serde::Serialize;

/// Flat bonus added to the home side's power before each draw.
pub const HOME_ADVANTAGE: u32 = 5;

/// Set wins required to take a best-of-3.
pub const SETS_TO_WIN: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetScore {
    pub home: u8,
    pub away: u8,
}

impl SetScore {
    pub fn home_won(&self) -> bool {
        self.home == SETS_TO_WIN
    }
}

pub fn resolve_best_of_three(home_power: u32, away_power: u32, rng: &mut impl Rng) -> SetScore {
    let home_effective = (home_power + HOME_ADVANTAGE) as f64;
    let away_effective = away_power as f64;

    let mut score = SetScore { home: 0, away: 0 };
    while score.home < SETS_TO_WIN && score.away < SETS_TO_WIN {
        let home_draw = rng.gen::<f64>() * home_effective;
        let away_draw = rng.gen::<f64>() * away_effective;
        if home_draw > away_draw {
            score.home += 1;
        } else {
            score.away += 1;
        }
    }
    score
}
