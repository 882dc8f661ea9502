//! Season fixture generation.
//!
//! A double round-robin: every ordered pair of participants meets exactly
//! once, so each pairing plays a home and an away leg and N teams produce
//! `N * (N - 1)` fixtures. Kickoff times increase monotonically with a fixed
//! spacing between consecutive fixtures.

use chrono::{DateTime, Duration, Utc};

use crate::models::fixture::{Fixture, FixtureId, FixtureKind};
use crate::models::team::TeamId;

/// Default gap between consecutive fixtures.
pub fn default_spacing() -> Duration {
    Duration::hours(6)
}

/// Generate the full double round-robin for `teams`.
///
/// `next_id` is advanced past every id handed out, so repeated builder calls
/// against the same state never collide.
pub fn build_round_robin(
    teams: &[TeamId],
    kind: FixtureKind,
    start: DateTime<Utc>,
    spacing: Duration,
    next_id: &mut FixtureId,
) -> Vec<Fixture> {
    let mut fixtures = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1));
    let mut slot = 0i32;

    for &home in teams {
        for &away in teams {
            if home == away {
                continue;
            }
            let scheduled_at = start + spacing * slot;
            fixtures.push(Fixture::scheduled(*next_id, kind, home, away, scheduled_at));
            *next_id += 1;
            slot += 1;
        }
    }

    fixtures
}
