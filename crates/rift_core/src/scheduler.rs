//! Poll-driven match scheduler.
//!
//! An explicit object owning its lifecycle: the host calls `tick()` on a
//! timer (default period 60s) and each tick picks up due fixtures, capped to
//! a small batch, resolving them sequentially. One fixture failing is logged
//! and skipped; the rest of the batch still runs, and anything left over is
//! re-evaluated by due time on the next tick rather than resumed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::clock::Clock;
use crate::error::{CoreError, Result};
use crate::events::{MatchEventSink, NullSink, ScoreUpdate};
use crate::models::fixture::{FixtureId, FixtureKind, FixtureStatus};
use crate::power::team_power;
use crate::resolver::resolve_best_of_three;
use crate::state::LeagueState;

#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Max fixtures resolved per tick.
    pub batch_size: usize,
    /// Intended poll period for the host timer, in seconds.
    pub tick_period_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { batch_size: 5, tick_period_secs: 60 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub processed: usize,
    pub failed: usize,
}

pub struct MatchScheduler<C: Clock> {
    clock: C,
    rng: ChaCha8Rng,
    config: SchedulerConfig,
    sink: Box<dyn MatchEventSink>,
    running: bool,
}

impl<C: Clock> MatchScheduler<C> {
    pub fn new(clock: C, seed: u64) -> Self {
        Self {
            clock,
            rng: ChaCha8Rng::seed_from_u64(seed),
            config: SchedulerConfig::default(),
            sink: Box::new(NullSink),
            running: false,
        }
    }

    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn MatchEventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    // ========================
    // Lifecycle
    // ========================

    pub fn start(&mut self) {
        self.running = true;
        log::info!("match scheduler started (period {}s)", self.config.tick_period_secs);
    }

    pub fn stop(&mut self) {
        self.running = false;
        log::info!("match scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================
    // Polling
    // ========================

    /// One poll cycle: resolve up to `batch_size` due fixtures. A no-op while
    /// stopped.
    pub fn tick(&mut self, state: &mut LeagueState) -> TickReport {
        let mut report = TickReport::default();
        if !self.running {
            log::debug!("tick skipped: scheduler not running");
            return report;
        }

        let now = self.clock.now();
        let due = state.due_fixtures(now, self.config.batch_size);
        if due.is_empty() {
            return report;
        }
        log::debug!("tick: {} due fixture(s)", due.len());

        for fixture_id in due {
            match self.resolve_fixture(state, fixture_id) {
                Ok(()) => report.processed += 1,
                Err(err) => {
                    log::warn!("fixture {} failed to resolve: {}", fixture_id, err);
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Resolve a single fixture end to end: transition to `InProgress`, draw
    /// the best-of-3 outcome from the two team powers, finish the fixture and
    /// (for league fixtures) book the result into the standings — all inside
    /// this one state mutation. Publishes a score update per status change.
    pub fn resolve_fixture(&mut self, state: &mut LeagueState, fixture_id: FixtureId) -> Result<()> {
        let now = self.clock.now();

        let (kind, home, away) = {
            let fixture = state
                .fixture(fixture_id)
                .ok_or_else(|| CoreError::NotFound(format!("fixture {}", fixture_id)))?;
            if fixture.status != FixtureStatus::Scheduled {
                return Err(CoreError::InvalidState(format!(
                    "fixture {} is {:?}, expected Scheduled",
                    fixture_id, fixture.status
                )));
            }
            (fixture.kind, fixture.home, fixture.away)
        };

        // Powers are read before any status write so a missing roster leaves
        // the fixture untouched for the next tick's operator to notice.
        let home_power = team_power(state, home)?;
        let away_power = team_power(state, away)?;

        {
            let fixture = state
                .fixture_mut(fixture_id)
                .ok_or_else(|| CoreError::NotFound(format!("fixture {}", fixture_id)))?;
            fixture.status = FixtureStatus::InProgress;
            fixture.started_at = Some(now);
        }
        self.sink.publish(ScoreUpdate {
            fixture_id,
            home_score: 0,
            away_score: 0,
            status: FixtureStatus::InProgress,
        });

        let score = resolve_best_of_three(home_power, away_power, &mut self.rng);

        {
            let fixture = state
                .fixture_mut(fixture_id)
                .ok_or_else(|| CoreError::NotFound(format!("fixture {}", fixture_id)))?;
            fixture.home_score = score.home;
            fixture.away_score = score.away;
            fixture.status = FixtureStatus::Finished;
            fixture.finished_at = Some(now);
        }

        if kind == FixtureKind::League {
            let (winner, loser) = if score.home_won() { (home, away) } else { (away, home) };
            state.standings.record_result(winner, loser);
        }

        self.sink.publish(ScoreUpdate {
            fixture_id,
            home_score: score.home,
            away_score: score.away,
            status: FixtureStatus::Finished,
        });
        log::info!(
            "fixture {} finished: {} {} - {} {} ({:?})",
            fixture_id,
            home,
            score.home,
            score.away,
            away,
            kind
        );
        Ok(())
    }
}
