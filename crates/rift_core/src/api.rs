//! JSON entry points for the HTTP host.
//!
//! String-in/string-out, schema-versioned. Failures come back as an
//! `{"error": ..., "status": ...}` payload carrying the HTTP status the
//! route layer should respond with.

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clock::ManualClock;
use crate::error::{CoreError, Result};
use crate::models::fixture::{Fixture, FixtureKind};
use crate::models::team::TeamId;
use crate::resolver::resolve_best_of_three;
use crate::scheduler::{MatchScheduler, SchedulerConfig, TickReport};
use crate::season::build_round_robin;
use crate::state::get_state_mut;
use crate::SCHEMA_VERSION;

pub fn error_payload(err: &CoreError) -> String {
    serde_json::json!({
        "error": err.to_string(),
        "status": err.http_status(),
    })
    .to_string()
}

fn check_schema(version: u8) -> Result<()> {
    if version != SCHEMA_VERSION {
        return Err(CoreError::Validation(format!(
            "unsupported schema_version {}, expected {}",
            version, SCHEMA_VERSION
        )));
    }
    Ok(())
}

fn respond(op: &str, result: Result<String>) -> String {
    match result {
        Ok(body) => {
            info!("{} ok", op);
            body
        }
        Err(err) => {
            warn!("{} failed: {}", op, err);
            error_payload(&err)
        }
    }
}

// ============================================================================
// Season building
// ============================================================================

fn default_spacing_hours() -> i64 {
    6
}

fn default_first_fixture_id() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct SeasonRequest {
    pub schema_version: u8,
    pub team_ids: Vec<TeamId>,
    pub start: DateTime<Utc>,
    #[serde(default = "default_spacing_hours")]
    pub spacing_hours: i64,
    #[serde(default = "default_first_fixture_id")]
    pub first_fixture_id: u32,
}

#[derive(Debug, Serialize)]
pub struct SeasonResponse {
    pub schema_version: u8,
    pub fixtures: Vec<Fixture>,
}

/// Generate a double round-robin season. Pure: the caller inserts the
/// returned fixtures into its state.
pub fn build_season_json(input: &str) -> String {
    respond("build_season", build_season_impl(input))
}

fn build_season_impl(input: &str) -> Result<String> {
    let request: SeasonRequest = serde_json::from_str(input)?;
    check_schema(request.schema_version)?;
    if request.team_ids.len() < 2 {
        return Err(CoreError::Validation(format!(
            "season needs at least 2 teams, got {}",
            request.team_ids.len()
        )));
    }

    let mut next_id = request.first_fixture_id;
    let fixtures = build_round_robin(
        &request.team_ids,
        FixtureKind::League,
        request.start,
        Duration::hours(request.spacing_hours),
        &mut next_id,
    );

    Ok(serde_json::to_string(&SeasonResponse { schema_version: SCHEMA_VERSION, fixtures })?)
}

// ============================================================================
// Outcome resolution
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_power: u32,
    pub away_power: u32,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub schema_version: u8,
    pub home_score: u8,
    pub away_score: u8,
}

/// Draw one best-of-3 outcome from two power scalars. The host feeds powers
/// from `power::team_power`. Same seed, same result.
pub fn resolve_fixture_json(input: &str) -> String {
    respond("resolve_fixture", resolve_fixture_impl(input))
}

fn resolve_fixture_impl(input: &str) -> Result<String> {
    let request: ResolveRequest = serde_json::from_str(input)?;
    check_schema(request.schema_version)?;

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let score = resolve_best_of_three(request.home_power, request.away_power, &mut rng);

    Ok(serde_json::to_string(&ResolveResponse {
        schema_version: SCHEMA_VERSION,
        home_score: score.home,
        away_score: score.away,
    })?)
}

// ============================================================================
// Scheduler tick
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TickRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub now: DateTime<Utc>,
    #[serde(default)]
    pub batch_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TickResponse {
    pub schema_version: u8,
    #[serde(flatten)]
    pub report: TickReport,
}

/// Run one poll cycle against the global league state at the given instant.
pub fn scheduler_tick_json(input: &str) -> String {
    respond("scheduler_tick", scheduler_tick_impl(input))
}

fn scheduler_tick_impl(input: &str) -> Result<String> {
    let request: TickRequest = serde_json::from_str(input)?;
    check_schema(request.schema_version)?;

    let mut config = SchedulerConfig::default();
    if let Some(batch_size) = request.batch_size {
        config.batch_size = batch_size;
    }

    let mut scheduler =
        MatchScheduler::new(ManualClock::new(request.now), request.seed).with_config(config);
    scheduler.start();
    let report = scheduler.tick(&mut get_state_mut());

    Ok(serde_json::to_string(&TickResponse { schema_version: SCHEMA_VERSION, report })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_season_json() {
        let request = json!({
            "schema_version": 1,
            "team_ids": [1, 2, 3],
            "start": "2026-01-10T12:00:00Z"
        });
        let response = build_season_json(&request.to_string());
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();

        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["fixtures"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_schema_mismatch_yields_error_payload() {
        let request = json!({
            "schema_version": 9,
            "team_ids": [1, 2],
            "start": "2026-01-10T12:00:00Z"
        });
        let response = build_season_json(&request.to_string());
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();

        assert!(parsed["error"].as_str().unwrap().contains("schema_version"));
        assert_eq!(parsed["status"], 400);
    }

    #[test]
    fn test_resolve_json_is_seed_deterministic() {
        let request = json!({
            "schema_version": 1,
            "seed": 77,
            "home_power": 180,
            "away_power": 140
        })
        .to_string();

        let a = resolve_fixture_json(&request);
        let b = resolve_fixture_json(&request);
        assert_eq!(a, b);

        let parsed: serde_json::Value = serde_json::from_str(&a).unwrap();
        let home = parsed["home_score"].as_u64().unwrap();
        let away = parsed["away_score"].as_u64().unwrap();
        assert_eq!(home.max(away), 2);
    }

    #[test]
    fn test_tick_json_reports_counts() {
        crate::state::reset_state();
        let request = json!({
            "schema_version": 1,
            "seed": 3,
            "now": "2026-01-10T12:00:00Z"
        });
        let response = scheduler_tick_json(&request.to_string());
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();

        assert_eq!(parsed["processed"], 0);
        assert_eq!(parsed["failed"], 0);
    }

    #[test]
    fn test_single_team_season_rejected() {
        let request = json!({
            "schema_version": 1,
            "team_ids": [1],
            "start": "2026-01-10T12:00:00Z"
        });
        let response = build_season_json(&request.to_string());
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["status"], 400);
    }
}
