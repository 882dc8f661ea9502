//! Score broadcast seam.
//!
//! Match resolution publishes room-scoped updates keyed by fixture id; the
//! actual transport (websocket rooms in the surrounding system) stays outside
//! this crate.

use serde::Serialize;

use crate::models::fixture::{FixtureId, FixtureStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreUpdate {
    pub fixture_id: FixtureId,
    pub home_score: u8,
    pub away_score: u8,
    pub status: FixtureStatus,
}

pub trait MatchEventSink: Send {
    fn publish(&mut self, update: ScoreUpdate);
}

/// Default sink: drop everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl MatchEventSink for NullSink {
    fn publish(&mut self, _update: ScoreUpdate) {}
}

/// Test sink that keeps every published update in order. The buffer is
/// shared so callers can hand the sink to a scheduler and still read it.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    updates: std::sync::Arc<std::sync::Mutex<Vec<ScoreUpdate>>>,
}

impl RecordingSink {
    pub fn updates(&self) -> Vec<ScoreUpdate> {
        self.updates.lock().expect("RecordingSink lock poisoned").clone()
    }
}

impl MatchEventSink for RecordingSink {
    fn publish(&mut self, update: ScoreUpdate) {
        self.updates.lock().expect("RecordingSink lock poisoned").push(update);
    }
}
