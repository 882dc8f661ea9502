pub mod fixture;
pub mod player;
pub mod team;

pub use fixture::{Fixture, FixtureId, FixtureKind, FixtureStatus};
pub use player::{Player, PlayerId, Role};
pub use team::{Team, TeamId};
