//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as a parameter, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod catalog;
pub mod collision;
pub mod difficulty;
pub mod field;
pub mod session;
pub mod spawner;
pub mod state;

pub use catalog::{Catalog, CatalogError, ObstacleVariant, VariantId};
pub use collision::{Aabb, overlaps_with_buffer};
pub use difficulty::Difficulty;
pub use field::ObstacleField;
pub use session::{GameSession, StepResult};
pub use spawner::ObstacleSpawner;
pub use state::{GameEvent, GamePhase, Mammoth, Obstacle};
