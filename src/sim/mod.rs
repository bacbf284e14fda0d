//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use spawn::{generate_obstacles, generate_points};
pub use state::{GameEvent, GamePhase, Obstacle, Player, Point, Snapshot, World};
pub use tick::{TickInput, tick};
