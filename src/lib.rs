//! Square Chase - dodge the blocks, collect the dots
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game state)
//! - `input`: Pointer/touch target tracking
//! - `config`: Device profiles resolved into game tuning
//! - `renderer`: Draw-list generation for any 2D surface
//! - `platform`: Frame scheduling and fixed-timestep clock

pub mod config;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ArenaSize, ConfigError, DeviceProfile, GameConfig, InputMode, Preset};
pub use input::{CanvasMapping, InputTracker};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the game was tuned at 60 frames per second)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    /// Distance below which the player stops chasing the target
    pub const DEAD_ZONE: f32 = 5.0;

    /// Obstacle defaults
    pub const OBSTACLE_COUNT: usize = 8;
    pub const OBSTACLE_SIZE_MIN: f32 = 40.0;
    pub const OBSTACLE_SIZE_MAX: f32 = 100.0;

    /// Point defaults
    pub const POINT_COUNT: usize = 5;
    pub const POINT_SIZE: f32 = 15.0;
    pub const POINT_MARGIN: f32 = 20.0;
    pub const POINTS_PER_PICKUP: u64 = 10;

    /// Canvas sizes
    pub const DESKTOP_WIDTH: f32 = 800.0;
    pub const DESKTOP_HEIGHT: f32 = 600.0;
    pub const MOBILE_WIDTH: f32 = 360.0;
    pub const MOBILE_HEIGHT: f32 = 640.0;
    /// Smallest canvas edge the simulation accepts
    pub const MIN_ARENA_DIMENSION: f32 = 120.0;
    /// Widest viewport still treated as a phone
    pub const MOBILE_MAX_VIEWPORT: f32 = 768.0;
}
