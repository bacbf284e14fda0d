//! Game tuning and device profiles
//!
//! Desktop and phone builds differ only in numbers, so the choice is made once
//! at startup and the simulation reads a plain [`GameConfig`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Device class the game was started on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeviceProfile {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceProfile::Desktop => "Desktop",
            DeviceProfile::Mobile => "Mobile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" | "pc" => Some(DeviceProfile::Desktop),
            "mobile" | "phone" => Some(DeviceProfile::Mobile),
            _ => None,
        }
    }

    /// Pick a profile from what the browser reports
    pub fn detect(max_touch_points: i32, viewport_width: f32) -> Self {
        if max_touch_points > 0 && viewport_width <= MOBILE_MAX_VIEWPORT {
            DeviceProfile::Mobile
        } else {
            DeviceProfile::Desktop
        }
    }

    /// Hint shown under the game-over overlay
    pub fn restart_hint(&self) -> &'static str {
        match self {
            DeviceProfile::Desktop => "Click to play again",
            DeviceProfile::Mobile => "Tap to play again",
        }
    }
}

/// How pointer movement feeds the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputMode {
    /// Target follows every pointer move (first desktop build)
    Follow,
    /// Target only moves while a button or finger is down
    #[default]
    WhilePressed,
}

/// Named starting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// First desktop build: pointer-follow steering with instructions on screen
    Classic,
    #[default]
    Desktop,
    Mobile,
    /// Profile tuning on a canvas that fills its container
    Responsive,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Desktop => "Desktop",
            Preset::Mobile => "Mobile",
            Preset::Responsive => "Responsive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "desktop" | "pc" => Some(Preset::Desktop),
            "mobile" | "phone" => Some(Preset::Mobile),
            "responsive" | "fill" => Some(Preset::Responsive),
            _ => None,
        }
    }

    /// Resolve to tuning; `Responsive` uses the mobile profile
    pub fn config(&self) -> GameConfig {
        match self {
            Preset::Classic => GameConfig::classic(),
            Preset::Desktop => GameConfig::from_profile(DeviceProfile::Desktop),
            Preset::Mobile => GameConfig::from_profile(DeviceProfile::Mobile),
            Preset::Responsive => GameConfig::responsive(DeviceProfile::Mobile),
        }
    }
}

/// Canvas sizing policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArenaSize {
    /// Fixed canvas in pixels
    Fixed { width: f32, height: f32 },
    /// Canvas tracks its container; the world regenerates on resize
    Fill,
}

impl ArenaSize {
    /// Resolve to concrete dimensions, falling back to `container` for `Fill`
    pub fn resolve(&self, container: Vec2) -> Vec2 {
        match *self {
            ArenaSize::Fixed { width, height } => Vec2::new(width, height),
            ArenaSize::Fill => container,
        }
    }
}

/// Resolved game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Profile these numbers were derived from
    pub profile: DeviceProfile,

    // === Obstacles ===
    pub obstacle_count: usize,
    pub obstacle_size_min: f32,
    pub obstacle_size_max: f32,
    /// Subtracted from the canvas edge when picking an obstacle position
    pub obstacle_position_margin: f32,

    // === Points ===
    pub point_count: usize,
    pub point_size: f32,
    /// Subtracted from the canvas edge when picking a point position
    pub point_margin: f32,
    pub points_per_pickup: u64,

    // === Player ===
    pub player_size: f32,
    /// Units moved per tick
    pub player_speed: f32,
    pub dead_zone: f32,
    /// Limit each step to the remaining distance instead of overshooting
    pub clamp_overshoot: bool,

    // === Platform ===
    pub input_mode: InputMode,
    pub arena: ArenaSize,
    /// Draw the how-to-play panel in the top-left corner
    pub show_instructions: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_profile(DeviceProfile::Desktop)
    }
}

impl GameConfig {
    /// Tuning for a device profile
    pub fn from_profile(profile: DeviceProfile) -> Self {
        match profile {
            DeviceProfile::Desktop => Self {
                profile,
                obstacle_count: OBSTACLE_COUNT,
                obstacle_size_min: OBSTACLE_SIZE_MIN,
                obstacle_size_max: OBSTACLE_SIZE_MAX,
                obstacle_position_margin: OBSTACLE_SIZE_MAX,
                point_count: POINT_COUNT,
                point_size: POINT_SIZE,
                point_margin: POINT_MARGIN,
                points_per_pickup: POINTS_PER_PICKUP,
                player_size: PLAYER_SIZE,
                player_speed: PLAYER_SPEED,
                dead_zone: DEAD_ZONE,
                clamp_overshoot: false,
                input_mode: InputMode::WhilePressed,
                arena: ArenaSize::Fixed {
                    width: DESKTOP_WIDTH,
                    height: DESKTOP_HEIGHT,
                },
                show_instructions: false,
            },
            DeviceProfile::Mobile => Self {
                profile,
                obstacle_count: 5,
                obstacle_size_min: 30.0,
                obstacle_size_max: 60.0,
                obstacle_position_margin: 60.0,
                point_count: 4,
                point_size: 20.0,
                point_margin: 25.0,
                points_per_pickup: POINTS_PER_PICKUP,
                player_size: 25.0,
                player_speed: 4.0,
                dead_zone: DEAD_ZONE,
                clamp_overshoot: false,
                input_mode: InputMode::WhilePressed,
                arena: ArenaSize::Fixed {
                    width: MOBILE_WIDTH,
                    height: MOBILE_HEIGHT,
                },
                show_instructions: false,
            },
        }
    }

    /// The first desktop build: mouse-follow, obstacles placed against the
    /// minimum size so large ones can poke past the edge, instructions shown
    pub fn classic() -> Self {
        Self {
            obstacle_position_margin: OBSTACLE_SIZE_MIN,
            input_mode: InputMode::Follow,
            show_instructions: true,
            ..Self::from_profile(DeviceProfile::Desktop)
        }
    }

    /// Profile tuning on a canvas that fills its container
    pub fn responsive(profile: DeviceProfile) -> Self {
        Self {
            arena: ArenaSize::Fill,
            ..Self::from_profile(profile)
        }
    }

    /// Parse JSON overrides on top of the desktop defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded {} config", config.profile.as_str());
        Ok(config)
    }

    /// Reject tuning the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        positive("obstacle_size_min", self.obstacle_size_min)?;
        positive("obstacle_size_max", self.obstacle_size_max)?;
        positive("point_size", self.point_size)?;
        positive("player_size", self.player_size)?;
        positive("player_speed", self.player_speed)?;

        if self.obstacle_size_min > self.obstacle_size_max {
            return Err(ConfigError::Invalid {
                field: "obstacle_size_min",
                reason: format!(
                    "{} exceeds obstacle_size_max {}",
                    self.obstacle_size_min, self.obstacle_size_max
                ),
            });
        }
        if self.point_count == 0 {
            return Err(ConfigError::Invalid {
                field: "point_count",
                reason: "at least one point is required".to_string(),
            });
        }
        if !self.dead_zone.is_finite() || self.dead_zone < 0.0 {
            return Err(ConfigError::Invalid {
                field: "dead_zone",
                reason: format!("must not be negative, got {}", self.dead_zone),
            });
        }
        if self.obstacle_position_margin < 0.0 || self.point_margin < 0.0 {
            return Err(ConfigError::Invalid {
                field: "margin",
                reason: "spawn margins must not be negative".to_string(),
            });
        }
        if let ArenaSize::Fixed { width, height } = self.arena {
            positive("arena.width", width)?;
            positive("arena.height", height)?;
        }
        Ok(())
    }
}
