//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawn::{generate_obstacles, generate_points};
use crate::config::GameConfig;
use crate::consts::MIN_ARENA_DIMENSION;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player hit an obstacle; frozen until reset
    GameOver,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A point was picked up; carries the new score
    PointCollected { score: u64 },
    /// Every point was gathered and a fresh batch spawned
    PointsRespawned,
    /// The player ran into the obstacle at this list index
    Collision { obstacle_index: usize },
}

/// The player's square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Centre of the square
    pub pos: Vec2,
    /// Side length
    pub size: f32,
    /// Distance moved per tick
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, size: f32, speed: f32) -> Self {
        Self { pos, size, speed }
    }

    pub fn aabb(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Step toward `target` by `speed`, unless already within `dead_zone`.
    ///
    /// Without `clamp_overshoot` a step longer than the remaining distance
    /// carries the square past the target. Returns true if the player moved.
    pub fn move_toward(&mut self, target: Vec2, dead_zone: f32, clamp_overshoot: bool) -> bool {
        let delta = target - self.pos;
        let distance = delta.length();
        if distance <= dead_zone || distance == 0.0 {
            return false;
        }

        let step = if clamp_overshoot {
            self.speed.min(distance)
        } else {
            self.speed
        };
        self.pos += delta / distance * step;
        true
    }

    /// Keep the whole square on the canvas
    pub fn clamp_to(&mut self, arena: Vec2) {
        let half = Vec2::splat(self.size / 2.0);
        self.pos = self.pos.clamp(half, (arena - half).max(half));
    }
}

/// A rectangular hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Obstacle {
    pub fn aabb(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A collectible dot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    /// Diameter
    pub size: f32,
    pub collected: bool,
}

impl Point {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            collected: false,
        }
    }

    pub fn aabb(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// Serializable view of a world, for hosts and debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub arena: Vec2,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub points: Vec<Point>,
    pub score: u64,
    pub phase: GamePhase,
    pub time_ticks: u64,
    /// Seed the world was created with
    pub seed: u64,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct World {
    /// Tuning this world was built with
    pub config: GameConfig,
    /// Canvas dimensions
    pub arena: Vec2,
    pub player: Player,
    /// Hazards, tested in list order
    pub obstacles: Vec<Obstacle>,
    /// Current batch of points
    pub points: Vec<Point>,
    pub score: u64,
    pub phase: GamePhase,
    /// Simulation tick counter (only advances while playing)
    pub time_ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
}

impl World {
    /// Create a world on a canvas of `arena` pixels, seeded for reproducible spawns
    pub fn new(config: GameConfig, arena: Vec2, seed: u64) -> Self {
        let arena = clamp_arena(arena, &config);
        let player = Player::new(arena / 2.0, config.player_size, config.player_speed);
        let mut world = Self {
            config,
            arena,
            player,
            obstacles: Vec::new(),
            points: Vec::new(),
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        world.regenerate();
        log::info!(
            "World created: {}x{} arena, seed {}",
            world.arena.x,
            world.arena.y,
            seed
        );
        world
    }

    /// Start over: zero score, centred player, fresh obstacles and points
    pub fn reset(&mut self) {
        let final_score = self.score;
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.center_player();
        self.regenerate();
        log::info!("Game reset (previous score {})", final_score);
    }

    /// Adopt a new canvas size; the board is rebuilt for it
    pub fn resize(&mut self, arena: Vec2) {
        self.arena = clamp_arena(arena, &self.config);
        self.center_player();
        self.regenerate();
        log::info!("Arena resized to {}x{}", self.arena.x, self.arena.y);
    }

    /// Replace the point list with a fresh uncollected batch
    pub fn respawn_points(&mut self) {
        self.points = generate_points(&mut self.rng, &self.config, self.arena);
        log::info!("Spawned {} new points", self.points.len());
    }

    pub fn all_points_collected(&self) -> bool {
        !self.points.is_empty() && self.points.iter().all(|p| p.collected)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            arena: self.arena,
            player: self.player.clone(),
            obstacles: self.obstacles.clone(),
            points: self.points.clone(),
            score: self.score,
            phase: self.phase,
            time_ticks: self.time_ticks,
            seed: self.seed,
        }
    }

    fn center_player(&mut self) {
        self.player.pos = self.arena / 2.0;
    }

    fn regenerate(&mut self) {
        self.obstacles = generate_obstacles(&mut self.rng, &self.config, self.arena);
        self.points = generate_points(&mut self.rng, &self.config, self.arena);
    }
}

/// Enforce a minimum canvas so spawn ranges and clamping stay well-formed
fn clamp_arena(arena: Vec2, config: &GameConfig) -> Vec2 {
    let min = MIN_ARENA_DIMENSION.max(config.player_size * 2.0);
    let clamped = Vec2::new(
        if arena.x.is_finite() { arena.x.max(min) } else { min },
        if arena.y.is_finite() { arena.y.max(min) } else { min },
    );
    if clamped != arena {
        log::warn!(
            "Arena {}x{} too small, using {}x{}",
            arena.x,
            arena.y,
            clamped.x,
            clamped.y
        );
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceProfile;

    fn desktop_world(seed: u64) -> World {
        World::new(
            GameConfig::from_profile(DeviceProfile::Desktop),
            Vec2::new(800.0, 600.0),
            seed,
        )
    }

    #[test]
    fn test_new_world_layout() {
        let world = desktop_world(7);
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.score, 0);
        assert_eq!(world.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(world.obstacles.len(), world.config.obstacle_count);
        assert_eq!(world.points.len(), world.config.point_count);
        assert!(world.points.iter().all(|p| !p.collected));
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut world = desktop_world(11);
        let old_obstacles = world.obstacles.clone();
        world.score = 130;
        world.phase = GamePhase::GameOver;
        world.player.pos = Vec2::new(35.0, 520.0);
        world.points[0].collected = true;

        world.reset();

        assert_eq!(world.score, 0);
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.player.pos, Vec2::new(400.0, 300.0));
        assert_ne!(world.obstacles, old_obstacles);
        assert_eq!(world.points.len(), world.config.point_count);
        assert!(world.points.iter().all(|p| !p.collected));
    }

    #[test]
    fn test_resize_recenters_and_regenerates() {
        let mut world = desktop_world(3);
        world.player.pos = Vec2::new(20.0, 20.0);
        world.points[0].collected = true;
        let old_obstacles = world.obstacles.clone();
        let old_points = world.points.clone();

        world.resize(Vec2::new(1200.0, 900.0));

        assert_eq!(world.arena, Vec2::new(1200.0, 900.0));
        assert_eq!(world.player.pos, Vec2::new(600.0, 450.0));
        assert_ne!(world.obstacles, old_obstacles);
        assert_ne!(world.points, old_points);
        assert_eq!(world.obstacles.len(), world.config.obstacle_count);
        assert_eq!(world.points.len(), world.config.point_count);
        assert!(world.points.iter().all(|p| !p.collected));
        for obstacle in &world.obstacles {
            assert!(obstacle.pos.x <= 1200.0 - world.config.obstacle_position_margin);
        }
    }

    #[test]
    fn test_degenerate_arena_is_clamped() {
        let world = World::new(GameConfig::default(), Vec2::ZERO, 1);
        assert_eq!(world.arena, Vec2::splat(MIN_ARENA_DIMENSION));
        let world = World::new(GameConfig::default(), Vec2::new(f32::NAN, 500.0), 1);
        assert_eq!(world.arena, Vec2::new(MIN_ARENA_DIMENSION, 500.0));
    }

    #[test]
    fn test_move_toward_dead_zone() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), 20.0, 3.0);
        assert!(!player.move_toward(Vec2::new(103.0, 104.0), 5.0, false));
        assert_eq!(player.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_move_toward_overshoot() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), 20.0, 10.0);
        assert!(player.move_toward(Vec2::new(106.0, 100.0), 5.0, false));
        assert!((player.pos.x - 110.0).abs() < 1e-4);

        let mut player = Player::new(Vec2::new(100.0, 100.0), 20.0, 10.0);
        assert!(player.move_toward(Vec2::new(106.0, 100.0), 5.0, true));
        assert!((player.pos.x - 106.0).abs() < 1e-4);
    }

    #[test]
    fn test_point_geometry() {
        let point = Point::new(Vec2::new(10.0, 20.0), 15.0);
        assert_eq!(point.center(), Vec2::new(17.5, 27.5));
        assert_eq!(point.radius(), 7.5);
        assert_eq!(point.aabb().max(), Vec2::new(25.0, 35.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = desktop_world(5);
        let json = serde_json::to_string(&world.snapshot()).expect("serialize");
        let back: Snapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.obstacles, world.obstacles);
        assert_eq!(back.phase, GamePhase::Playing);
        assert_eq!(back.seed, 5);
    }
}
