//! Obstacle and point placement
//!
//! Every call produces a whole new list. Nothing keeps spawned objects apart,
//! not even from the player.

use glam::Vec2;
use rand::Rng;

use super::state::{Obstacle, Point};
use crate::config::GameConfig;

/// Uniform position in `[0, arena - margin]` per axis (collapses to 0 on tiny canvases)
fn random_position<R: Rng + ?Sized>(rng: &mut R, arena: Vec2, margin: f32) -> Vec2 {
    let max = (arena - Vec2::splat(margin)).max(Vec2::ZERO);
    Vec2::new(rng.random_range(0.0..=max.x), rng.random_range(0.0..=max.y))
}

/// Generate `obstacle_count` rectangles with independent random width and height
pub fn generate_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    arena: Vec2,
) -> Vec<Obstacle> {
    let lo = config.obstacle_size_min.min(config.obstacle_size_max);
    let hi = config.obstacle_size_min.max(config.obstacle_size_max);

    (0..config.obstacle_count)
        .map(|_| {
            let pos = random_position(rng, arena, config.obstacle_position_margin);
            // Size is drawn after the position, so the far edge can pass the canvas
            // when the margin is smaller than the largest size.
            let size = Vec2::new(rng.random_range(lo..=hi), rng.random_range(lo..=hi));
            Obstacle { pos, size }
        })
        .collect()
}

/// Generate `point_count` uncollected points
pub fn generate_points<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    arena: Vec2,
) -> Vec<Point> {
    (0..config.point_count)
        .map(|_| Point::new(random_position(rng, arena, config.point_margin), config.point_size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceProfile;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_obstacles_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let config = GameConfig::from_profile(DeviceProfile::Desktop);
        let arena = Vec2::new(800.0, 600.0);

        for _ in 0..20 {
            let obstacles = generate_obstacles(&mut rng, &config, arena);
            assert_eq!(obstacles.len(), config.obstacle_count);
            for o in &obstacles {
                assert!(o.pos.x >= 0.0 && o.pos.x <= 700.0);
                assert!(o.pos.y >= 0.0 && o.pos.y <= 500.0);
                assert!(o.size.x >= 40.0 && o.size.x <= 100.0);
                assert!(o.size.y >= 40.0 && o.size.y <= 100.0);
                // Margin equals the max size, so the whole rect fits
                assert!(o.aabb().inside(arena));
            }
        }
    }

    #[test]
    fn test_classic_obstacles_may_overhang() {
        let mut rng = Pcg32::seed_from_u64(9);
        let config = GameConfig::classic();
        let arena = Vec2::new(800.0, 600.0);

        for _ in 0..20 {
            for o in generate_obstacles(&mut rng, &config, arena) {
                assert!(o.pos.x <= 760.0 && o.pos.y <= 560.0);
                // Overhang is bounded by max - min size
                assert!(o.aabb().max().x <= 800.0 + 60.0);
                assert!(o.aabb().max().y <= 600.0 + 60.0);
            }
        }
    }

    #[test]
    fn test_points_fresh_and_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        let config = GameConfig::from_profile(DeviceProfile::Mobile);
        let arena = Vec2::new(360.0, 640.0);

        let points = generate_points(&mut rng, &config, arena);
        assert_eq!(points.len(), config.point_count);
        for p in &points {
            assert!(!p.collected);
            assert_eq!(p.size, config.point_size);
            assert!(p.aabb().inside(arena));
        }
    }

    #[test]
    fn test_tiny_arena_spawns_at_origin() {
        let mut rng = Pcg32::seed_from_u64(3);
        let config = GameConfig::default();
        let obstacles = generate_obstacles(&mut rng, &config, Vec2::splat(50.0));
        assert!(obstacles.iter().all(|o| o.pos == Vec2::ZERO));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = GameConfig::default();
        let arena = Vec2::new(800.0, 600.0);
        let a = generate_obstacles(&mut Pcg32::seed_from_u64(77), &config, arena);
        let b = generate_obstacles(&mut Pcg32::seed_from_u64(77), &config, arena);
        assert_eq!(a, b);
    }
}
