//! Per-tick simulation step
//!
//! Chase the target, stay on the canvas, then resolve obstacle and point contacts.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, World};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Where the player is heading, in canvas coordinates
    pub target: Vec2,
}

/// Advance the world by one step and report what happened
pub fn tick(state: &mut World, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Frozen until the host resets
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;

    // Movement
    let dead_zone = state.config.dead_zone;
    let clamp_overshoot = state.config.clamp_overshoot;
    state
        .player
        .move_toward(input.target, dead_zone, clamp_overshoot);
    state.player.clamp_to(state.arena);

    let player_box = state.player.aabb();

    // Obstacles: first hit in list order ends the run
    if let Some(obstacle_index) = state
        .obstacles
        .iter()
        .position(|o| player_box.overlaps(&o.aabb()))
    {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Hit obstacle {} at tick {}, final score {}",
            obstacle_index,
            state.time_ticks,
            state.score
        );
        events.push(GameEvent::Collision { obstacle_index });
        return events;
    }

    // Points: several can be taken in one tick
    let reward = state.config.points_per_pickup;
    for point in state.points.iter_mut().filter(|p| !p.collected) {
        if player_box.overlaps(&point.aabb()) {
            point.collected = true;
            state.score += reward;
            log::debug!("Point collected, score {}", state.score);
            events.push(GameEvent::PointCollected { score: state.score });
        }
    }

    if state.all_points_collected() {
        state.respawn_points();
        events.push(GameEvent::PointsRespawned);
    }

    events
}
