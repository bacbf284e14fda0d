//! Draw-list generation for the world

use glam::Vec2;

use super::{DrawCmd, Frame, TextAlign, palette};
use crate::config::InputMode;
use crate::sim::{Rect, World};

/// Guide line width in pixels
const GUIDE_WIDTH: f32 = 2.0;

const INSTRUCTIONS_ORIGIN: Vec2 = Vec2::new(10.0, 24.0);
const INSTRUCTIONS_LINE_HEIGHT: f32 = 25.0;
const INSTRUCTIONS_PX: f32 = 16.0;

/// How-to-play panel; the first line is the heading
pub fn instruction_lines(world: &World) -> [&'static str; 4] {
    let steer = match world.config.input_mode {
        InputMode::Follow => "Move the pointer to steer the square",
        InputMode::WhilePressed => "Press and drag to steer the square",
    };
    [
        "How to play:",
        steer,
        "Avoid the red blocks",
        "Collect the green dots",
    ]
}

/// Text for the game-over overlay: (line, font px, vertical offset from centre)
pub fn overlay_lines(world: &World) -> [(String, f32, f32); 3] {
    [
        ("Game Over".to_string(), 48.0, -50.0),
        (format!("Score: {}", world.score), 24.0, 0.0),
        (world.config.profile.restart_hint().to_string(), 18.0, 50.0),
    ]
}

/// Build the frame for `world`.
///
/// `guide_target` draws a faint line from the player to the pointer target;
/// pass `None` when no press is in progress.
pub fn build_frame(world: &World, guide_target: Option<Vec2>) -> Frame {
    let mut commands = Vec::with_capacity(world.obstacles.len() + world.points.len() + 8);

    commands.push(DrawCmd::Clear {
        color: palette::BACKGROUND,
    });

    for obstacle in &world.obstacles {
        commands.push(DrawCmd::FillRect {
            rect: obstacle.aabb(),
            color: palette::OBSTACLE,
        });
    }

    // Collected points stay in the list but are not drawn
    for point in world.points.iter().filter(|p| !p.collected) {
        commands.push(DrawCmd::FillCircle {
            center: point.center(),
            radius: point.radius(),
            color: palette::POINT,
        });
    }

    commands.push(DrawCmd::FillRect {
        rect: world.player.aabb(),
        color: palette::PLAYER,
    });

    if let Some(target) = guide_target {
        commands.push(DrawCmd::Line {
            from: world.player.pos,
            to: target,
            width: GUIDE_WIDTH,
            color: palette::GUIDE,
        });
    }

    // Hidden under the game-over overlay
    if world.config.show_instructions && !world.is_over() {
        for (i, line) in instruction_lines(world).into_iter().enumerate() {
            let dy = i as f32 * INSTRUCTIONS_LINE_HEIGHT;
            let color = if i == 0 { palette::TEXT } else { palette::HINT };
            commands.push(DrawCmd::Text {
                text: line.to_string(),
                pos: INSTRUCTIONS_ORIGIN + Vec2::new(0.0, dy),
                px: INSTRUCTIONS_PX,
                align: TextAlign::Left,
                color,
            });
        }
    }

    if world.is_over() {
        commands.push(DrawCmd::FillRect {
            rect: Rect::new(Vec2::ZERO, world.arena),
            color: palette::OVERLAY,
        });
        let center = world.arena / 2.0;
        for (text, px, dy) in overlay_lines(world) {
            commands.push(DrawCmd::Text {
                text,
                pos: center + Vec2::new(0.0, dy),
                px,
                align: TextAlign::Center,
                color: palette::TEXT,
            });
        }
    }

    Frame {
        size: world.arena,
        commands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeviceProfile, GameConfig};
    use crate::sim::{GamePhase, Point};

    fn world() -> World {
        World::new(
            GameConfig::from_profile(DeviceProfile::Mobile),
            Vec2::new(360.0, 640.0),
            21,
        )
    }

    fn count(frame: &Frame, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        frame.commands.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn test_frame_layout() {
        let world = world();
        let frame = build_frame(&world, None);

        assert_eq!(frame.size, world.arena);
        assert!(matches!(frame.commands[0], DrawCmd::Clear { .. }));
        // Obstacles plus the player
        assert_eq!(
            count(&frame, |c| matches!(c, DrawCmd::FillRect { .. })),
            world.obstacles.len() + 1
        );
        assert_eq!(
            count(&frame, |c| matches!(c, DrawCmd::FillCircle { .. })),
            world.points.len()
        );
        assert_eq!(count(&frame, |c| matches!(c, DrawCmd::Line { .. })), 0);
        assert_eq!(count(&frame, |c| matches!(c, DrawCmd::Text { .. })), 0);
    }

    #[test]
    fn test_collected_points_hidden() {
        let mut world = world();
        world.points = vec![
            Point::new(Vec2::new(10.0, 10.0), 20.0),
            Point::new(Vec2::new(50.0, 50.0), 20.0),
        ];
        world.points[0].collected = true;

        let frame = build_frame(&world, None);
        let circles: Vec<_> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillCircle { center, .. } => Some(*center),
                _ => None,
            })
            .collect();
        assert_eq!(circles, vec![Vec2::new(60.0, 60.0)]);
    }

    #[test]
    fn test_guide_line_to_target() {
        let world = world();
        let target = Vec2::new(20.0, 30.0);
        let frame = build_frame(&world, Some(target));
        assert!(frame.commands.contains(&DrawCmd::Line {
            from: world.player.pos,
            to: target,
            width: GUIDE_WIDTH,
            color: palette::GUIDE,
        }));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut world = world();
        world.score = 130;
        world.phase = GamePhase::GameOver;

        let frame = build_frame(&world, None);
        assert_eq!(texts(&frame), vec!["Game Over", "Score: 130", "Tap to play again"]);
    }

    fn texts(frame: &Frame) -> Vec<&str> {
        frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_instructions_panel() {
        let mut world = World::new(GameConfig::classic(), Vec2::new(800.0, 600.0), 4);
        let frame = build_frame(&world, None);
        assert_eq!(
            texts(&frame),
            vec![
                "How to play:",
                "Move the pointer to steer the square",
                "Avoid the red blocks",
                "Collect the green dots",
            ]
        );
        assert!(frame.commands.contains(&DrawCmd::Text {
            text: "Avoid the red blocks".to_string(),
            pos: Vec2::new(10.0, 74.0),
            px: INSTRUCTIONS_PX,
            align: TextAlign::Left,
            color: palette::HINT,
        }));

        // Replaced by the overlay once the run ends
        world.phase = GamePhase::GameOver;
        let frame = build_frame(&world, None);
        assert_eq!(texts(&frame), vec!["Game Over", "Score: 0", "Click to play again"]);
    }

    #[test]
    fn test_instructions_follow_input_mode() {
        let world = World::new(
            GameConfig {
                show_instructions: true,
                ..GameConfig::from_profile(DeviceProfile::Mobile)
            },
            Vec2::new(360.0, 640.0),
            4,
        );
        assert_eq!(instruction_lines(&world)[1], "Press and drag to steer the square");
    }

    #[test]
    fn test_frame_serializes() {
        let frame = build_frame(&world(), Some(Vec2::ZERO));
        let json = serde_json::to_string(&frame).expect("serialize");
        assert!(json.contains("FillCircle"));
    }
}
