use snow_bored::entities::*;

use std::collections::VecDeque;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(ObstacleKind::Tree, ObstacleKind::Tree);
    assert_ne!(ObstacleKind::Tree, ObstacleKind::Snowman);
    assert_eq!(GameStatus::Running, GameStatus::Running);
    assert_ne!(GameStatus::Running, GameStatus::GameOver);

    // Clone must produce an equal value
    let kind = ObstacleKind::Snowman;
    assert_eq!(kind.clone(), ObstacleKind::Snowman);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player { x: 100.0, y: 200.0, velocity_y: 0.0 },
        obstacles: Vec::new(),
        trail: VecDeque::new(),
        frame: 0,
        elapsed_ms: 0,
        last_ramp_ms: 0,
        speed_multiplier: 1.0,
        spawn_interval: 120,
        score: 0,
        best_score: 0,
        status: GameStatus::Running,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.y = 99.0;
    cloned.score = 999;
    cloned.obstacles.push(Obstacle { x: 5.0, y: 5.0, kind: ObstacleKind::Tree });
    cloned.trail.push_front(TrailPoint { x: 1.0, y: 2.0 });

    assert_eq!(original.player.y, 200.0);
    assert_eq!(original.score, 0);
    assert!(original.obstacles.is_empty());
    assert!(original.trail.is_empty());
}
