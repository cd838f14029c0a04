/// All game entity types — pure data, no logic.

use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq)]
pub enum ObstacleKind {
    Tree,
    Snowman,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// The snowboarder.  `x` is fixed for the whole session; only `y` and the
/// vertical velocity change.  The "ascend" input flag lives outside the
/// simulation state and is handed to `tick` once per step.
#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Positive = downhill (screen-down).  Capped to ±MOVEMENT_SPEED by the
    /// integration step, but never reset when `y` pins at a band edge.
    pub velocity_y: f32,
}

// ── Obstacles & trail ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub kind: ObstacleKind,
}

/// One past position of the player, drawn as part of the ski trail.
#[derive(Clone, Debug)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Insertion order = spawn order; never positionally sorted.
    pub obstacles: Vec<Obstacle>,
    /// Newest point at the front, oldest popped off the back.
    pub trail: VecDeque<TrailPoint>,
    pub frame: u64,
    /// Milliseconds since session start, as last reported by the host.
    /// Frozen at the step that detects the collision.
    pub elapsed_ms: u64,
    /// Timestamp (ms since session start) of the last difficulty ramp.
    pub last_ramp_ms: u64,
    /// Monotonically non-decreasing; obstacles and trail scroll at
    /// MOVEMENT_SPEED × this.
    pub speed_multiplier: f32,
    /// Frames between obstacle spawns; ramps down to a floor.
    pub spawn_interval: u64,
    pub score: u32,
    /// The best score seen across sessions (shown in the HUD).
    pub best_score: u32,
    pub status: GameStatus,
}
