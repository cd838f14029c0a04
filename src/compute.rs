/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle plus the host clock) and
/// returns a brand-new `GameState`.  Side effects are limited to the
/// injected RNG, so a seeded RNG and a scripted clock make every test
/// deterministic.

use rand::Rng;

use crate::entities::{GameState, GameStatus, Obstacle, ObstacleKind, Player, TrailPoint};

// ── Canvas & player geometry ─────────────────────────────────────────────────

/// The simulation runs in a fixed 800×400 canvas coordinate space; the
/// renderer scales to whatever surface it has.
pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 400.0;

/// The player never moves horizontally; the world scrolls past instead.
pub const PLAYER_X: f32 = 100.0;
pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 32.0;

/// Playable vertical band.  Position is clamped here; velocity is not.
pub const MIN_Y: f32 = 50.0;
pub const MAX_Y: f32 = CANVAS_HEIGHT - 70.0;

// ── Motion ───────────────────────────────────────────────────────────────────

/// Base scroll speed per step, and the cap on vertical velocity in both
/// directions.
pub const MOVEMENT_SPEED: f32 = 3.0;
pub const GRAVITY: f32 = 0.1;
/// Upward acceleration applied while the ascend input is held.
pub const ASCEND_ACCEL: f32 = 0.2;

// ── Trail ────────────────────────────────────────────────────────────────────

/// The trail is drawn slightly below the board.
pub const TRAIL_OFFSET_Y: f32 = 10.0;
pub const TRAIL_MAX_POINTS: usize = 50;

// ── Obstacles ────────────────────────────────────────────────────────────────

pub const INITIAL_OBSTACLES: usize = 6;
/// New obstacles enter just past the right edge.
pub const SPAWN_X: f32 = CANVAS_WIDTH + 50.0;
/// Obstacles are dropped once fully behind the left edge.
pub const OBSTACLE_CULL_X: f32 = -50.0;
pub const TREE_PROBABILITY: f64 = 0.7;

/// Frames between spawns at session start; the ramp walks this down.
pub const SPAWN_INTERVAL_START: u64 = 120;
pub const SPAWN_INTERVAL_STEP: u64 = 5;
pub const SPAWN_INTERVAL_FLOOR: u64 = 30;

// ── Difficulty ramp & scoring ────────────────────────────────────────────────

/// The ramp fires on wall-clock time, not frame count, so difficulty grows
/// at the same rate regardless of the host's frame rate.
pub const RAMP_INTERVAL_MS: u64 = 2500;
pub const RAMP_SPEED_STEP: f32 = 0.05;

/// Score ticks assume a nominal 60 steps per second.
pub const SCORE_FRAME_INTERVAL: u64 = 60;
pub const SCORE_INCREMENT: u32 = 10;

// ── Pure helpers ─────────────────────────────────────────────────────────────

/// Score earned by surviving `frame` steps, on top of `base`.
pub fn calculate_score(frame: u64, base: u32) -> u32 {
    base + (frame / SCORE_FRAME_INTERVAL) as u32 * SCORE_INCREMENT
}

/// Speed multiplier after `elapsed_ms` of ramp time.
pub fn calculate_speed_multiplier(elapsed_ms: u64) -> f32 {
    1.0 + (elapsed_ms / RAMP_INTERVAL_MS) as f32 * RAMP_SPEED_STEP
}

/// Pixels the world scrolls left per step.
pub fn scroll_speed(state: &GameState) -> f32 {
    MOVEMENT_SPEED * state.speed_multiplier
}

/// Center-distance overlap test against the player's half-extents only.
/// Obstacle dimensions are deliberately ignored; the hit test is coarse,
/// not a true box intersection.
pub fn overlaps(player: &Player, obstacle: &Obstacle) -> bool {
    (player.x - obstacle.x).abs() < PLAYER_WIDTH / 2.0
        && (player.y - obstacle.y).abs() < PLAYER_HEIGHT / 2.0
}

/// True if any obstacle overlaps the player.  Obstacles are checked in
/// spawn order and the scan short-circuits on the first hit.
pub fn check_collision(player: &Player, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|ob| overlaps(player, ob))
}

fn random_obstacle(rng: &mut impl Rng, x: f32) -> Obstacle {
    let kind = if rng.gen_bool(TREE_PROBABILITY) {
        ObstacleKind::Tree
    } else {
        ObstacleKind::Snowman
    };
    Obstacle {
        x,
        // Anywhere in the playable band: rand * (H - 100) + 50.
        y: rng.gen_range(0.0..(CANVAS_HEIGHT - 100.0)) + 50.0,
        kind,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: player at mid-height, a handful of
/// obstacles scattered across the slope, everything else zeroed.
pub fn init_state(best_score: u32, rng: &mut impl Rng) -> GameState {
    let mut obstacles = Vec::with_capacity(INITIAL_OBSTACLES);
    for _ in 0..INITIAL_OBSTACLES {
        let x = rng.gen_range(0.0..CANVAS_WIDTH);
        obstacles.push(random_obstacle(rng, x));
    }

    GameState {
        player: Player {
            x: PLAYER_X,
            y: CANVAS_HEIGHT / 2.0,
            velocity_y: 0.0,
        },
        obstacles,
        trail: Default::default(),
        frame: 0,
        elapsed_ms: 0,
        last_ramp_ms: 0,
        speed_multiplier: 1.0,
        spawn_interval: SPAWN_INTERVAL_START,
        score: 0,
        best_score,
        status: GameStatus::Running,
    }
}

// ── Per-frame tick (nearly pure — RNG and clock are injected) ────────────────

/// Advance the simulation by one step.
///
/// `ascend` is the input flag consumed for this step; `now_ms` is the host's
/// wall clock in milliseconds since session start.  Once the state is
/// game-over, `tick` is a no-op: it returns an unchanged clone, so score,
/// obstacles and the player all stay frozen.
pub fn tick(state: &GameState, ascend: bool, now_ms: u64, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    let mut next = state.clone();
    next.elapsed_ms = now_ms;

    // ── 1. Difficulty ramp (wall clock) ──────────────────────────────────────
    if now_ms - next.last_ramp_ms >= RAMP_INTERVAL_MS {
        next.speed_multiplier += RAMP_SPEED_STEP;
        next.spawn_interval = next
            .spawn_interval
            .saturating_sub(SPAWN_INTERVAL_STEP)
            .max(SPAWN_INTERVAL_FLOOR);
        next.last_ramp_ms = now_ms;
    }

    // ── 2. Vertical motion ───────────────────────────────────────────────────
    // Position is clamped into the band; velocity is NOT reset on clamp.
    // It keeps "sticking" at the cap while the position stays pinned.
    if ascend {
        next.player.velocity_y = (next.player.velocity_y - ASCEND_ACCEL).max(-MOVEMENT_SPEED);
    } else {
        next.player.velocity_y = (next.player.velocity_y + GRAVITY).min(MOVEMENT_SPEED);
    }
    next.player.y = (next.player.y + next.player.velocity_y).clamp(MIN_Y, MAX_Y);

    let speed = scroll_speed(&next);

    // ── 3. Trail: push newest, cap length, scroll, cull ──────────────────────
    next.trail.push_front(TrailPoint {
        x: next.player.x,
        y: next.player.y + TRAIL_OFFSET_Y,
    });
    if next.trail.len() > TRAIL_MAX_POINTS {
        next.trail.pop_back();
    }
    for point in next.trail.iter_mut() {
        point.x -= speed;
    }
    next.trail.retain(|point| point.x > 0.0);

    // ── 4. Obstacles: scroll & cull, spawn order preserved ───────────────────
    for obstacle in next.obstacles.iter_mut() {
        obstacle.x -= speed;
    }
    next.obstacles.retain(|obstacle| obstacle.x > OBSTACLE_CULL_X);

    // ── 5. Spawn on the interval ─────────────────────────────────────────────
    if next.frame % next.spawn_interval == 0 {
        let obstacle = random_obstacle(rng, SPAWN_X);
        next.obstacles.push(obstacle);
    }

    // ── 6. Collision → terminal state ────────────────────────────────────────
    // The step ends here on a hit: no score tick, no frame increment.
    // `elapsed_ms` already carries the time of the crash.
    if check_collision(&next.player, &next.obstacles) {
        next.status = GameStatus::GameOver;
        return next;
    }

    // ── 7. Score on the nominal-60-FPS interval ──────────────────────────────
    if next.frame % SCORE_FRAME_INTERVAL == 0 {
        next.score += SCORE_INCREMENT;
    }

    // ── 8. Frame counter ─────────────────────────────────────────────────────
    next.frame += 1;
    next
}
