/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  The simulation runs in the fixed
/// 800×400 canvas space, so every draw call goes through a `Viewport`
/// that maps canvas coordinates onto the terminal playfield.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use thiserror::Error;

use snow_bored::compute::{CANVAS_HEIGHT, CANVAS_WIDTH};
use snow_bored::entities::{GameState, GameStatus, Obstacle, ObstacleKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::White;
const C_PLAYER: Color = Color::Cyan;
const C_PLAYER_CRASHED: Color = Color::Red;
const C_TREE: Color = Color::Green;
const C_SNOWMAN: Color = Color::White;
const C_TRAIL: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

// ── Preflight ─────────────────────────────────────────────────────────────────

/// Smallest terminal the playfield stays legible in.
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 16;

/// Conditions that prevent the session from starting at all.  These are
/// checked once before the loop; the simulation itself has no failure
/// states.
#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}

/// Verify the terminal can host the playfield.  Runs before the session;
/// a failure here means "don't start", never a mid-session abort.
pub fn preflight(cols: u16, rows: u16) -> Result<(), PreflightError> {
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(PreflightError::TerminalTooSmall {
            cols,
            rows,
            min_cols: MIN_COLS,
            min_rows: MIN_ROWS,
        });
    }
    Ok(())
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps canvas coordinates onto the terminal playfield (the area inside
/// the border: columns `1..width-1`, rows `2..height-2`).
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Canvas position → terminal cell, or None when off the playfield
    /// (obstacles spawn past the right edge and cull past the left).
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let play_w = f32::from(self.width.saturating_sub(2));
        let play_h = f32::from(self.height.saturating_sub(4));
        let col = 1.0 + x / CANVAS_WIDTH * play_w;
        let row = 2.0 + y / CANVAS_HEIGHT * play_h;
        if col < 1.0 || col >= f32::from(self.width) - 1.0 || row < 2.0 {
            return None;
        }
        let (col, row) = (col as u16, row as u16);
        if row >= self.height.saturating_sub(2) {
            return None;
        }
        Some((col, row))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let view = Viewport::new(width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, state, width)?;

    draw_trail(out, state, &view)?;
    for obstacle in &state.obstacles {
        draw_obstacle(out, obstacle, &view)?;
    }
    draw_player(out, state, &view)?;
    draw_controls_hint(out, height)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

/// Elapsed milliseconds → "MM:SS".
fn format_time(elapsed_ms: u64) -> String {
    let secs = elapsed_ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    // Elapsed time — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(format_time(state.elapsed_ms)))?;

    // Score (and best, once there is one) — right
    let score_str = if state.best_score > 0 {
        format!("Score:{:>6}  Best:{:>6}", state.score, state.best_score)
    } else {
        format!("Score:{:>6}", state.score)
    };
    let rx = width.saturating_sub(score_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(state.player.x, state.player.y) {
        if state.status == GameStatus::GameOver {
            out.queue(style::SetForegroundColor(C_PLAYER_CRASHED))?;
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("✖"))?;
        } else {
            out.queue(style::SetForegroundColor(C_PLAYER))?;
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("◉"))?;
        }
    }
    Ok(())
}

fn draw_obstacle<W: Write>(
    out: &mut W,
    obstacle: &Obstacle,
    view: &Viewport,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(obstacle.x, obstacle.y) {
        match obstacle.kind {
            ObstacleKind::Tree => {
                out.queue(style::SetForegroundColor(C_TREE))?;
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("▲"))?;
            }
            ObstacleKind::Snowman => {
                out.queue(style::SetForegroundColor(C_SNOWMAN))?;
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("☃"))?;
            }
        }
    }
    Ok(())
}

fn draw_trail<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_TRAIL))?;
    for point in &state.trail {
        if let Some((col, row)) = view.cell(point.x, point.y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("·"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE (hold) : Carve uphill   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}   Time: {}", state.score, format_time(state.elapsed_ms));
    let best = state.best_score.max(state.score);
    let best_line = if state.score >= state.best_score && state.score > 0 {
        format!("★ NEW BEST: {:>6} ★", best)
    } else {
        format!("Best Score:  {:>6}", best)
    };
    let best_color = if state.score >= state.best_score && state.score > 0 {
        Color::Yellow
    } else {
        Color::DarkGrey
    };

    let box_lines: &[&str] = &[
        "╔══════════════════════╗",
        "║    IT'S SNOW OVER    ║",
        "╚══════════════════════╝",
    ];
    let hint = "R - Play Again  Q - Quit";

    let cx = width / 2;
    let total_rows = box_lines.len() + 3;
    let start_row = (height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, msg) in box_lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(Color::Red))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + box_lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let best_row = score_row + 1;
    let col = cx.saturating_sub(best_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, best_row))?;
    out.queue(style::SetForegroundColor(best_color))?;
    out.queue(Print(&best_line))?;

    let hint_row = best_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
