mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use log::{debug, info};
use rand::thread_rng;

use snow_bored::compute::{init_state, tick};
use snow_bored::entities::GameStatus;

/// Score accrual assumes 60 steps per second, so the loop paces to match.
const FRAME: Duration = Duration::from_millis(16);

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Best-score persistence ────────────────────────────────────────────────────

fn best_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".snow_bored_score")
}

fn load_best_score() -> u32 {
    std::fs::read_to_string(best_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_best_score(score: u32) {
    let _ = std::fs::write(best_score_path(), score.to_string());
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    best_score: u32,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "❄  WE'RE  SNOW  BACK  ❄";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if best_score > 0 {
        let bs_str = format!("Best Score: {}", best_score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(bs_str.chars().count() as u16 / 2),
            cy.saturating_sub(3),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&bs_str))?;
    }

    let lines: &[(&str, Color)] = &[
        ("Dodge the trees and snowmen.", Color::White),
        ("Hold SPACE to carve uphill; release to drop.", Color::White),
        ("", Color::White),
        ("SPACE / ENTER : Ride    Q : Quit", Color::DarkGrey),
    ];
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(
            cx.saturating_sub(msg.chars().count() as u16 / 2),
            row,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char(' ') | KeyCode::Enter => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// The simulation never sees key events.  Input events only update the
/// `key_frame` map; once per frame the loop collapses it into a single
/// "ascend" boolean and hands that to `tick` along with the session clock.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → Space is released instantly.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  The key expires after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so it stays
///   live while actively generating repeats.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> anyhow::Result<(bool, u32)> {
    let mut rng = thread_rng();
    let (width, height) = terminal::size()?;

    let best_score = load_best_score();
    let mut state = init_state(best_score, &mut rng);

    // Session clock: all wall-clock decisions in the core (difficulty ramp,
    // elapsed time) are driven from this one epoch.
    let epoch = Instant::now();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok((true, state.score));
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok((true, state.score));
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == GameStatus::GameOver =>
                        {
                            return Ok((false, state.score));
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Advance the simulation ────────────────────────────────────────────
        if state.status == GameStatus::Running {
            let ascend = is_held(&key_frame, &KeyCode::Char(' '), frame);
            let now_ms = epoch.elapsed().as_millis() as u64;
            state = tick(&state, ascend, now_ms, &mut rng);
            if state.status == GameStatus::GameOver {
                debug!(
                    "crashed at frame {} after {} ms, score {}",
                    state.frame, state.elapsed_ms, state.score
                );
            }
        }

        display::render(out, &state, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Refuse to start on an unusable surface before touching terminal modes.
    let (cols, rows) = terminal::size().context("querying terminal size")?;
    display::preflight(cols, rows)?;
    info!("starting on a {}x{} terminal", cols, rows);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    debug!("keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> anyhow::Result<()> {
    loop {
        let best_score = load_best_score();
        match show_menu(out, rx, best_score)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let (quit, score) = game_loop(out, rx)?;

                // Persist new best score if beaten
                if score > best_score {
                    info!("new best score: {}", score);
                    save_best_score(score);
                }

                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
