/// Presentation layer — all terminal drawing lives here.
///
/// The render worker hands every function a mutable writer and an
/// immutable [`Frame`]; no game logic is performed and no locks are
/// touched.  This module only translates a snapshot into terminal
/// commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{Entity, Field, GameMode, GamePhase, Player, Tint};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_STARS: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::Green;
const C_INVADER: Color = Color::Red;
const C_PLAYER_SHOT: Color = Color::Cyan;
const C_INVADER_SHOT: Color = Color::Magenta;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Player => C_PLAYER,
        Tint::Invader => C_INVADER,
        Tint::PlayerShot => C_PLAYER_SHOT,
        Tint::InvaderShot => C_INVADER_SHOT,
    }
}

/// Backdrop star positions, fixed for a little space ambience.
const STARS: [(i32, i32); 15] = [
    (10, 5),
    (25, 8),
    (45, 3),
    (60, 12),
    (75, 6),
    (15, 15),
    (35, 18),
    (55, 20),
    (70, 16),
    (80, 22),
    (5, 25),
    (30, 28),
    (50, 30),
    (65, 27),
    (85, 25),
];

// ── Frame snapshot ────────────────────────────────────────────────────────────

/// Consistent read snapshot handed to the draw entry point: the player,
/// both projectile collections, the invaders and the HUD numbers.  The
/// render worker assembles one per round under the appropriate locks.
#[derive(Clone, Debug)]
pub struct Frame {
    pub player: Player,
    pub invaders: Vec<Entity>,
    pub player_shots: Vec<Entity>,
    pub invader_shots: Vec<Entity>,
    pub score: u32,
    pub phase: GamePhase,
    pub mode: GameMode,
    pub field: Field,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for the current phase.
pub fn render<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match frame.phase {
        GamePhase::Running => draw_playfield(out, frame)?,
        GamePhase::Paused => draw_paused(out, frame.field)?,
        GamePhase::Lost => draw_defeat(out, frame)?,
        GamePhase::Won => draw_victory(out, frame)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, (frame.field.height - 1).max(0) as u16))?;
    out.flush()?;
    Ok(())
}

fn draw_playfield<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    draw_border(out, frame.field)?;
    draw_backdrop(out, frame.field)?;
    draw_separator(out, frame.field)?;

    for invader in frame.invaders.iter().filter(|i| i.active) {
        draw_entity(out, invader, frame.field)?;
    }
    for shot in &frame.player_shots {
        draw_entity(out, shot, frame.field)?;
    }
    for shot in &frame.invader_shots {
        draw_entity(out, shot, frame.field)?;
    }
    draw_entity(out, &frame.player.entity, frame.field)?;

    draw_hud(out, frame)
}

// ── Field furniture ───────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, field: Field) -> std::io::Result<()> {
    let w = field.width.max(2) as usize;
    let h = field.height.max(2) as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w - 2))))?;

    out.queue(cursor::MoveTo(0, h - 1))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w - 2))))?;

    for row in 1..h - 1 {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo((w - 1) as u16, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_backdrop<W: Write>(out: &mut W, field: Field) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STARS))?;
    for &(x, y) in STARS.iter() {
        if x < field.width - 1 && y < field.invader_floor() {
            out.queue(cursor::MoveTo(x as u16, y as u16))?;
            out.queue(Print("."))?;
        }
    }
    Ok(())
}

/// Line between the play area and the HUD strip.
fn draw_separator<W: Write>(out: &mut W, field: Field) -> std::io::Result<()> {
    let row = field.height - 5;
    if row < 1 {
        return Ok(());
    }
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(1, row as u16))?;
    out.queue(Print("─".repeat(field.width.max(2) as usize - 2)))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(out: &mut W, entity: &Entity, field: Field) -> std::io::Result<()> {
    if !entity.active {
        return Ok(());
    }
    // Skip anything outside the bordered area rather than wrap
    if entity.x < 1 || entity.x >= field.width - 1 || entity.y < 1 || entity.y >= field.height - 1 {
        return Ok(());
    }
    out.queue(style::SetForegroundColor(tint_color(entity.tint)))?;
    out.queue(cursor::MoveTo(entity.x as u16, entity.y as u16))?;
    out.queue(Print(entity.glyph))?;
    Ok(())
}

// ── HUD strip ─────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let row = (frame.field.height - 4).max(0) as u16;

    out.queue(cursor::MoveTo(2, row))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("SCORE: {:>6}", frame.score)))?;

    out.queue(cursor::MoveTo(2, row + 1))?;
    out.queue(Print("LIVES: "))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print("* ".repeat(frame.player.lives as usize)))?;

    let mode_text = format!("MODE: {}", frame.mode.number());
    let mx = (frame.field.width - mode_text.len() as i32 - 2).max(0) as u16;
    out.queue(cursor::MoveTo(mx, row))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(mode_text))?;

    let hint = "A/D:Move  W:Fire  P:Pause  Q:Quit";
    let hx = (frame.field.width - hint.len() as i32 - 2).max(0) as u16;
    out.queue(cursor::MoveTo(hx, row + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    Ok(())
}

// ── Overlay screens ───────────────────────────────────────────────────────────

fn draw_centered_lines<W: Write>(
    out: &mut W,
    field: Field,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let cx = (field.width / 2).max(0) as u16;
    let start = ((field.height / 2) - lines.len() as i32 / 2).max(0) as u16;

    for (i, (text, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

fn draw_paused<W: Write>(out: &mut W, field: Field) -> std::io::Result<()> {
    let lines = vec![
        ("╔══════════════════╗".to_string(), Color::Cyan),
        ("║      PAUSED      ║".to_string(), Color::Cyan),
        ("╚══════════════════╝".to_string(), Color::Cyan),
        (String::new(), Color::White),
        ("P - Resume   Q - Quit".to_string(), Color::White),
    ];
    draw_centered_lines(out, field, &lines)
}

fn draw_defeat<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let lines = vec![
        ("╔══════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER    ║".to_string(), Color::Red),
        ("╚══════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {}", frame.score), C_HUD),
        (String::new(), Color::White),
        ("R - Retry   Q - Quit".to_string(), Color::White),
    ];
    draw_centered_lines(out, frame.field, &lines)
}

fn draw_victory<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let lines = vec![
        ("╔══════════════════╗".to_string(), Color::Green),
        ("║     VICTORY!     ║".to_string(), Color::Green),
        ("╚══════════════════╝".to_string(), Color::Green),
        ("Earth is safe again.".to_string(), Color::White),
        (format!("Final Score: {}", frame.score), C_HUD),
        (String::new(), Color::White),
        ("R - Play Again   Q - Quit".to_string(), Color::White),
    ];
    draw_centered_lines(out, frame.field, &lines)
}
