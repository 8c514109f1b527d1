/// Menu screens — main menu, instructions and high scores.
///
/// These run on the main thread while the engine is stopped, reading
/// blocking from the shared event channel.

use std::io::Write;

use crossbeam_channel::Receiver;
use crossterm::{
    cursor,
    event::{Event, KeyCode, KeyEvent, KeyEventKind},
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::GameMode;

/// What the player picked from the main menu.
pub enum MenuChoice {
    Start(GameMode),
    Instructions,
    HighScores,
    Quit,
}

fn centered<W: Write>(out: &mut W, width: u16, row: u16, text: &str) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Block on the channel until any key press (or the reader thread dies).
fn wait_any_key(events: &Receiver<Event>) {
    loop {
        match events.recv() {
            Ok(Event::Key(KeyEvent { kind: KeyEventKind::Press, .. })) => return,
            Ok(_) => {}
            Err(_) => return,
        }
    }
}

// ── Main menu ─────────────────────────────────────────────────────────────────

pub fn main_menu<W: Write>(
    out: &mut W,
    events: &Receiver<Event>,
    high_score: u32,
) -> std::io::Result<MenuChoice> {
    // Drop anything still queued from the last session so a stale key
    // can't select an option.
    while events.try_recv().is_ok() {}

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cy = height / 2;

    out.queue(style::SetForegroundColor(Color::Magenta))?;
    centered(out, width, cy.saturating_sub(8), "★  SPACE  INVADERS  ★")?;

    if high_score > 0 {
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        centered(out, width, cy.saturating_sub(6), &format!("Best Score: {high_score}"))?;
    }

    let options: &[(&str, &str, Color)] = &[
        ("1", "Start — Mode 1 (40 invaders)", Color::Green),
        ("2", "Start — Mode 2 (50 invaders)", Color::Yellow),
        ("3", "Instructions", Color::White),
        ("4", "High Scores", Color::White),
        ("5", "Quit", Color::DarkGrey),
    ];

    for (i, (key, label, color)) in options.iter().enumerate() {
        let row = cy.saturating_sub(3) + i as u16;
        out.queue(style::SetForegroundColor(*color))?;
        centered(out, width, row, &format!("[{key}] {label}"))?;
    }

    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    centered(out, width, cy + 4, "Press a number key to choose")?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        match events.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Char('1') => return Ok(MenuChoice::Start(GameMode::Classic)),
                KeyCode::Char('2') => return Ok(MenuChoice::Start(GameMode::Swarm)),
                KeyCode::Char('3') => return Ok(MenuChoice::Instructions),
                KeyCode::Char('4') => return Ok(MenuChoice::HighScores),
                KeyCode::Char('5') | KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuChoice::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            // Reader thread gone — nothing left to select with.
            Err(_) => return Ok(MenuChoice::Quit),
        }
    }
}

// ── Instructions ──────────────────────────────────────────────────────────────

pub fn instructions<W: Write>(out: &mut W, events: &Receiver<Event>) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, _) = terminal::size()?;

    let lines: &[(&str, Color)] = &[
        ("SPACE INVADERS — INSTRUCTIONS", Color::Cyan),
        ("", Color::White),
        ("Destroy the whole formation before it reaches the ground,", Color::White),
        ("and keep out of the way of enemy fire.", Color::White),
        ("", Color::White),
        ("A / ← : move left        D / → : move right", Color::Green),
        ("W / Space : fire (3 shots in flight max)", Color::Green),
        ("P : pause / resume       Q / Esc : quit", Color::Green),
        ("R : restart after a game ends", Color::Green),
        ("", Color::White),
        ("You:  *      Invaders:  W @ ^", Color::Yellow),
        ("Your shots:  ^      Their shots:  v", Color::Yellow),
        ("", Color::White),
        ("Every invader is worth 10 points.", Color::White),
        ("Mode 1: 40 invaders in groups of 8.", Color::White),
        ("Mode 2: 50 invaders in groups of 10.", Color::White),
        ("", Color::White),
        ("Good luck, commander!", Color::Magenta),
        ("", Color::White),
        ("Press any key to return to the menu...", Color::DarkGrey),
    ];

    for (i, (text, color)) in lines.iter().enumerate() {
        out.queue(style::SetForegroundColor(*color))?;
        centered(out, width, 2 + i as u16, text)?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    wait_any_key(events);
    Ok(())
}

// ── High scores ───────────────────────────────────────────────────────────────

pub fn high_scores<W: Write>(
    out: &mut W,
    events: &Receiver<Event>,
    best: u32,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cy = height / 2;

    out.queue(style::SetForegroundColor(Color::Cyan))?;
    centered(out, width, cy.saturating_sub(3), "HIGH SCORES")?;

    out.queue(style::SetForegroundColor(Color::Yellow))?;
    let best_line = if best > 0 {
        format!("Best score so far: {best}")
    } else {
        "No games played yet.".to_string()
    };
    centered(out, width, cy.saturating_sub(1), &best_line)?;

    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    centered(out, width, cy + 3, "Press any key to return to the menu...")?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    wait_any_key(events);
    Ok(())
}
