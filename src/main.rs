use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver};
use crossterm::{
    cursor,
    event::{self, Event},
    terminal, ExecutableCommand,
};

use space_invaders::engine::Engine;
use space_invaders::entities::{Field, GameMode};
use space_invaders::menu::{self, MenuChoice};

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".space_invaders_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    let _ = std::fs::write(high_score_path(), score.to_string());
}

// ── One game session ──────────────────────────────────────────────────────────

/// Start the engine for `mode` and wait for the session to end (the
/// input worker clears the running flag on Q/Esc).  Returns the final
/// score.
fn play(mode: GameMode, events: &Receiver<Event>) -> io::Result<u32> {
    let (width, height) = terminal::size()?;
    let mut engine = Engine::new(Field::new(width as i32, height as i32));

    engine.start(mode, events.clone(), Box::new(stdout()))?;
    while engine.is_running() {
        thread::sleep(Duration::from_millis(100));
    }

    let score = engine.score();
    engine.stop();
    Ok(score)
}

// ── Session loop ──────────────────────────────────────────────────────────────

fn run<W: Write>(out: &mut W, events: &Receiver<Event>) -> io::Result<()> {
    let mut high_score = load_high_score();

    loop {
        match menu::main_menu(out, events, high_score)? {
            MenuChoice::Start(mode) => {
                let score = play(mode, events)?;
                if score > high_score {
                    high_score = score;
                    save_high_score(high_score);
                }
            }
            MenuChoice::Instructions => menu::instructions(out, events)?,
            MenuChoice::HighScores => menu::high_scores(out, events, high_score)?,
            MenuChoice::Quit => break,
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread to blocking event reads, feeding a single-slot
    // channel.  Menus read it blocking; the engine's input worker drains
    // at most one event per round.
    let (tx, rx) = bounded::<Event>(1);
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
