/// The ten fixed worker roles and their loops.
///
/// Every worker runs the same skeleton: do one round of phase work under
/// the locks its role declares, rendezvous at the round barrier, sleep
/// its own cadence, repeat while the shared running flag holds.  Because
/// the barrier waits for all ten parties, a round lasts as long as its
/// slowest arrival — pacing is emergent, not a fixed-rate clock.
///
/// The gameplay rules themselves live in [`crate::phases`]; this module
/// only binds them to locks, cadence and the barrier.

use std::io::{self, Write};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Receiver;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::display::{self, Frame};
use crate::engine::Shared;
use crate::entities::GamePhase;
use crate::phases;

/// Barrier arity: one party per role below.
pub const WORKER_COUNT: usize = 10;

/// Post-barrier sleep for every gameplay worker.
const SIM_TICK: Duration = Duration::from_millis(16);

/// Post-barrier sleep for the renderer (~30 FPS).
const RENDER_TICK: Duration = Duration::from_millis(33);

/// The formation marches once every this many rounds.
const FORMATION_STEP_ROUNDS: u32 = 30;

/// An invader fires once every this many rounds.
const VOLLEY_ROUNDS: u32 = 60;

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Spawn all ten workers.  A spawn failure is fatal to the round: the
/// caller clears the running flag and tears the engine down, since a
/// short-handed barrier can never complete a rendezvous.
pub(crate) fn spawn_all(
    shared: &Arc<Shared>,
    events: Receiver<Event>,
    mut out: Box<dyn Write + Send>,
) -> io::Result<Vec<JoinHandle<()>>> {
    let mut workers = Vec::with_capacity(WORKER_COUNT);

    workers.push(spawn_role("input", shared, SIM_TICK, move |shared| {
        handle_input(shared, &events)
    })?);
    workers.push(spawn_role("player-move", shared, SIM_TICK, player_movement)?);
    workers.push(spawn_role("player-fire", shared, SIM_TICK, player_shooting)?);
    workers.push(spawn_role("invader-move", shared, SIM_TICK, {
        let mut rounds = 0u32;
        move |shared| invader_movement(shared, &mut rounds)
    })?);
    workers.push(spawn_role("invader-fire", shared, SIM_TICK, {
        let mut rounds = 0u32;
        move |shared| invader_shooting(shared, &mut rounds)
    })?);
    workers.push(spawn_role("integrate", shared, SIM_TICK, bullet_integration)?);
    workers.push(spawn_role("collide", shared, SIM_TICK, collision_detection)?);
    workers.push(spawn_role("score", shared, SIM_TICK, score_update)?);
    workers.push(spawn_role("evaluate", shared, SIM_TICK, game_state_evaluation)?);
    workers.push(spawn_role("render", shared, RENDER_TICK, move |shared| {
        render_frame(shared, &mut out)
    })?);

    Ok(workers)
}

/// One worker loop: phase work, barrier, sleep, repeat while running.
/// The running flag is only observed at the top of the loop, so shutdown
/// always costs one more full round.
fn spawn_role(
    name: &'static str,
    shared: &Arc<Shared>,
    tick: Duration,
    mut body: impl FnMut(&Shared) + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    let shared = Arc::clone(shared);
    thread::Builder::new().name(name.into()).spawn(move || {
        while shared.running.load(Ordering::Acquire) {
            body(&shared);
            shared.locks.round_barrier.wait();
            thread::sleep(tick);
        }
        log::debug!("worker {name} exited");
    })
}

// ── Role bodies ───────────────────────────────────────────────────────────────

/// Input handler: drain at most one key event per round and translate it
/// for the current phase.
fn handle_input(shared: &Shared, events: &Receiver<Event>) {
    let code = match events.try_recv() {
        Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => code,
        _ => return,
    };

    match shared.phase() {
        GamePhase::Running => match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                let mut entities = shared.locks.entity.lock();
                if entities.player.entity.x > entities.field.player_min_x() {
                    entities.player.entity.x -= 1;
                }
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                let mut entities = shared.locks.entity.lock();
                if entities.player.entity.x < entities.field.player_max_x() {
                    entities.player.entity.x += 1;
                }
            }
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(' ') => {
                shared.locks.entity.lock().fire_requested = true;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                // entity before state — the documented lock order
                let _entities = shared.locks.entity.lock();
                shared.locks.state.lock().phase = GamePhase::Paused;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                shared.running.store(false, Ordering::Release);
            }
            _ => {}
        },
        GamePhase::Paused => match code {
            KeyCode::Char('p') | KeyCode::Char('P') => {
                let _entities = shared.locks.entity.lock();
                shared.locks.state.lock().phase = GamePhase::Running;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                shared.running.store(false, Ordering::Release);
            }
            _ => {}
        },
        GamePhase::Lost | GamePhase::Won => match code {
            KeyCode::Char('r') | KeyCode::Char('R') => shared.reset_round(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                shared.running.store(false, Ordering::Release);
            }
            _ => {}
        },
    }
}

/// Player movement: re-validate the ship's column against the field
/// bounds.  Raw positions come straight from the input handler.
fn player_movement(shared: &Shared) {
    let _permit = shared.locks.player_action.acquire();
    if shared.phase() != GamePhase::Running {
        return;
    }
    let mut entities = shared.locks.entity.lock();
    phases::clamp_player(&mut entities);
}

/// Player shooting: consume a pending fire intent, respecting the
/// three-shot cap.
fn player_shooting(shared: &Shared) {
    if shared.phase() != GamePhase::Running {
        return;
    }
    let mut entities = shared.locks.entity.lock();
    phases::fire_pending_shot(&mut entities);
}

/// Invader movement: every 30th playing round, march the formation.
fn invader_movement(shared: &Shared, rounds: &mut u32) {
    let _permit = shared.locks.invader_action.acquire();
    if shared.phase() != GamePhase::Running {
        return;
    }
    *rounds += 1;
    if *rounds < FORMATION_STEP_ROUNDS {
        return;
    }
    *rounds = 0;
    let mut entities = shared.locks.entity.lock();
    phases::step_formation(&mut entities);
}

/// Invader shooting: every 60th playing round, one random active
/// invader fires downward.
fn invader_shooting(shared: &Shared, rounds: &mut u32) {
    if shared.phase() != GamePhase::Running {
        return;
    }
    *rounds += 1;
    if *rounds < VOLLEY_ROUNDS {
        return;
    }
    *rounds = 0;
    let mut entities = shared.locks.entity.lock();
    phases::fire_invader_volley(&mut entities, &mut rand::thread_rng());
}

/// Projectile integration: advance both collections, drop leavers.
fn bullet_integration(shared: &Shared) {
    if shared.phase() != GamePhase::Running {
        return;
    }
    let mut entities = shared.locks.entity.lock();
    phases::integrate_shots(&mut entities);
}

/// Collision detection: needs entity and score together — entity first,
/// per the lock order.
fn collision_detection(shared: &Shared) {
    if shared.phase() != GamePhase::Running {
        return;
    }
    let mut entities = shared.locks.entity.lock();
    let mut score = shared.locks.score.lock();
    phases::resolve_collisions(&mut entities, &mut score);
}

/// Score bookkeeping: reserved extension point (time bonuses, combos).
/// Currently read-only.
fn score_update(shared: &Shared) {
    let score = shared.locks.score.lock();
    log::trace!("score watcher: {}", score.score);
}

/// Game-state evaluation: the only writer of Lost/Won.  Holds entity and
/// state together — entity first, per the lock order.
fn game_state_evaluation(shared: &Shared) {
    let entities = shared.locks.entity.lock();
    let mut state = shared.locks.state.lock();
    if state.phase != GamePhase::Running {
        return;
    }
    if let Some(outcome) = phases::evaluate(&entities) {
        log::info!("round ended: {outcome:?}");
        state.phase = outcome;
    }
}

/// Renderer: snapshot the store under the render lock, then hand the
/// frame to the presentation layer.  A failed write is logged, never
/// fatal to the round.
fn render_frame(shared: &Shared, out: &mut Box<dyn Write + Send>) {
    let _guard = shared.locks.render.lock();
    let frame = capture_frame(shared);
    if let Err(err) = display::render(out, &frame) {
        log::error!("render write failed: {err}");
    }
}

/// Assemble a frame snapshot region by region (entity, then state, then
/// score — the fixed order).  Each region is internally consistent; the
/// frame as a whole is only as fresh as each region's last writer, which
/// is all the protocol guarantees.
fn capture_frame(shared: &Shared) -> Frame {
    let (player, invaders, player_shots, invader_shots, field) = {
        let entities = shared.locks.entity.lock();
        (
            entities.player.clone(),
            entities.invaders.clone(),
            entities.player_shots.clone(),
            entities.invader_shots.clone(),
            entities.field,
        )
    };
    let (phase, mode) = {
        let state = shared.locks.state.lock();
        (state.phase, state.mode)
    };
    let score = shared.locks.score.lock().score;

    Frame { player, invaders, player_shots, invader_shots, score, phase, mode, field }
}
