/// The tick coordinator: owns the shared store and lock set, spawns and
/// joins the ten workers, and exposes the narrow command surface the
/// session shell drives (`start`, `stop`, `pause`, `resume`, `reset`).

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use crossterm::event::Event;

use crate::entities::{Field, GameMode, GamePhase};
use crate::locks::LockSet;
use crate::state::StateRegion;
use crate::workers;

/// Everything the ten workers share: the lock set (which owns the store)
/// and the cooperative running flag.  Workers observe the flag at the
/// top of their loop; nothing cancels them preemptively.
pub struct Shared {
    pub locks: LockSet,
    pub running: AtomicBool,
}

impl Shared {
    pub fn new(mode: GameMode, field: Field) -> Self {
        Shared {
            locks: LockSet::new(workers::WORKER_COUNT, mode, field),
            running: AtomicBool::new(false),
        }
    }

    /// Current phase, read under the state lock.
    pub fn phase(&self) -> GamePhase {
        self.locks.state.lock().phase
    }

    /// Re-seed the store for a fresh round of the current mode and
    /// return the phase to Running.  Locks are taken in the fixed
    /// entity → state → score order.
    pub fn reset_round(&self) {
        let mut entities = self.locks.entity.lock();
        let mut state = self.locks.state.lock();
        let mut score = self.locks.score.lock();

        entities.reseed(state.mode);
        score.score = 0;
        state.phase = GamePhase::Running;
        log::info!("round reset (mode {})", state.mode.number());
    }
}

/// Coordinator for one engine instance.  Dropping a running engine stops
/// it.
pub struct Engine {
    shared: Arc<Shared>,
    handles: Vec<JoinHandle<()>>,
}

impl Engine {
    /// Build the store and lock set for `field`.  No worker exists until
    /// [`Engine::start`].
    pub fn new(field: Field) -> Self {
        Engine {
            shared: Arc::new(Shared::new(GameMode::Classic, field)),
            handles: Vec::new(),
        }
    }

    /// Seed the store for `mode` and spawn the ten workers.  `events`
    /// feeds the input handler; `out` is the writer the renderer draws
    /// to.  A thread-spawn failure aborts the start: the running flag is
    /// cleared again and the error propagated (a short-handed barrier
    /// could never complete a rendezvous, so there is no partial mode).
    pub fn start(
        &mut self,
        mode: GameMode,
        events: Receiver<Event>,
        out: Box<dyn Write + Send>,
    ) -> io::Result<()> {
        if self.is_running() {
            return Ok(());
        }

        {
            let mut entities = self.shared.locks.entity.lock();
            let mut state = self.shared.locks.state.lock();
            let mut score = self.shared.locks.score.lock();
            entities.reseed(mode);
            score.score = 0;
            *state = StateRegion::new(mode);
        }

        self.shared.running.store(true, Ordering::Release);
        match workers::spawn_all(&self.shared, events, out) {
            Ok(handles) => {
                log::info!("engine started: mode {}, {} workers", mode.number(), handles.len());
                self.handles = handles;
                Ok(())
            }
            Err(err) => {
                self.shared.running.store(false, Ordering::Release);
                Err(err)
            }
        }
    }

    /// Clear the running flag and join every worker.  Each worker
    /// finishes one more full round (phase, barrier, sleep) before it
    /// observes the flag, so shutdown latency is bounded by the slowest
    /// worker's round, not instantaneous.
    pub fn stop(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        self.shared.running.store(false, Ordering::Release);
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                log::error!("worker panicked during shutdown");
            }
        }
        log::info!("engine stopped");
    }

    /// Running → Paused.  A no-op in any other phase, so repeated calls
    /// always land on exactly Paused or Running.
    pub fn pause(&self) {
        let mut state = self.shared.locks.state.lock();
        if state.phase == GamePhase::Running {
            state.phase = GamePhase::Paused;
        }
    }

    /// Paused → Running.  A no-op in any other phase.
    pub fn resume(&self) {
        let mut state = self.shared.locks.state.lock();
        if state.phase == GamePhase::Paused {
            state.phase = GamePhase::Running;
        }
    }

    /// Re-seed the current mode and return to Running.
    pub fn reset(&self) {
        self.shared.reset_round();
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> GamePhase {
        self.shared.phase()
    }

    /// Force a phase under the state lock.  `pause`/`resume` are the
    /// usual entry points; this is the raw accessor for the session
    /// shell.
    pub fn set_phase(&self, phase: GamePhase) {
        self.shared.locks.state.lock().phase = phase;
    }

    /// Current score, read under the score lock.
    pub fn score(&self) -> u32 {
        self.shared.locks.score.lock().score
    }

    /// Read access to the shared store for observers (the session shell
    /// and tests); all region discipline still applies.
    pub fn shared(&self) -> &Arc<Shared> {
        &self.shared
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}
