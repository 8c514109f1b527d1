/// The lock set: four mutual-exclusion regions, two action semaphores
/// and the per-round rendezvous barrier.
///
/// Lock ordering — whenever two region locks are held together they must
/// be acquired as **entity before state, state before score**.  Every
/// multi-lock site in this crate follows that order; breaking it is the
/// one deadlock hazard in the design.

use std::sync::Barrier;

use parking_lot::{Condvar, Mutex};

use crate::entities::{Field, GameMode};
use crate::state::{EntityRegion, ScoreRegion, StateRegion};

// ── Counting semaphore ────────────────────────────────────────────────────────

/// Counting semaphore on a `parking_lot` mutex + condvar.
///
/// The player-action and invader-action phases each hold a single-permit
/// semaphore across their critical section, serializing a phase against
/// re-entrant runs of the same role.
pub struct Semaphore {
    permits: Mutex<u32>,
    available: Condvar,
}

impl Semaphore {
    pub fn new(permits: u32) -> Self {
        Semaphore {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Block until a permit is free, then take it.  The permit is
    /// returned when the guard drops.
    pub fn acquire(&self) -> SemaphorePermit<'_> {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.available.wait(&mut permits);
        }
        *permits -= 1;
        SemaphorePermit { sem: self }
    }

    /// Currently free permits.  Test/diagnostic accessor.
    pub fn available_permits(&self) -> u32 {
        *self.permits.lock()
    }

    fn release(&self) {
        *self.permits.lock() += 1;
        self.available.notify_one();
    }
}

/// RAII permit handed out by [`Semaphore::acquire`].
pub struct SemaphorePermit<'a> {
    sem: &'a Semaphore,
}

impl Drop for SemaphorePermit<'_> {
    fn drop(&mut self) {
        self.sem.release();
    }
}

// ── Lock set ──────────────────────────────────────────────────────────────────

/// The four lockable regions (each mutex owns its region's data), the
/// two phase semaphores and the round barrier.
pub struct LockSet {
    pub entity: Mutex<EntityRegion>,
    pub score: Mutex<ScoreRegion>,
    pub state: Mutex<StateRegion>,
    /// Guards the act of drawing; the render worker holds this while it
    /// snapshots the store and writes the frame out.
    pub render: Mutex<()>,
    pub player_action: Semaphore,
    pub invader_action: Semaphore,
    /// Rendezvous point every worker reaches once per round.
    pub round_barrier: Barrier,
}

impl LockSet {
    /// Build the lock set with a freshly seeded store.  `parties` is the
    /// barrier arity and must equal the number of spawned workers.
    pub fn new(parties: usize, mode: GameMode, field: Field) -> Self {
        LockSet {
            entity: Mutex::new(EntityRegion::seeded(mode, field)),
            score: Mutex::new(ScoreRegion::default()),
            state: Mutex::new(StateRegion::new(mode)),
            render: Mutex::new(()),
            player_action: Semaphore::new(1),
            invader_action: Semaphore::new(1),
            round_barrier: Barrier::new(parties),
        }
    }
}
