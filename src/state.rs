/// The shared state store, split into the three lockable data regions.
///
/// Each struct here is plain data with no synchronization of its own;
/// all access goes through the matching mutex in [`crate::locks::LockSet`].

use crate::entities::{Entity, Field, GameMode, GamePhase, Player, Tint};

// ── Formation layout ──────────────────────────────────────────────────────────

const FORMATION_START_X: i32 = 5;
const FORMATION_START_Y: i32 = 3;
const FORMATION_COL_SPACING: i32 = 3;
const FORMATION_ROW_STEP: i32 = 2;

/// Glyph for an invader in formation group `group` — groups alternate
/// between three shapes for visual variety.
fn invader_glyph(group: usize) -> char {
    match group % 3 {
        0 => 'W',
        1 => '@',
        _ => '^',
    }
}

/// Seed the invader formation for `mode`: `groups` rows of `group_size`
/// invaders, first at (5, 3), columns 3 apart, rows 2 apart.  The layout
/// is fully determined by the mode, never by the terminal size.
pub fn formation(mode: GameMode) -> Vec<Entity> {
    let group_size = mode.group_size();
    let groups = mode.invader_count() / group_size;

    let mut invaders = Vec::with_capacity(mode.invader_count());
    for group in 0..groups {
        for col in 0..group_size {
            let x = FORMATION_START_X + (col as i32 * FORMATION_COL_SPACING);
            let y = FORMATION_START_Y + (group as i32 * FORMATION_ROW_STEP);
            invaders.push(Entity::new(x, y, invader_glyph(group), Tint::Invader));
        }
    }
    invaders
}

// ── Entity region ─────────────────────────────────────────────────────────────

/// Everything guarded by the entity lock: the player record, the three
/// entity collections, the pending fire intent and the formation's
/// current march direction.
#[derive(Clone, Debug)]
pub struct EntityRegion {
    pub player: Player,
    pub invaders: Vec<Entity>,
    pub player_shots: Vec<Entity>,
    pub invader_shots: Vec<Entity>,
    /// Set by the input handler, consumed by the player-shooting worker.
    pub fire_requested: bool,
    /// Formation march direction: +1 rightwards, -1 leftwards.
    pub formation_dir: i32,
    pub field: Field,
}

impl EntityRegion {
    pub fn seeded(mode: GameMode, field: Field) -> Self {
        EntityRegion {
            player: Player::spawn(field),
            invaders: formation(mode),
            player_shots: Vec::new(),
            invader_shots: Vec::new(),
            fire_requested: false,
            formation_dir: 1,
            field,
        }
    }

    /// Re-seed in place for a fresh round, keeping the field bounds.
    pub fn reseed(&mut self, mode: GameMode) {
        *self = EntityRegion::seeded(mode, self.field);
    }

    /// Player projectiles still in flight.
    pub fn live_player_shots(&self) -> usize {
        self.player_shots.iter().filter(|s| s.active).count()
    }

    /// Invaders not yet destroyed.
    pub fn active_invaders(&self) -> impl Iterator<Item = &Entity> {
        self.invaders.iter().filter(|i| i.active)
    }
}

// ── Score region ──────────────────────────────────────────────────────────────

/// Guarded by the score lock.  The score only moves during collision
/// resolution, +10 per destroyed invader.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreRegion {
    pub score: u32,
}

// ── State region ──────────────────────────────────────────────────────────────

/// Guarded by the state lock: the game phase plus the mode the current
/// round was seeded with (needed again on reset).
#[derive(Clone, Copy, Debug)]
pub struct StateRegion {
    pub phase: GamePhase,
    pub mode: GameMode,
}

impl StateRegion {
    pub fn new(mode: GameMode) -> Self {
        StateRegion { phase: GamePhase::Running, mode }
    }
}
