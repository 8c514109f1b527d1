/// Per-role phase logic.
///
/// Every function here does one worker's round of work on the region
/// structs it is handed — no locks, no threads, no I/O.  The workers
/// module wraps these in the required lock acquisitions, which keeps the
/// gameplay rules testable without spinning up the engine.  All
/// randomness comes through an injected RNG handle (seeded in tests).

use rand::Rng;

use crate::entities::{Entity, GamePhase, Tint};
use crate::state::{EntityRegion, ScoreRegion};

/// At most this many player shots may be in flight at once.
pub const PLAYER_SHOT_CAP: usize = 3;

/// Points per destroyed invader.
pub const KILL_SCORE: u32 = 10;

// ── Player movement ───────────────────────────────────────────────────────────

/// Clamp the player's column to the field bounds.  The input handler
/// writes raw positions; this phase re-validates them every round.
pub fn clamp_player(entities: &mut EntityRegion) {
    let (min_x, max_x) = (entities.field.player_min_x(), entities.field.player_max_x());
    let ship = &mut entities.player.entity;
    if ship.x < min_x {
        ship.x = min_x;
    }
    if ship.x > max_x {
        ship.x = max_x;
    }
}

// ── Player shooting ───────────────────────────────────────────────────────────

/// Turn a pending fire intent into a projectile, capped at
/// [`PLAYER_SHOT_CAP`] live shots.  An intent blocked by the cap stays
/// pending and is retried next round once a slot frees up.
pub fn fire_pending_shot(entities: &mut EntityRegion) {
    if !entities.fire_requested {
        return;
    }
    if entities.live_player_shots() >= PLAYER_SHOT_CAP {
        return;
    }
    let ship = &entities.player.entity;
    let shot = Entity::new(ship.x, ship.y - 1, '^', Tint::PlayerShot);
    entities.player_shots.push(shot);
    entities.fire_requested = false;
}

// ── Invader movement ──────────────────────────────────────────────────────────

/// March the whole active formation one step in the current direction.
/// When any active invader touches either edge the direction flips and
/// every active invader drops exactly one row.
pub fn step_formation(entities: &mut EntityRegion) {
    let dir = entities.formation_dir;
    let right_edge = entities.field.width - 2;

    let mut at_edge = false;
    for invader in entities.invaders.iter_mut().filter(|i| i.active) {
        invader.x += dir;
        if invader.x <= 1 || invader.x >= right_edge {
            at_edge = true;
        }
    }

    if at_edge {
        entities.formation_dir = -dir;
        for invader in entities.invaders.iter_mut().filter(|i| i.active) {
            invader.y += 1;
        }
    }
}

// ── Invader shooting ──────────────────────────────────────────────────────────

/// Spawn one downward shot from a uniformly chosen active invader.
/// Short-circuits when no invader is left to shoot.
pub fn fire_invader_volley(entities: &mut EntityRegion, rng: &mut impl Rng) {
    let active: Vec<usize> = entities
        .invaders
        .iter()
        .enumerate()
        .filter(|(_, i)| i.active)
        .map(|(idx, _)| idx)
        .collect();

    if active.is_empty() {
        return;
    }

    let shooter = &entities.invaders[active[rng.gen_range(0..active.len())]];
    let shot = Entity::new(shooter.x, shooter.y + 1, 'v', Tint::InvaderShot);
    entities.invader_shots.push(shot);
}

// ── Projectile integration ────────────────────────────────────────────────────

/// Advance every projectile one row and drop the ones leaving the
/// field.  Leavers are deactivated first so removal always follows an
/// observed `active == false`.
pub fn integrate_shots(entities: &mut EntityRegion) {
    let bottom = entities.field.height - 1;

    for shot in &mut entities.player_shots {
        shot.y -= 1;
        if shot.y < 1 {
            shot.active = false;
        }
    }
    for shot in &mut entities.invader_shots {
        shot.y += 1;
        if shot.y >= bottom {
            shot.active = false;
        }
    }

    entities.player_shots.retain(|s| s.active);
    entities.invader_shots.retain(|s| s.active);
}

// ── Collision detection ───────────────────────────────────────────────────────

/// Resolve this round's collisions, then compact both projectile
/// collections.
///
/// Player shot × invader on the same cell: both deactivate, +10 score.
/// Invader shot × player on the same cell: shot deactivates, one life
/// lost.  Destroyed invaders stay in the formation as inactive members;
/// only projectiles are compacted away.
pub fn resolve_collisions(entities: &mut EntityRegion, score: &mut ScoreRegion) {
    let EntityRegion { player, invaders, player_shots, invader_shots, .. } = entities;

    for shot in player_shots.iter_mut() {
        for invader in invaders.iter_mut() {
            if shot.active && invader.active && shot.x == invader.x && shot.y == invader.y {
                shot.active = false;
                invader.active = false;
                score.score += KILL_SCORE;
            }
        }
    }

    for shot in invader_shots.iter_mut() {
        if shot.active
            && player.entity.active
            && shot.x == player.entity.x
            && shot.y == player.entity.y
        {
            shot.active = false;
            player.lives = player.lives.saturating_sub(1);
        }
    }

    player_shots.retain(|s| s.active);
    invader_shots.retain(|s| s.active);
}

// ── Game-state evaluation ─────────────────────────────────────────────────────

/// Decide whether the round just played ended the game.  Defeat is
/// checked before victory: a player out of lives loses even if the last
/// invader died the same round.
pub fn evaluate(entities: &EntityRegion) -> Option<GamePhase> {
    if entities.player.lives == 0 {
        return Some(GamePhase::Lost);
    }

    let floor = entities.field.invader_floor();
    if entities.active_invaders().any(|i| i.y >= floor) {
        return Some(GamePhase::Lost);
    }

    if entities.active_invaders().next().is_none() {
        return Some(GamePhase::Won);
    }

    None
}
