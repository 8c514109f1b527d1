use space_invaders::entities::*;
use space_invaders::phases::*;
use space_invaders::state::{EntityRegion, ScoreRegion};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn region() -> EntityRegion {
    EntityRegion::seeded(GameMode::Classic, Field::new(40, 24))
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── clamp_player ──────────────────────────────────────────────────────────────

#[test]
fn clamp_pulls_player_back_inside_both_edges() {
    let mut r = region();
    r.player.entity.x = 0;
    clamp_player(&mut r);
    assert_eq!(r.player.entity.x, 1);

    r.player.entity.x = 50;
    clamp_player(&mut r);
    assert_eq!(r.player.entity.x, 37); // width - 3
}

#[test]
fn clamp_leaves_in_bounds_position_alone() {
    let mut r = region();
    r.player.entity.x = 20;
    clamp_player(&mut r);
    assert_eq!(r.player.entity.x, 20);
}

// ── fire_pending_shot ─────────────────────────────────────────────────────────

#[test]
fn no_intent_no_shot() {
    let mut r = region();
    fire_pending_shot(&mut r);
    assert!(r.player_shots.is_empty());
}

#[test]
fn intent_spawns_shot_above_ship_and_clears() {
    let mut r = region();
    r.fire_requested = true;
    fire_pending_shot(&mut r);

    assert_eq!(r.player_shots.len(), 1);
    let shot = &r.player_shots[0];
    assert_eq!((shot.x, shot.y), (r.player.entity.x, r.player.entity.y - 1));
    assert_eq!(shot.glyph, '^');
    assert!(shot.active);
    assert!(!r.fire_requested);
}

#[test]
fn cap_rejects_fourth_shot_and_keeps_intent() {
    let mut r = region();
    for i in 0..PLAYER_SHOT_CAP {
        r.player_shots.push(Entity::new(10 + i as i32, 10, '^', Tint::PlayerShot));
    }
    r.fire_requested = true;
    fire_pending_shot(&mut r);

    assert_eq!(r.player_shots.len(), PLAYER_SHOT_CAP);
    // Blocked intent stays pending until a slot frees up
    assert!(r.fire_requested);
}

#[test]
fn inactive_shots_do_not_count_toward_the_cap() {
    let mut r = region();
    for i in 0..PLAYER_SHOT_CAP {
        let mut shot = Entity::new(10 + i as i32, 10, '^', Tint::PlayerShot);
        shot.active = false;
        r.player_shots.push(shot);
    }
    r.fire_requested = true;
    fire_pending_shot(&mut r);
    assert_eq!(r.live_player_shots(), 1);
}

// ── step_formation ────────────────────────────────────────────────────────────

#[test]
fn formation_marches_in_the_current_direction() {
    let mut r = region();
    let before: Vec<i32> = r.invaders.iter().map(|i| i.x).collect();
    step_formation(&mut r);
    for (invader, old_x) in r.invaders.iter().zip(before) {
        assert_eq!(invader.x, old_x + 1);
    }
    assert_eq!(r.formation_dir, 1); // nowhere near an edge yet
}

#[test]
fn edge_contact_flips_direction_and_drops_one_row() {
    let mut r = region();
    r.invaders.clear();
    r.invaders.push(Entity::new(37, 5, 'W', Tint::Invader)); // one step from the edge
    r.invaders.push(Entity::new(20, 7, '@', Tint::Invader));

    step_formation(&mut r);

    assert_eq!(r.formation_dir, -1);
    assert_eq!((r.invaders[0].x, r.invaders[0].y), (38, 6));
    assert_eq!((r.invaders[1].x, r.invaders[1].y), (21, 8));

    // Next step continues in the new direction without another drop
    step_formation(&mut r);
    assert_eq!((r.invaders[0].x, r.invaders[0].y), (37, 6));
    assert_eq!((r.invaders[1].x, r.invaders[1].y), (20, 8));
}

#[test]
fn left_edge_flips_back_rightwards() {
    let mut r = region();
    r.formation_dir = -1;
    r.invaders.clear();
    r.invaders.push(Entity::new(2, 5, 'W', Tint::Invader));

    step_formation(&mut r);
    assert_eq!(r.formation_dir, 1);
    assert_eq!((r.invaders[0].x, r.invaders[0].y), (1, 6));
}

#[test]
fn destroyed_invaders_neither_march_nor_drop() {
    let mut r = region();
    r.invaders.clear();
    r.invaders.push(Entity::new(37, 5, 'W', Tint::Invader));
    let mut dead = Entity::new(10, 5, '@', Tint::Invader);
    dead.active = false;
    r.invaders.push(dead);

    step_formation(&mut r);
    assert_eq!((r.invaders[1].x, r.invaders[1].y), (10, 5));
}

// ── fire_invader_volley ───────────────────────────────────────────────────────

#[test]
fn volley_spawns_below_an_active_invader() {
    let mut r = region();
    let mut rng = seeded_rng();
    fire_invader_volley(&mut r, &mut rng);

    assert_eq!(r.invader_shots.len(), 1);
    let shot = &r.invader_shots[0];
    assert_eq!(shot.glyph, 'v');
    assert!(r
        .invaders
        .iter()
        .any(|i| i.active && i.x == shot.x && i.y + 1 == shot.y));
}

#[test]
fn volley_short_circuits_with_no_active_invaders() {
    let mut r = region();
    for invader in &mut r.invaders {
        invader.active = false;
    }
    let mut rng = seeded_rng();
    fire_invader_volley(&mut r, &mut rng);
    assert!(r.invader_shots.is_empty());

    r.invaders.clear();
    fire_invader_volley(&mut r, &mut rng);
    assert!(r.invader_shots.is_empty());
}

#[test]
fn volley_never_picks_a_destroyed_invader() {
    let mut r = region();
    // Leave exactly one survivor
    for invader in r.invaders.iter_mut().skip(1) {
        invader.active = false;
    }
    let survivor = (r.invaders[0].x, r.invaders[0].y);

    let mut rng = seeded_rng();
    for _ in 0..10 {
        fire_invader_volley(&mut r, &mut rng);
    }
    assert!(r
        .invader_shots
        .iter()
        .all(|s| (s.x, s.y) == (survivor.0, survivor.1 + 1)));
}

// ── integrate_shots ───────────────────────────────────────────────────────────

#[test]
fn shots_advance_one_row_per_round() {
    let mut r = region();
    r.player_shots.push(Entity::new(10, 10, '^', Tint::PlayerShot));
    r.invader_shots.push(Entity::new(12, 10, 'v', Tint::InvaderShot));

    integrate_shots(&mut r);

    assert_eq!(r.player_shots[0].y, 9);
    assert_eq!(r.invader_shots[0].y, 11);
}

#[test]
fn shots_leaving_the_field_are_dropped() {
    let mut r = region();
    r.player_shots.push(Entity::new(10, 1, '^', Tint::PlayerShot)); // about to leave the top
    r.invader_shots.push(Entity::new(12, 22, 'v', Tint::InvaderShot)); // about to hit the bottom

    integrate_shots(&mut r);

    assert!(r.player_shots.is_empty());
    assert!(r.invader_shots.is_empty());
}

// ── resolve_collisions ────────────────────────────────────────────────────────

#[test]
fn shot_and_invader_on_same_cell_both_die_for_ten_points() {
    let mut r = region();
    let mut score = ScoreRegion::default();
    let target = (r.invaders[0].x, r.invaders[0].y);
    r.player_shots.push(Entity::new(target.0, target.1, '^', Tint::PlayerShot));

    resolve_collisions(&mut r, &mut score);

    assert_eq!(score.score, KILL_SCORE);
    assert!(!r.invaders[0].active); // stays in the formation, inactive
    assert_eq!(r.invaders.len(), 40);
    assert!(r.player_shots.is_empty()); // compacted away
}

#[test]
fn missed_shots_survive_collision_resolution() {
    let mut r = region();
    let mut score = ScoreRegion::default();
    r.player_shots.push(Entity::new(1, 20, '^', Tint::PlayerShot));

    resolve_collisions(&mut r, &mut score);

    assert_eq!(score.score, 0);
    assert_eq!(r.player_shots.len(), 1);
}

#[test]
fn invader_shot_on_player_costs_one_life() {
    let mut r = region();
    let mut score = ScoreRegion::default();
    let ship = (r.player.entity.x, r.player.entity.y);
    r.invader_shots.push(Entity::new(ship.0, ship.1, 'v', Tint::InvaderShot));

    resolve_collisions(&mut r, &mut score);

    assert_eq!(r.player.lives, 2);
    assert!(r.invader_shots.is_empty());
    assert_eq!(score.score, 0); // enemy hits never score
}

#[test]
fn lives_never_underflow() {
    let mut r = region();
    let mut score = ScoreRegion::default();
    r.player.lives = 0;
    let ship = (r.player.entity.x, r.player.entity.y);
    r.invader_shots.push(Entity::new(ship.0, ship.1, 'v', Tint::InvaderShot));

    resolve_collisions(&mut r, &mut score);
    assert_eq!(r.player.lives, 0);
}

#[test]
fn one_shot_kills_at_most_one_invader() {
    let mut r = region();
    let mut score = ScoreRegion::default();
    // Two invaders stacked on the same cell; one shot arrives
    r.invaders.clear();
    r.invaders.push(Entity::new(10, 5, 'W', Tint::Invader));
    r.invaders.push(Entity::new(10, 5, 'W', Tint::Invader));
    r.player_shots.push(Entity::new(10, 5, '^', Tint::PlayerShot));

    resolve_collisions(&mut r, &mut score);

    // The shot deactivates on the first hit and cannot kill again
    assert_eq!(score.score, KILL_SCORE);
    assert_eq!(r.invaders.iter().filter(|i| i.active).count(), 1);
}

// ── evaluate ──────────────────────────────────────────────────────────────────

#[test]
fn fresh_round_keeps_running() {
    assert_eq!(evaluate(&region()), None);
}

#[test]
fn zero_lives_means_lost() {
    let mut r = region();
    r.player.lives = 0;
    assert_eq!(evaluate(&r), Some(GamePhase::Lost));
}

#[test]
fn invader_reaching_the_floor_means_lost() {
    let mut r = region();
    r.invaders[0].y = r.field.invader_floor();
    assert_eq!(evaluate(&r), Some(GamePhase::Lost));
}

#[test]
fn destroyed_invader_at_the_floor_is_harmless() {
    let mut r = region();
    r.invaders[0].y = r.field.invader_floor();
    r.invaders[0].active = false;
    assert_eq!(evaluate(&r), None);
}

#[test]
fn empty_formation_means_won() {
    let mut r = region();
    for invader in &mut r.invaders {
        invader.active = false;
    }
    assert_eq!(evaluate(&r), Some(GamePhase::Won));
}

#[test]
fn defeat_outranks_victory() {
    let mut r = region();
    r.player.lives = 0;
    for invader in &mut r.invaders {
        invader.active = false;
    }
    assert_eq!(evaluate(&r), Some(GamePhase::Lost));
}
