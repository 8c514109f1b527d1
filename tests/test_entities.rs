use space_invaders::entities::*;

#[test]
fn enums_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(GamePhase::Running, GamePhase::Running);
    assert_ne!(GamePhase::Running, GamePhase::Paused);
    assert_ne!(GamePhase::Lost, GamePhase::Won);
    assert_eq!(GameMode::Classic, GameMode::Classic);
    assert_ne!(GameMode::Classic, GameMode::Swarm);
    assert_eq!(Tint::Invader, Tint::Invader);
    assert_ne!(Tint::PlayerShot, Tint::InvaderShot);

    // Clone must produce an equal value
    let tint = Tint::Player;
    assert_eq!(tint.clone(), Tint::Player);
}

#[test]
fn entity_starts_active() {
    let e = Entity::new(4, 7, 'W', Tint::Invader);
    assert!(e.active);
    assert_eq!((e.x, e.y), (4, 7));
    assert_eq!(e.glyph, 'W');
    assert_eq!(e.tint, Tint::Invader);
}

#[test]
fn player_spawns_centered_with_three_lives() {
    let p = Player::spawn(Field::new(40, 24));
    assert_eq!(p.entity.x, 20); // width / 2
    assert_eq!(p.entity.y, 21); // height - 3
    assert_eq!(p.lives, 3);
    assert!(p.entity.active);
    assert_eq!(p.entity.glyph, '*');
}

#[test]
fn mode_tables() {
    assert_eq!(GameMode::Classic.invader_count(), 40);
    assert_eq!(GameMode::Classic.group_size(), 8);
    assert_eq!(GameMode::Classic.number(), 1);
    assert_eq!(GameMode::Swarm.invader_count(), 50);
    assert_eq!(GameMode::Swarm.group_size(), 10);
    assert_eq!(GameMode::Swarm.number(), 2);
}

#[test]
fn field_bounds() {
    let f = Field::new(40, 24);
    assert_eq!(f.player_min_x(), 1);
    assert_eq!(f.player_max_x(), 37); // width - 3
    assert_eq!(f.invader_floor(), 18); // height - 6
}
