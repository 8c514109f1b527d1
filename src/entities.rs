/// All game entity types — pure data, no logic.

/// Semantic colour tag carried by every entity.  Mapping a tag to an
/// actual terminal colour happens in the display layer only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Player,
    Invader,
    PlayerShot,
    InvaderShot,
}

/// One on-screen object: a grid position, a display glyph and an
/// alive/dead flag.  `active == false` marks the entity as pending
/// removal; its owning collection drops it during compaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    pub active: bool,
    pub tint: Tint,
}

impl Entity {
    pub fn new(x: i32, y: i32, glyph: char, tint: Tint) -> Self {
        Entity { x, y, glyph, active: true, tint }
    }
}

/// The player's ship.  The score is *not* stored here — it lives in the
/// score region so the entity and score locks stay independent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub entity: Entity,
    pub lives: u32,
}

impl Player {
    /// Fresh ship centered near the bottom of `field` with 3 lives.
    pub fn spawn(field: Field) -> Self {
        Player {
            entity: Entity::new(field.width / 2, field.height - 3, '*', Tint::Player),
            lives: 3,
        }
    }
}

/// Invader count selected from the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    /// Mode 1 — 40 invaders in groups of 8.
    Classic,
    /// Mode 2 — 50 invaders in groups of 10.
    Swarm,
}

impl GameMode {
    pub fn invader_count(self) -> usize {
        match self {
            GameMode::Classic => 40,
            GameMode::Swarm => 50,
        }
    }

    pub fn group_size(self) -> usize {
        match self {
            GameMode::Classic => 8,
            GameMode::Swarm => 10,
        }
    }

    /// Menu / HUD number for the mode.
    pub fn number(self) -> u8 {
        match self {
            GameMode::Classic => 1,
            GameMode::Swarm => 2,
        }
    }
}

/// Overall game phase.  Only the game-state evaluator and the input
/// handler (Running↔Paused, reset) may write this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    Lost,
    Won,
}

/// Playing-field dimensions, captured from the terminal once at start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

impl Field {
    pub fn new(width: i32, height: i32) -> Self {
        Field { width, height }
    }

    /// Leftmost column the player may occupy.
    pub fn player_min_x(self) -> i32 {
        1
    }

    /// Rightmost column the player may occupy.
    pub fn player_max_x(self) -> i32 {
        self.width - 3
    }

    /// Row at which a descending invader loses the game.
    pub fn invader_floor(self) -> i32 {
        self.height - 6
    }
}
