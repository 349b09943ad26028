//! Game state and core simulation types
//!
//! One `GameState` is one run: it is created fresh when a run starts and
//! dropped when it ends. Nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::background::Background;
use super::entities::Entities;
use super::rect::{Bounded, Rect};
use super::timer::{Scheduler, Timer};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; terminal
    GameOver(GameOverReason),
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Ship collided with a meteoroid
    PlayerHit,
    /// Player left to the menu
    ReturnedToMenu,
}

/// Notable things that happened during a tick, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    MeteoroidSpawned { id: u32, y: f32 },
    BulletFired { id: u32 },
    MeteoroidDestroyed { id: u32 },
    DifficultyIncreased { meteoroid_speed: f32, spawn_interval_ms: u64 },
    PlayerHit,
    ReturnedToMenu,
}

/// The single direction the ship moves in this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Movement {
    #[default]
    Idle,
    Left,
    Right,
    Up,
    Down,
}

impl Movement {
    /// Resolve held keys to one direction. Keys are checked left, right, up,
    /// down and the last held one wins, so there is no diagonal movement.
    pub fn resolve(left: bool, right: bool, up: bool, down: bool) -> Self {
        let mut movement = Movement::Idle;
        if left {
            movement = Movement::Left;
        }
        if right {
            movement = Movement::Right;
        }
        if up {
            movement = Movement::Up;
        }
        if down {
            movement = Movement::Down;
        }
        movement
    }

    /// Unit step in window coordinates
    pub fn direction(self) -> Vec2 {
        match self {
            Movement::Idle => Vec2::ZERO,
            Movement::Left => Vec2::NEG_X,
            Movement::Right => Vec2::X,
            Movement::Up => Vec2::NEG_Y,
            Movement::Down => Vec2::Y,
        }
    }

    /// Flying forward or backward lights the big exhaust
    pub fn is_boosting(self) -> bool {
        matches!(self, Movement::Left | Movement::Right)
    }
}

/// Exhaust flicker counters. Boost and idle sets cycle independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exhaust {
    pub boost_frame: u8,
    pub idle_frame: u8,
    pub boosting: bool,
}

impl Exhaust {
    /// Step the active frame set
    pub fn advance(&mut self, boosting: bool) {
        self.boosting = boosting;
        if boosting {
            self.boost_frame = (self.boost_frame + 1) % EXHAUST_FRAMES;
        } else {
            self.idle_frame = (self.idle_frame + 1) % EXHAUST_FRAMES;
        }
    }

    /// Frame to draw for the current set
    pub fn frame(&self) -> u8 {
        if self.boosting {
            self.boost_frame
        } else {
            self.idle_frame
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub movement: Movement,
    pub exhaust: Exhaust,
}

impl Default for Player {
    fn default() -> Self {
        Self::at(PLAYER_START_X, PLAYER_START_Y)
    }
}

impl Player {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            movement: Movement::Idle,
            exhaust: Exhaust::default(),
        }
    }

    /// Move one step in `movement` and clamp each axis to the window
    pub fn steer(&mut self, movement: Movement, speed: f32) {
        self.movement = movement;
        let pos = self.rect.pos + movement.direction() * speed;
        self.rect.pos = pos.clamp(
            Vec2::ZERO,
            Vec2::new(WINDOW_WIDTH - PLAYER_EDGE_MARGIN, WINDOW_HEIGHT - PLAYER_EDGE_MARGIN),
        );
    }

    /// Where a new bullet appears
    pub fn muzzle(&self) -> Vec2 {
        self.rect.pos + Vec2::new(BULLET_OFFSET_X, BULLET_OFFSET_Y)
    }

    /// Step the exhaust animation for the current movement
    pub fn animate(&mut self) {
        self.exhaust.advance(self.movement.is_boosting());
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// A bullet flying right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub id: u32,
    pub rect: Rect,
}

impl Bullet {
    pub fn new(id: u32, muzzle: Vec2) -> Self {
        Self {
            id,
            rect: Rect::new(muzzle.x, muzzle.y, BULLET_WIDTH, BULLET_HEIGHT),
        }
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// A meteoroid flying left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meteoroid {
    pub id: u32,
    pub rect: Rect,
    /// 0 while intact, then the explosion animation frame
    pub explosion_frame: u8,
}

impl Meteoroid {
    /// New intact meteoroid just past the right edge
    pub fn new(id: u32, y: f32) -> Self {
        Self {
            id,
            rect: Rect::new(WINDOW_WIDTH, y, METEOROID_WIDTH, METEOROID_HEIGHT),
            explosion_frame: 0,
        }
    }

    pub fn is_exploding(&self) -> bool {
        self.explosion_frame > 0
    }
}

impl Bounded for Meteoroid {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for the spawn RNG
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Never decreases
    pub score: u64,
    /// Frames simulated this run
    pub frame: u64,
    pub player: Player,
    pub entities: Entities,
    pub scheduler: Scheduler,
    pub shoot_cooldown: Timer,
    pub background: Background,
    /// Events from the most recent ticks, oldest first
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a run at clock time `now_ms`
    pub fn new(seed: u64, tuning: Tuning, now_ms: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            scheduler: Scheduler::new(&tuning, now_ms),
            shoot_cooldown: Timer::new(tuning.shoot_cooldown_ms, now_ms),
            tuning,
            phase: GamePhase::Running,
            score: 0,
            frame: 0,
            player: Player::default(),
            entities: Entities::default(),
            background: Background::default(),
            events: Vec::new(),
        }
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
