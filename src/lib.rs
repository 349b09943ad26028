//! Space Defenders - A side-scrolling pixel space shooter
//!
//! Core modules:
//! - `sim`: Frame-synchronous simulation (entities, collisions, difficulty)
//! - `renderer`: Draw-call abstraction and terminal backend
//! - `platform`: Clock and input sources
//! - `game`: Frame driver tying input, simulation and rendering together
//! - `highscores`: Score store and leaderboard
//! - `persistence`: Versioned JSON saves with backup rotation
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use game::{FrameDriver, RunOutcome};
pub use highscores::{FileScoreStore, HighScores, ScoreStore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Window dimensions (pixels)
    pub const WINDOW_WIDTH: f32 = 1280.0;
    pub const WINDOW_HEIGHT: f32 = 720.0;

    /// Player ship spawn point and hitbox
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = WINDOW_HEIGHT / 2.0;
    pub const PLAYER_WIDTH: f32 = 118.0;
    pub const PLAYER_HEIGHT: f32 = 75.0;
    /// The ship may travel up to this far short of the right/bottom edges
    pub const PLAYER_EDGE_MARGIN: f32 = 50.0;

    /// Bullets leave the ship's nose, offset from its top-left corner
    pub const BULLET_OFFSET_X: f32 = 140.0;
    pub const BULLET_OFFSET_Y: f32 = 30.0;
    pub const BULLET_WIDTH: f32 = 15.0;
    pub const BULLET_HEIGHT: f32 = 12.0;

    /// Meteoroid hitbox
    pub const METEOROID_WIDTH: f32 = 38.0;
    pub const METEOROID_HEIGHT: f32 = 33.0;
    /// Meteoroids spawn in `[METEOROID_MIN_Y, WINDOW_HEIGHT - METEOROID_MIN_Y]`
    pub const METEOROID_MIN_Y: f32 = 33.0;
    /// Meteoroid animation frames: frame 0 is intact, the rest are the explosion
    pub const METEOROID_FRAMES: u8 = 8;
    /// Last explosion frame; reaching it destroys the meteoroid
    pub const EXPLOSION_FINAL_FRAME: u8 = METEOROID_FRAMES - 1;

    /// Off-screen sentinels that prune entities leaving the play field
    pub const BOUNDARY_OFFSET: f32 = 96.0;
    pub const BOUNDARY_THICKNESS: f32 = 11.0;

    /// Exhaust flicker frames (same count for boost and idle sets)
    pub const EXHAUST_FRAMES: u8 = 4;

    /// Parallax background layers; layer `i` scrolls at `(i + 1) * BACKGROUND_SCROLL_STEP`
    pub const BACKGROUND_LAYERS: usize = 4;
    pub const BACKGROUND_SCROLL_STEP: f32 = 0.5;
    pub const BACKGROUND_TILE_WIDTH: f32 = WINDOW_WIDTH;
}
