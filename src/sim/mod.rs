//! Frame-synchronous simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes in as a millisecond clock reading, never read directly
//! - Seeded RNG only
//! - Collision results are computed first, then applied
//! - No rendering or platform dependencies

pub mod background;
pub mod collision;
pub mod entities;
pub mod rect;
pub mod state;
pub mod tick;
pub mod timer;

pub use background::Background;
pub use collision::{Boundary, BulletHits, colliding_with, overlaps, resolve_bullet_hits};
pub use entities::Entities;
pub use rect::{Bounded, Rect};
pub use state::{
    Bullet, Exhaust, GameEvent, GameOverReason, GamePhase, GameState, Meteoroid, Movement, Player,
};
pub use tick::{TickInput, TickOutcome, tick};
pub use timer::{Difficulty, Scheduled, Scheduler, Timer};
