//! Rendering module
//!
//! The simulation never draws. Each frame `draw_scene` walks the state and
//! issues sprite and text draw calls, then the driver presents the frame.

#[cfg(test)]
pub(crate) mod recording;
pub mod terminal;

pub use terminal::{TerminalRenderer, TerminalSession};

use glam::Vec2;

use crate::consts::{
    BACKGROUND_TILE_WIDTH, BULLET_HEIGHT, BULLET_WIDTH, METEOROID_HEIGHT, METEOROID_WIDTH, PLAYER_HEIGHT,
    PLAYER_WIDTH, WINDOW_HEIGHT,
};
use crate::error::Result;
use crate::sim::{GameState, Meteoroid};

/// Where the score overlay sits
pub const SCORE_TEXT_POS: Vec2 = Vec2::new(3.0, 0.0);

/// Flame offsets from the ship's top-left, upper and lower engine
const EXHAUST_OFFSETS_Y: [f32; 2] = [22.0, 44.0];
const BOOST_FLAME_SIZE: Vec2 = Vec2::new(38.0, 8.0);
const IDLE_FLAME_SIZE: Vec2 = Vec2::new(20.0, 6.0);

/// Everything a renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    /// One tile of a parallax layer (0 = farthest)
    Background { layer: u8 },
    Ship,
    /// Engine flame; `boost` selects the moving set
    Exhaust { boost: bool, frame: u8 },
    Bullet,
    /// 0 = intact, otherwise explosion frame
    Meteoroid { frame: u8 },
}

impl Sprite {
    /// Size in world pixels
    pub fn size(&self) -> Vec2 {
        match self {
            Sprite::Background { .. } => Vec2::new(BACKGROUND_TILE_WIDTH, WINDOW_HEIGHT),
            Sprite::Ship => Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            Sprite::Exhaust { boost: true, .. } => BOOST_FLAME_SIZE,
            Sprite::Exhaust { boost: false, .. } => IDLE_FLAME_SIZE,
            Sprite::Bullet => Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            Sprite::Meteoroid { .. } => Vec2::new(METEOROID_WIDTH, METEOROID_HEIGHT),
        }
    }
}

/// Draw target for one frame
pub trait Renderer {
    /// Draw a sprite with its top-left corner at `pos` (world pixels)
    fn draw(&mut self, sprite: Sprite, pos: Vec2) -> Result<()>;

    /// Draw a line of text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2) -> Result<()>;

    /// Show everything drawn since the last present
    fn present(&mut self) -> Result<()>;
}

/// Draw the whole scene back to front: background, ship, meteoroids,
/// bullets, then the overlay.
pub fn draw_scene<R: Renderer + ?Sized>(state: &GameState, renderer: &mut R, fps: Option<u32>) -> Result<()> {
    let background = &state.background;
    let tile_width = background.tile_width();
    for (layer, offset) in background.offsets().iter().enumerate() {
        for tile in 0..background.tiles() {
            let x = offset + tile as f32 * tile_width;
            renderer.draw(Sprite::Background { layer: layer as u8 }, Vec2::new(x, 0.0))?;
        }
    }

    let player = &state.player;
    let flame = Sprite::Exhaust {
        boost: player.exhaust.boosting,
        frame: player.exhaust.frame(),
    };
    let flame_width = flame.size().x;
    for dy in EXHAUST_OFFSETS_Y {
        let pos = player.rect.pos + Vec2::new(-flame_width, dy);
        renderer.draw(flame, pos)?;
    }
    renderer.draw(Sprite::Ship, player.rect.pos)?;

    for meteoroid in state.entities.meteoroids.iter().chain(&state.entities.exploding) {
        draw_meteoroid(renderer, meteoroid)?;
    }
    for bullet in &state.entities.bullets {
        renderer.draw(Sprite::Bullet, bullet.rect.pos)?;
    }

    renderer.draw_text(&format!("Score: {}", state.score), SCORE_TEXT_POS)?;
    if let Some(fps) = fps {
        renderer.draw_text(&format!("FPS: {}", fps), SCORE_TEXT_POS + Vec2::new(0.0, 40.0))?;
    }
    Ok(())
}

fn draw_meteoroid<R: Renderer + ?Sized>(renderer: &mut R, meteoroid: &Meteoroid) -> Result<()> {
    renderer.draw(
        Sprite::Meteoroid {
            frame: meteoroid.explosion_frame,
        },
        meteoroid.rect.pos,
    )
}
