//! Parallax background scroll
//!
//! Purely cosmetic, but it advances with the simulation so a frame always
//! renders a consistent scene.

use crate::consts::{BACKGROUND_LAYERS, BACKGROUND_SCROLL_STEP, BACKGROUND_TILE_WIDTH, WINDOW_WIDTH};

/// Horizontal scroll offsets, one per layer (back to front)
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    offsets: Vec<f32>,
    tile_width: f32,
}

impl Default for Background {
    fn default() -> Self {
        Self::new(BACKGROUND_LAYERS, BACKGROUND_TILE_WIDTH)
    }
}

impl Background {
    pub fn new(layers: usize, tile_width: f32) -> Self {
        Self {
            offsets: vec![0.0; layers],
            tile_width,
        }
    }

    /// Scroll every layer left; nearer layers move faster. A layer that has
    /// scrolled a whole tile wraps back to 0.
    pub fn advance(&mut self) {
        for (i, offset) in self.offsets.iter_mut().enumerate() {
            *offset -= (i + 1) as f32 * BACKGROUND_SCROLL_STEP;
            if offset.abs() > self.tile_width {
                *offset = 0.0;
            }
        }
    }

    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    /// Tiles needed to cover the window at any offset
    pub fn tiles(&self) -> usize {
        (WINDOW_WIDTH / self.tile_width).ceil() as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_scroll_at_different_speeds() {
        let mut bg = Background::new(3, 100.0);
        bg.advance();
        assert_eq!(bg.offsets(), &[-0.5, -1.0, -1.5]);
    }

    #[test]
    fn test_layer_wraps_after_full_tile() {
        let mut bg = Background::new(1, 2.0);
        for _ in 0..4 {
            bg.advance();
        }
        assert_eq!(bg.offsets()[0], -2.0);
        bg.advance();
        assert_eq!(bg.offsets()[0], 0.0);
    }

    #[test]
    fn test_tile_count_covers_window() {
        assert_eq!(Background::default().tiles(), 2);
        assert_eq!(Background::new(1, 500.0).tiles(), 4);
    }
}
