//! Terminal renderer built on crossterm
//!
//! The 1280x720 world is scaled onto whatever cell grid the terminal has.
//! Every sprite becomes a block of one glyph; text is written cell by cell.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use glam::Vec2;

use super::{Renderer, Sprite};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::Result;

/// Stars per parallax layer tile
const STARS_PER_LAYER: u32 = 24;

/// Raw mode, alternate screen and hidden cursor for as long as it lives
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let session = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        log::debug!("Terminal session started");
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
            log::warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("Failed to disable raw mode: {}", e);
        }
    }
}

/// Fixed-size character buffer addressed in world pixels
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    cols: u16,
    rows: u16,
    cells: Vec<char>,
}

impl CellGrid {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![' '; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(self.cols as f32 / WINDOW_WIDTH, self.rows as f32 / WINDOW_HEIGHT)
    }

    /// Cell holding the world point `pos`, if it is on screen
    pub fn cell_at(&self, pos: Vec2) -> Option<(u16, u16)> {
        let cell = (pos * self.scale()).floor();
        if cell.x < 0.0 || cell.y < 0.0 || cell.x >= self.cols as f32 || cell.y >= self.rows as f32 {
            return None;
        }
        Some((cell.x as u16, cell.y as u16))
    }

    /// Fill the cells covered by a world-space box. A box always covers at
    /// least one cell so small sprites stay visible.
    pub fn fill(&mut self, pos: Vec2, size: Vec2, glyph: char) {
        let scale = self.scale();
        let start = (pos * scale).floor();
        let end = ((pos + size) * scale).ceil().max(start + Vec2::ONE);

        let x0 = start.x.max(0.0) as usize;
        let y0 = start.y.max(0.0) as usize;
        let x1 = end.x.min(self.cols as f32).max(0.0) as usize;
        let y1 = end.y.min(self.rows as f32).max(0.0) as usize;
        for y in y0..y1 {
            for x in x0..x1 {
                self.cells[y * self.cols as usize + x] = glyph;
            }
        }
    }

    /// Put a single glyph at a world point, leaving non-blank cells alone
    pub fn plot_behind(&mut self, pos: Vec2, glyph: char) {
        if let Some((x, y)) = self.cell_at(pos) {
            let cell = &mut self.cells[y as usize * self.cols as usize + x as usize];
            if *cell == ' ' {
                *cell = glyph;
            }
        }
    }

    /// Write text starting at a world point, clipped at the right edge
    pub fn write_text(&mut self, pos: Vec2, text: &str) {
        let Some((x, y)) = self.cell_at(pos) else {
            return;
        };
        let row = y as usize * self.cols as usize;
        for (i, ch) in text.chars().enumerate() {
            let col = x as usize + i;
            if col >= self.cols as usize {
                break;
            }
            self.cells[row + col] = ch;
        }
    }

    pub fn row(&self, y: u16) -> String {
        let start = y as usize * self.cols as usize;
        self.cells[start..start + self.cols as usize].iter().collect()
    }
}

fn glyph(sprite: Sprite) -> char {
    match sprite {
        Sprite::Background { .. } => '.',
        Sprite::Ship => '>',
        Sprite::Exhaust { boost: true, frame } => ['~', '=', '~', '-'][frame as usize % 4],
        Sprite::Exhaust { boost: false, frame } => ['-', '.', '-', ' '][frame as usize % 4],
        Sprite::Bullet => '=',
        Sprite::Meteoroid { frame: 0 } => '@',
        Sprite::Meteoroid { frame: 1..=3 } => '*',
        Sprite::Meteoroid { frame: 4..=5 } => '+',
        Sprite::Meteoroid { .. } => '.',
    }
}

/// Star positions within one background tile, stable per layer
fn stars(layer: u8, tile_width: f32) -> impl Iterator<Item = (Vec2, char)> {
    let layer = layer as u32;
    let glyph = if layer >= 2 { '*' } else { '.' };
    (0..STARS_PER_LAYER).map(move |k| {
        let x = (k * 397 + layer * 131) as f32 % tile_width;
        let y = ((k * 211 + layer * 89) % WINDOW_HEIGHT as u32) as f32;
        (Vec2::new(x, y), glyph)
    })
}

/// Renderer that draws into a `CellGrid` and flushes it to a terminal
pub struct TerminalRenderer<W: Write> {
    out: W,
    grid: CellGrid,
    follow_terminal_size: bool,
}

impl TerminalRenderer<Stdout> {
    /// Renderer on stdout, sized to the terminal and resized as it changes
    pub fn stdout() -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        log::info!("Terminal size {}x{}", cols, rows);
        Ok(Self {
            out: io::stdout(),
            grid: CellGrid::new(cols, rows),
            follow_terminal_size: true,
        })
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer with a fixed grid size
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            grid: CellGrid::new(cols, rows),
            follow_terminal_size: false,
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, sprite: Sprite, pos: Vec2) -> Result<()> {
        match sprite {
            Sprite::Background { layer } => {
                let tile_width = sprite.size().x;
                for (star, glyph) in stars(layer, tile_width) {
                    self.grid.plot_behind(pos + star, glyph);
                }
            }
            _ => self.grid.fill(pos, sprite.size(), glyph(sprite)),
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) -> Result<()> {
        self.grid.write_text(pos, text);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        for y in 0..self.grid.rows() {
            queue!(self.out, MoveTo(0, y), Print(self.grid.row(y)))?;
        }
        self.out.flush()?;
        self.grid.clear();

        if self.follow_terminal_size {
            let (cols, rows) = terminal::size()?;
            if (cols, rows) != (self.grid.cols(), self.grid.rows()) {
                log::debug!("Terminal resized to {}x{}", cols, rows);
                self.grid = CellGrid::new(cols, rows);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_scales_onto_grid() {
        let grid = CellGrid::new(128, 72);
        assert_eq!(grid.cell_at(Vec2::ZERO), Some((0, 0)));
        assert_eq!(grid.cell_at(Vec2::new(640.0, 360.0)), Some((64, 36)));
        assert_eq!(grid.cell_at(Vec2::new(1279.0, 719.0)), Some((127, 71)));
        assert_eq!(grid.cell_at(Vec2::new(1280.0, 0.0)), None);
        assert_eq!(grid.cell_at(Vec2::new(-1.0, 0.0)), None);
    }

    #[test]
    fn test_small_sprite_covers_one_cell() {
        let mut grid = CellGrid::new(80, 24);
        grid.fill(Vec2::new(500.0, 300.0), Vec2::new(15.0, 12.0), '=');
        let filled: usize = (0..24).map(|y| grid.row(y).matches('=').count()).sum();
        assert!(filled >= 1);
    }

    #[test]
    fn test_offscreen_fill_is_clipped() {
        let mut grid = CellGrid::new(80, 24);
        grid.fill(Vec2::new(1300.0, 100.0), Vec2::new(38.0, 33.0), '@');
        grid.fill(Vec2::new(-200.0, -50.0), Vec2::new(100.0, 40.0), '@');
        assert!((0..24).all(|y| !grid.row(y).contains('@')));
    }

    #[test]
    fn test_stars_stay_behind_sprites() {
        let mut grid = CellGrid::new(128, 72);
        grid.fill(Vec2::ZERO, Vec2::new(20.0, 20.0), '>');
        grid.plot_behind(Vec2::new(5.0, 5.0), '.');
        grid.plot_behind(Vec2::new(100.0, 5.0), '.');
        let row = grid.row(0);
        assert!(row.starts_with(">> "));
        assert_eq!(row.chars().nth(10), Some('.'));
    }

    #[test]
    fn test_present_writes_text_and_clears() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 40, 10);
        renderer.draw_text("Score: 7", Vec2::new(3.0, 0.0)).unwrap();
        assert!(renderer.grid.row(0).starts_with("Score: 7"));

        renderer.present().unwrap();
        assert!(renderer.grid.row(0).trim().is_empty());
        let written = String::from_utf8_lossy(&renderer.out).into_owned();
        assert!(written.contains("Score: 7"));
    }

    #[test]
    fn test_explosion_glyphs() {
        assert_eq!(glyph(Sprite::Meteoroid { frame: 0 }), '@');
        assert_eq!(glyph(Sprite::Meteoroid { frame: 2 }), '*');
        assert_eq!(glyph(Sprite::Meteoroid { frame: 6 }), '.');
    }
}
