//! Renderer that records draw calls, for tests

use glam::Vec2;

use super::{Renderer, Sprite};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Sprite(Sprite, Vec2),
    Text(String, Vec2),
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Calls since the last present
    pub frames_in_progress: Vec<DrawCall>,
    /// Completed frames
    pub presented: Vec<Vec<DrawCall>>,
}

impl RecordingRenderer {
    pub fn last_frame(&self) -> Option<&[DrawCall]> {
        self.presented.last().map(Vec::as_slice)
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, sprite: Sprite, pos: Vec2) -> Result<()> {
        self.frames_in_progress.push(DrawCall::Sprite(sprite, pos));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) -> Result<()> {
        self.frames_in_progress.push(DrawCall::Text(text.to_string(), pos));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let frame = std::mem::take(&mut self.frames_in_progress);
        self.presented.push(frame);
        Ok(())
    }
}
