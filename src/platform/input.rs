//! Scripted input for replaying a fixed key sequence

use std::collections::VecDeque;

use super::InputSource;
use crate::error::Result;
use crate::sim::TickInput;

/// Plays back one `TickInput` per frame, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<TickInput> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}
