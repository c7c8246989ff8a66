//! Abstract user commands and their dispatch onto the controller

use super::Controller;
use crate::error::Result;
use crate::rasterizer::Renderer;

/// Discrete, already-debounced user intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    IncreaseDensity,
    DecreaseDensity,
    NextColor,
    PreviousColor,
    /// Jump to a tile-count option by index
    SetDensity(usize),
    /// Jump to a tint option by index
    SetColor(usize),
    Reset,
    SaveFrame,
    ToggleFullscreen,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::IncreaseDensity => "More tiles",
            Command::DecreaseDensity => "Fewer tiles",
            Command::NextColor => "Next tint",
            Command::PreviousColor => "Previous tint",
            Command::SetDensity(_) => "Set tiles",
            Command::SetColor(_) => "Set tint",
            Command::Reset => "Reset",
            Command::SaveFrame => "Save frame",
            Command::ToggleFullscreen => "Fullscreen",
        }
    }
}

/// Side effect the host has to carry out after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// State updated (or nothing to do)
    None,
    SaveFrame,
    ToggleFullscreen,
}

impl<R: Renderer> Controller<R> {
    /// Apply one command. Relative steps never fail; absolute sets fail on
    /// out-of-range indices without touching state.
    pub fn dispatch(&mut self, command: Command) -> Result<Effect> {
        match command {
            Command::IncreaseDensity => self.step_tile_count(1)?,
            Command::DecreaseDensity => self.step_tile_count(-1)?,
            Command::NextColor => self.step_color(1),
            Command::PreviousColor => self.step_color(-1),
            Command::SetDensity(index) => self.set_tile_count(index)?,
            Command::SetColor(index) => self.set_color(index)?,
            Command::Reset => self.reset()?,
            Command::SaveFrame => return Ok(Effect::SaveFrame),
            Command::ToggleFullscreen => return Ok(Effect::ToggleFullscreen),
        }
        Ok(Effect::None)
    }
}
