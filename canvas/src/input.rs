//! Input model: the active tool, the pen color and raw pointer events.
//!
//! Hosts translate their platform events (DOM mouse events, scripted
//! samples, test fixtures) into [`PointerEvent`]s and feed them to
//! [`Engine::on_pointer`](crate::engine::Engine::on_pointer). Pointer-down is
//! only meaningful on the surface; pointer-up should be reported wherever the
//! host observes it so a release outside the surface still ends the gesture.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use frames::Point;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_COLOR;

/// Which tool pointer motion drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand pen (default).
    #[default]
    Pen,
    /// Fixed-radius eraser.
    Eraser,
}

/// A pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down,
    Move(Point),
    Up,
}

/// UI state that shapes locally generated operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub tool: Tool,
    /// CSS color for new pen segments.
    pub color: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self { tool: Tool::default(), color: DEFAULT_COLOR.to_owned() }
    }
}
