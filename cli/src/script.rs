//! Pointer scripts: JSON lines replayed through a canvas engine.
//!
//! One step per line, tagged by `op`:
//!
//! ```text
//! {"op":"color","color":"#e11"}
//! {"op":"down"}
//! {"op":"move","x":10,"y":20}
//! {"op":"pause","ms":50}
//! {"op":"up"}
//! {"op":"tool","tool":"eraser"}
//! {"op":"clear"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::BufRead;
use std::time::Duration;

use canvas::engine::{Engine, EngineError};
use canvas::input::{PointerEvent, Tool};
use frames::{Message, Point};
use serde::Deserialize;

use crate::CliError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    Down,
    Move { x: f64, y: f64 },
    Up,
    Tool { tool: Tool },
    Color { color: String },
    Clear,
    Pause { ms: u64 },
}

impl Step {
    /// How long to keep serving the connection before the next step.
    #[must_use]
    pub fn pause(&self) -> Option<Duration> {
        match self {
            Self::Pause { ms } => Some(Duration::from_millis(*ms)),
            _ => None,
        }
    }

    /// Run this step against `engine` and return the message to broadcast.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] for colors the engine rejects.
    pub fn apply(&self, engine: &mut Engine) -> Result<Option<Message>, EngineError> {
        match self {
            Self::Down => engine.on_pointer(PointerEvent::Down),
            Self::Move { x, y } => engine.on_pointer(PointerEvent::Move(Point::new(*x, *y))),
            Self::Up => engine.on_pointer(PointerEvent::Up),
            Self::Tool { tool } => {
                engine.set_tool(*tool);
                Ok(None)
            }
            Self::Color { color } => {
                engine.set_color(color)?;
                Ok(None)
            }
            Self::Clear => Ok(engine.request_clear()),
            Self::Pause { .. } => Ok(None),
        }
    }
}

/// Parse one script line. `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns [`CliError::Script`] with the 1-based line number.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Step>, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| CliError::Script { line: line_no, source })
}

/// Read a whole script.
///
/// # Errors
///
/// Returns [`CliError::Io`] on read failures and [`CliError::Script`] on the
/// first malformed line.
pub fn read_script(reader: impl BufRead) -> Result<Vec<Step>, CliError> {
    let mut steps = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        if let Some(step) = parse_line(idx + 1, &line?)? {
            steps.push(step);
        }
    }
    Ok(steps)
}
