//! Shared numeric constants for the canvas crate.

// ── Surface ─────────────────────────────────────────────────────

/// Default raster width in pixels.
pub const CANVAS_WIDTH: u32 = 1200;

/// Default raster height in pixels.
pub const CANVAS_HEIGHT: u32 = 600;

// ── Pen ─────────────────────────────────────────────────────────

/// Line width of every stroke segment.
pub const STROKE_WIDTH: f32 = 5.0;

/// Radius of the join dot filled at each segment's start point.
pub const JOIN_DOT_RADIUS: f32 = 2.0;

/// Color used until the host picks another one.
pub const DEFAULT_COLOR: &str = "#000";

// ── Eraser ──────────────────────────────────────────────────────

/// Radius of the destructive disc painted by the eraser.
pub const ERASER_RADIUS: f32 = 45.0;

// ── Snapshot ────────────────────────────────────────────────────

/// Data URL prefix for encoded snapshots.
pub const SNAPSHOT_PREFIX: &str = "data:image/png;base64,";
