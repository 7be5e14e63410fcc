//! Stroke model: pointer samples to incremental line segments.
//!
//! [`paint`] is the single painting routine for both locally generated and
//! received segments. It strokes a 5px line and fills a 2px join dot at the
//! start point, which keeps single clicks and low sample rates continuous.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use frames::{Point, StrokeSegment};

use crate::consts::{JOIN_DOT_RADIUS, STROKE_WIDTH};
use crate::raster::{Raster, RasterError, parse_color};
use crate::session::Session;

/// Extend the local stroke to `point`.
///
/// Returns the emitted segment, or `None` when the session is inactive.
/// The session is only advanced once the color is known to be paintable.
///
/// # Errors
///
/// Returns [`RasterError::Color`] for an unparseable `color`.
pub fn extend(
    session: &mut Session,
    raster: &mut Raster,
    point: Point,
    color: &str,
) -> Result<Option<StrokeSegment>, RasterError> {
    if !session.is_active() {
        return Ok(None);
    }
    let paint_color = parse_color(color)?;

    let previous_point = session.advance(point);
    let segment = StrokeSegment { previous_point, current_point: point, color: color.to_owned() };
    draw(raster, &segment, paint_color);
    Ok(Some(segment))
}

/// Paint a segment onto `raster` without consulting any session state.
///
/// # Errors
///
/// Returns [`RasterError::Color`] when the segment's color does not parse.
pub fn paint(raster: &mut Raster, segment: &StrokeSegment) -> Result<(), RasterError> {
    let color = parse_color(&segment.color)?;
    draw(raster, segment, color);
    Ok(())
}

fn draw(raster: &mut Raster, segment: &StrokeSegment, color: tiny_skia::Color) {
    raster.stroke_line(segment.previous_point, segment.current_point, STROKE_WIDTH, color);
    raster.fill_disc(segment.previous_point, JOIN_DOT_RADIUS, color);
}
