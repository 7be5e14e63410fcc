//! Erase model: pointer samples to destructive discs.

#[cfg(test)]
#[path = "erase_test.rs"]
mod erase_test;

use frames::{EraseOperation, Point};

use crate::consts::ERASER_RADIUS;
use crate::raster::Raster;
use crate::session::Session;

/// Erase around `point` if the local session is active.
///
/// Same precondition as the pen: pointer motion without a pressed button
/// neither erases nor emits.
pub fn erase(session: &Session, raster: &mut Raster, point: Point) -> Option<EraseOperation> {
    if !session.is_active() {
        return None;
    }
    let op = EraseOperation { points: point };
    apply(raster, &op);
    Some(op)
}

/// Apply an erase operation unconditionally.
pub fn apply(raster: &mut Raster, op: &EraseOperation) {
    raster.erase_disc(op.points, ERASER_RADIUS);
}
