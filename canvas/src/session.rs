//! Local drawing session: "pointer currently down" plus the last sample.
//!
//! Only locally generated operations read or write a [`Session`]. Remote
//! segments and erasures are self-contained and never touch it, so a peer's
//! stroke arriving mid-gesture cannot bend the local line.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use frames::Point;

/// Gate for local pointer motion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Session {
    active: bool,
    last_point: Option<Point>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down: start a fresh gesture with no remembered point.
    pub fn begin(&mut self) {
        self.active = true;
        self.last_point = None;
    }

    /// Pointer released anywhere: stop painting and forget the last point so
    /// the next gesture does not connect to this one.
    pub fn end(&mut self) {
        self.active = false;
        self.last_point = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    /// Drop the remembered point without ending the gesture.
    pub fn forget_last_point(&mut self) {
        self.last_point = None;
    }

    /// Record `point` as the newest sample and return where its segment
    /// starts: the previous sample, or `point` itself on the first move.
    pub fn advance(&mut self, point: Point) -> Point {
        let start = self.last_point.unwrap_or(point);
        self.last_point = Some(point);
        start
    }
}
