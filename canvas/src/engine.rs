//! Per-client canvas engine.
//!
//! DESIGN
//! ======
//! The engine owns one optional [`Raster`] plus the local [`Session`], the
//! [`UiState`] and the late-join [`SyncState`]. Every operation returns the
//! [`Message`] to broadcast, if any; the host owns the transport and decides
//! how to deliver it. Nothing here performs I/O.
//!
//! Without an attached raster every operation is a silent no-op: no painting,
//! no state change, nothing emitted.
//!
//! LOCAL VS REMOTE
//! ===============
//! Local operations paint first and then emit. Remote operations paint only,
//! never consult the session and never emit, which prevents rebroadcast
//! loops and keeps a peer's stroke from bending the local line.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use frames::{EraseOperation, Event, Message, Point, StrokeSegment, SyncPayload};

use crate::input::{PointerEvent, Tool, UiState};
use crate::raster::{Raster, RasterError, parse_color};
use crate::session::Session;
use crate::sync::SyncState;
use crate::{erase, stroke, sync};

/// Errors surfaced by [`Engine`] operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A received message could not be applied to the raster.
    #[error("failed to apply {event}: {source}")]
    Apply {
        event: Event,
        #[source]
        source: RasterError,
    },
    /// The local raster could not be exported as a snapshot.
    #[error("failed to export snapshot: {0}")]
    Export(#[source] RasterError),
    /// A local operation was rejected.
    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Canvas engine for one client.
#[derive(Debug, Default)]
pub struct Engine {
    raster: Option<Raster>,
    session: Session,
    ui: UiState,
    sync: SyncState,
}

impl Engine {
    /// Engine with no raster attached yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_raster(raster: Raster) -> Self {
        Self { raster: Some(raster), ..Self::default() }
    }

    /// Engine with a fresh transparent raster of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Raster`] for invalid dimensions.
    pub fn with_size(width: u32, height: u32) -> Result<Self, EngineError> {
        Ok(Self::with_raster(Raster::new(width, height)?))
    }

    /// Attach (or replace) the drawing surface.
    pub fn attach(&mut self, raster: Raster) {
        self.raster = Some(raster);
    }

    #[must_use]
    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn sync_state(&self) -> SyncState {
        self.sync
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.ui.color
    }

    /// Change the pen color for subsequent local segments.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Raster`] if `color` is not a CSS color; the
    /// current color is kept.
    pub fn set_color(&mut self, color: &str) -> Result<(), EngineError> {
        parse_color(color)?;
        color.clone_into(&mut self.ui.color);
        Ok(())
    }

    // --- Stroke ---

    /// Pointer down: the session becomes active with no remembered point.
    pub fn begin_stroke(&mut self) {
        self.session.begin();
    }

    /// Paint a segment from the last point to `point` and return it for
    /// broadcast. `None` when the session is inactive or no raster exists.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Raster`] for an unparseable `color`.
    pub fn extend_stroke(
        &mut self,
        point: Point,
        color: &str,
    ) -> Result<Option<Message>, EngineError> {
        let Some(raster) = self.raster.as_mut() else {
            return Ok(None);
        };
        let segment = stroke::extend(&mut self.session, raster, point, color)?;
        Ok(segment.map(Message::Draw))
    }

    /// Pointer released anywhere.
    pub fn end_stroke(&mut self) {
        self.session.end();
    }

    /// Paint a received segment. Local session state is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Apply`] if the segment's color does not parse.
    pub fn apply_remote_segment(&mut self, segment: &StrokeSegment) -> Result<(), EngineError> {
        let Some(raster) = self.raster.as_mut() else {
            return Ok(());
        };
        stroke::paint(raster, segment)
            .map_err(|source| EngineError::Apply { event: Event::Draw, source })
    }

    // --- Erase ---

    /// Erase around `point` while the pointer is down.
    pub fn erase(&mut self, point: Point) -> Option<Message> {
        let raster = self.raster.as_mut()?;
        erase::erase(&self.session, raster, point).map(Message::Eraser)
    }

    /// Apply a received erase operation.
    pub fn apply_remote_erase(&mut self, op: &EraseOperation) {
        if let Some(raster) = self.raster.as_mut() {
            erase::apply(raster, op);
        }
    }

    // --- Clear ---

    /// Clear locally and return the broadcast. The next segment starts fresh.
    pub fn request_clear(&mut self) -> Option<Message> {
        let raster = self.raster.as_mut()?;
        raster.clear();
        self.session.forget_last_point();
        Some(Message::BoardCleared)
    }

    /// Apply a received clear.
    pub fn apply_remote_clear(&mut self) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        raster.clear();
        self.session.forget_last_point();
    }

    // --- Sync ---

    /// Announce this client to the room. `None` without a raster.
    pub fn join(&mut self) -> Option<Message> {
        self.raster.as_ref()?;
        self.sync.joined();
        Some(Message::Joined)
    }

    /// Answer a peer's `joined` with a snapshot of the local raster.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Export`] if the raster cannot be encoded.
    pub fn on_peer_joined(&self) -> Result<Option<Message>, EngineError> {
        let Some(raster) = self.raster.as_ref() else {
            return Ok(None);
        };
        let payload = sync::respond(raster).map_err(EngineError::Export)?;
        Ok(Some(Message::Sync(payload)))
    }

    /// Overlay a received snapshot at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Apply`] for undecodable snapshots; the raster
    /// is left as it was.
    pub fn on_sync(&mut self, payload: &SyncPayload) -> Result<(), EngineError> {
        let Some(raster) = self.raster.as_mut() else {
            return Ok(());
        };
        sync::apply(raster, payload)
            .map_err(|source| EngineError::Apply { event: Event::Sync, source })?;
        self.sync.record_snapshot();
        Ok(())
    }

    // --- Dispatch ---

    /// Route a pointer event through the active tool.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Raster`] if the pen color cannot be painted.
    pub fn on_pointer(&mut self, event: PointerEvent) -> Result<Option<Message>, EngineError> {
        match event {
            PointerEvent::Down => {
                self.begin_stroke();
                Ok(None)
            }
            PointerEvent::Move(point) => match self.ui.tool {
                Tool::Pen => {
                    let color = self.ui.color.clone();
                    self.extend_stroke(point, &color)
                }
                Tool::Eraser => Ok(self.erase(point)),
            },
            PointerEvent::Up => {
                self.end_stroke();
                Ok(None)
            }
        }
    }

    /// Apply a message received from the relay and return the reply, if any.
    /// Only `joined` produces one.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] when the message cannot be applied or the
    /// join reply cannot be produced.
    pub fn handle_inbound(&mut self, message: &Message) -> Result<Option<Message>, EngineError> {
        match message {
            Message::Draw(segment) => self.apply_remote_segment(segment)?,
            Message::Eraser(op) => self.apply_remote_erase(op),
            Message::Joined => return self.on_peer_joined(),
            Message::Sync(payload) => self.on_sync(payload)?,
            Message::BoardCleared => self.apply_remote_clear(),
        }
        Ok(None)
    }
}
