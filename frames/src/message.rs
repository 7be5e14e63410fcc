//! Typed messages carried inside a [`Frame`](crate::Frame).
//!
//! Five kinds exist and they map one-to-one onto wire event names. Payload
//! field names follow the browser client (`currentPoint`, `previousPoint`,
//! `points`), so JSON frames from either side are interchangeable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CodecError, Frame};

/// A canvas-local pixel coordinate. Origin is top-left, not normalized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One line segment plus a join dot at `previous_point`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeSegment {
    pub previous_point: Point,
    pub current_point: Point,
    /// CSS color string, e.g. `"#000"`.
    pub color: String,
}

/// A fixed-radius destructive disc centered at `points`.
///
/// The field name is singular in meaning; it keeps the wire name used by
/// existing clients.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EraseOperation {
    pub points: Point,
}

/// A full raster snapshot, encoded as an image data URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub snapshot: String,
}

/// Wire event names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    Draw,
    Eraser,
    Joined,
    Sync,
    BoardCleared,
}

impl Event {
    pub const ALL: [Event; 5] = [Self::Draw, Self::Eraser, Self::Joined, Self::Sync, Self::BoardCleared];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Eraser => "eraser",
            Self::Joined => "joined",
            Self::Sync => "sync",
            Self::BoardCleared => "board-cleared",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Event {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| CodecError::UnknownEvent(s.to_owned()))
    }
}

/// Typed view of a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Draw(StrokeSegment),
    Eraser(EraseOperation),
    Joined,
    Sync(SyncPayload),
    BoardCleared,
}

impl Message {
    #[must_use]
    pub fn event(&self) -> Event {
        match self {
            Self::Draw(_) => Event::Draw,
            Self::Eraser(_) => Event::Eraser,
            Self::Joined => Event::Joined,
            Self::Sync(_) => Event::Sync,
            Self::BoardCleared => Event::BoardCleared,
        }
    }

    /// Payload as a JSON value. Events without a payload carry `{}`.
    #[must_use]
    pub fn data(&self) -> Value {
        let data = match self {
            Self::Draw(segment) => serde_json::to_value(segment),
            Self::Eraser(op) => serde_json::to_value(op),
            Self::Sync(payload) => serde_json::to_value(payload),
            Self::Joined | Self::BoardCleared => return serde_json::json!({}),
        };
        data.unwrap_or_default()
    }

    /// Wrap into a new frame with a fresh id and timestamp.
    #[must_use]
    pub fn to_frame(&self) -> Frame {
        Frame::new(self.event().as_str(), self.data())
    }

    /// Protobuf bytes for this message.
    #[must_use]
    pub fn to_binary(&self) -> Vec<u8> {
        crate::encode_frame(&self.to_frame())
    }

    /// Decode a protobuf frame straight into a typed message.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the bytes, the event name or the payload
    /// are invalid.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CodecError> {
        Self::try_from(crate::decode_frame(bytes)?)
    }

    /// Decode a JSON text frame straight into a typed message.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the text, the event name or the payload
    /// are invalid.
    pub fn from_text(text: &str) -> Result<Self, CodecError> {
        Self::try_from(crate::decode_text(text)?)
    }
}

impl TryFrom<Frame> for Message {
    type Error = CodecError;

    fn try_from(frame: Frame) -> Result<Self, Self::Error> {
        let event: Event = frame.event.parse()?;
        let invalid = |source| CodecError::InvalidPayload { event, source };

        Ok(match event {
            Event::Draw => Self::Draw(serde_json::from_value(frame.data).map_err(invalid)?),
            Event::Eraser => Self::Eraser(serde_json::from_value(frame.data).map_err(invalid)?),
            Event::Sync => Self::Sync(serde_json::from_value(frame.data).map_err(invalid)?),
            Event::Joined => Self::Joined,
            Event::BoardCleared => Self::BoardCleared,
        })
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;
