//! Snapshot codec: a raster as a self-contained PNG data URL.
//!
//! The text form matches what a browser canvas produces from `toDataURL`,
//! so snapshots from web peers and headless peers are interchangeable.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::consts::SNAPSHOT_PREFIX;
use crate::raster::{Raster, RasterError};

/// Encode `raster` as `data:image/png;base64,...`.
///
/// # Errors
///
/// Returns [`RasterError::Encode`] if PNG encoding fails.
pub fn encode(raster: &Raster) -> Result<String, RasterError> {
    let png = raster.encode_png()?;
    Ok(format!("{SNAPSHOT_PREFIX}{}", STANDARD.encode(png)))
}

/// Decode a snapshot into a raster of the image's own size.
///
/// Accepts any `data:<mime>;base64,` URL or bare base64.
///
/// # Errors
///
/// Returns [`RasterError::Snapshot`] for text that is not base64 and
/// [`RasterError::Decode`] for payloads that are not PNG images.
pub fn decode(text: &str) -> Result<Raster, RasterError> {
    let encoded = match text.strip_prefix("data:") {
        Some(rest) => match rest.split_once(";base64,") {
            Some((_, payload)) => payload,
            None => return Err(RasterError::Snapshot("data url is not base64".to_owned())),
        },
        None => text,
    };
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| RasterError::Snapshot(e.to_string()))?;
    Raster::decode_png(&bytes)
}
