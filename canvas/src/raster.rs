//! Raster: the only durable per-client state.
//!
//! A [`Raster`] wraps a premultiplied RGBA [`tiny_skia::Pixmap`] and exposes
//! the handful of primitives the stroke, erase, clear and sync paths need.
//! Every primitive is deterministic for a given input, so two clients that
//! apply the same operations in the same order hold identical pixels.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use frames::Point;
use tiny_skia::{
    BlendMode, Color, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// Errors produced by raster and snapshot operations.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Width or height was zero or too large for a pixmap.
    #[error("invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// A CSS color string could not be parsed.
    #[error("failed to parse color {0:?}")]
    Color(String),
    /// PNG encoding failed.
    #[error("png encoding error: {0}")]
    Encode(String),
    /// PNG decoding failed.
    #[error("png decoding error: {0}")]
    Decode(String),
    /// The snapshot text was not a base64 image payload.
    #[error("invalid snapshot: {0}")]
    Snapshot(String),
}

/// Straight (non-premultiplied) RGBA pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };
}

/// A fixed-size pixel surface.
#[derive(Clone)]
pub struct Raster {
    pixmap: Pixmap,
}

impl PartialEq for Raster {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width() && self.height() == other.height() && self.data() == other.data()
    }
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl Raster {
    /// Create a fully transparent raster.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidDimensions`] for zero-sized surfaces.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(RasterError::InvalidDimensions { width, height })?;
        Ok(Self { pixmap })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw premultiplied RGBA bytes, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Read one pixel as straight RGBA. `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba { r: color.red(), g: color.green(), b: color.blue(), a: color.alpha() })
    }

    /// True when every pixel is fully transparent.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Stroke a straight line with butt caps.
    pub fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Color) {
        let (x0, y0) = device(from);
        let (x1, y1) = device(to);
        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        let stroke = Stroke { width, ..Stroke::default() };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// Fill a solid disc.
    pub fn fill_disc(&mut self, center: Point, radius: f32, color: Color) {
        let (cx, cy) = device(center);
        let Some(path) = PathBuilder::from_circle(cx, cy, radius) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    /// Make every pixel whose center lies inside the disc fully transparent.
    ///
    /// Anti-aliasing is off: the erase is binary, with no partial-opacity rim.
    pub fn erase_disc(&mut self, center: Point, radius: f32) {
        let (cx, cy) = device(center);
        let Some(path) = PathBuilder::from_circle(cx, cy, radius) else {
            return;
        };

        let paint = Paint {
            blend_mode: BlendMode::DestinationOut,
            anti_alias: false,
            ..Paint::default()
        };
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Composite `src` over this raster at the origin (source-over).
    ///
    /// Only the overlapping region is touched. Existing content is kept
    /// wherever `src` is transparent.
    pub fn overlay(&mut self, src: &Raster) {
        self.pixmap.draw_pixmap(
            0,
            0,
            src.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Encode the raster as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Encode`] if the PNG encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RasterError::Encode(e.to_string()))
    }

    /// Decode PNG bytes into a new raster of the image's own size.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Decode`] for bytes that are not a PNG image.
    pub fn decode_png(bytes: &[u8]) -> Result<Self, RasterError> {
        let pixmap = Pixmap::decode_png(bytes).map_err(|e| RasterError::Decode(e.to_string()))?;
        Ok(Self { pixmap })
    }
}

/// Canvas coordinates in the `f32` space tiny-skia paints in.
#[allow(clippy::cast_possible_truncation)]
fn device(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

/// Parse a CSS color string into a [`tiny_skia::Color`].
///
/// # Errors
///
/// Returns [`RasterError::Color`] for strings `csscolorparser` rejects.
pub fn parse_color(s: &str) -> Result<Color, RasterError> {
    let parsed = csscolorparser::parse(s).map_err(|_| RasterError::Color(s.to_owned()))?;
    let [r, g, b, a] = parsed.to_array();
    Color::from_rgba(r, g, b, a).ok_or_else(|| RasterError::Color(s.to_owned()))
}
