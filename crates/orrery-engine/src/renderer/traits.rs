//! Seams between the headless engine and a platform backend.
//!
//! The engine never draws. It produces flat instance buffers that a renderer
//! reads, and it asks a `LabelRasterizer` to turn label text into pixels. In the
//! browser both live in `orrery-web`; tests use in-memory stand-ins.

use std::fmt;

use crate::components::label::LabelComponent;

/// An RGBA8 image, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl LabelBitmap {
    /// Fully transparent bitmap of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; (width * height * 4) as usize],
        }
    }

    /// True when the pixel buffer matches the declared dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.rgba.len() == (self.width as usize) * (self.height as usize) * 4
    }
}

/// Why a label could not be rasterized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// The backend could not provide a drawing surface.
    Surface(String),
    /// Drawing or reading back pixels failed.
    Draw(String),
    /// The backend returned a buffer whose size disagrees with its dimensions.
    BadBitmap { width: u32, height: u32, len: usize },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::Surface(msg) => write!(f, "no drawing surface: {msg}"),
            RasterError::Draw(msg) => write!(f, "label draw failed: {msg}"),
            RasterError::BadBitmap { width, height, len } => {
                write!(f, "bitmap {width}x{height} has {len} bytes")
            }
        }
    }
}

impl std::error::Error for RasterError {}

/// Turns a label description into pixels.
pub trait LabelRasterizer {
    fn rasterize(&mut self, label: &LabelComponent) -> Result<LabelBitmap, RasterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_bitmap_is_well_formed() {
        let bmp = LabelBitmap::blank(256, 128);
        assert_eq!(bmp.rgba.len(), 256 * 128 * 4);
        assert!(bmp.is_well_formed());
        assert!(bmp.rgba.iter().all(|&b| b == 0));
    }

    #[test]
    fn raster_error_messages() {
        let err = RasterError::BadBitmap { width: 2, height: 2, len: 3 };
        assert_eq!(err.to_string(), "bitmap 2x2 has 3 bytes");
        assert_eq!(
            RasterError::Surface("no document".into()).to_string(),
            "no drawing surface: no document"
        );
    }
}
