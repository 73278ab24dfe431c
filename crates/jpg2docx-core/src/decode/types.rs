//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resolution assumed when a file declares none.
pub const DEFAULT_DPI: u32 = 72;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes do not match any known image signature.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The bytes are a recognised image, but not a JPEG.
    #[error("Expected JPEG data, found {0}")]
    UnsupportedFormat(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoder refused the image header under its resource limits.
    #[error("Image exceeds decoder limits: {0}")]
    TooLarge(String),
}

/// Declared print resolution, in dots per inch along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub horizontal: u32,
    pub vertical: u32,
}

impl Resolution {
    /// Zero densities fall back to [`DEFAULT_DPI`].
    pub fn new(horizontal: u32, vertical: u32) -> Self {
        let or_default = |dpi: u32| if dpi == 0 { DEFAULT_DPI } else { dpi };
        Self {
            horizontal: or_default(horizontal),
            vertical: or_default(vertical),
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(DEFAULT_DPI, DEFAULT_DPI)
    }
}

/// Pixel dimensions and resolution of a validated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    pub resolution: Resolution,
}

impl ImageInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            resolution: Resolution::default(),
        }
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Check if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
