//! Image decoding for jpg2docx.
//!
//! Uploaded files are decoded once, purely to confirm they are readable
//! JPEGs and to learn their pixel dimensions and declared resolution. The
//! original bytes are what end up inside the document; nothing is
//! re-encoded.
//!
//! # Examples
//!
//! ```ignore
//! use jpg2docx_core::decode::decode_jpeg;
//!
//! let jpeg_bytes = std::fs::read("photo.jpg").unwrap();
//! let info = decode_jpeg(&jpeg_bytes).unwrap();
//! println!("Decoded {}x{} image", info.width, info.height);
//! ```

mod jpeg;
mod types;

pub use jpeg::decode_jpeg;
pub use types::{DecodeError, ImageInfo, Resolution, DEFAULT_DPI};
