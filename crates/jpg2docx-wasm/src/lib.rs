//! jpg2docx WASM - WebAssembly bindings for jpg2docx
//!
//! This crate provides WASM bindings to expose the jpg2docx-core conversion
//! to the browser page that handles file selection, progress display and the
//! download button.
//!
//! # Module Structure
//!
//! - `batch` - Collect uploads and convert them into one ZIP archive
//! - `convert` - Single-file conversion and naming helpers
//! - `types` - WASM-compatible wrapper types for batch results
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsBatch } from '@jpg2docx/wasm';
//!
//! // Load the generated module (must call first)
//! await init();
//!
//! const batch = new JsBatch();
//! batch.add_file(file.name, new Uint8Array(await file.arrayBuffer()));
//! const result = batch.convert();
//! console.log(`Converted ${result.successful}/${result.total}`);
//! ```

use wasm_bindgen::prelude::*;

mod batch;
mod convert;
mod types;

// Re-export public types
pub use batch::JsBatch;
pub use convert::{archive_file_name, convert_jpg_to_docx, is_accepted_file, output_entry_name};
pub use types::JsBatchResult;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Encode a gradient JPEG for the binding tests.
#[cfg(test)]
pub(crate) fn test_jpeg(width: u32, height: u32) -> Vec<u8> {
    use image::codecs::jpeg::JpegEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x * 255 / width) as u8, (y * 255 / height) as u8, 128]);
        }
    }

    let mut buffer = std::io::Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, 90)
        .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
        .unwrap();
    buffer.into_inner()
}
