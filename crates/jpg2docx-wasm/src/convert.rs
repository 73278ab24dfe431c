//! Single-file conversion WASM bindings.
//!
//! This module exposes the jpg2docx-core converter and the helpers the page
//! needs around it.
//!
//! # Functions
//!
//! - [`convert_jpg_to_docx`] - Convert one JPEG into DOCX bytes
//! - [`is_accepted_file`] - File-picker filter for `.jpg`/`.jpeg`
//! - [`output_entry_name`] - Name the converted document will get
//! - [`archive_file_name`] - Suggested download name for the archive
//!
//! # Example
//!
//! ```typescript
//! import { convert_jpg_to_docx, is_accepted_file, output_entry_name } from '@jpg2docx/wasm';
//!
//! if (is_accepted_file(file.name)) {
//!   const bytes = new Uint8Array(await file.arrayBuffer());
//!   const docx = convert_jpg_to_docx(file.name, bytes);
//!   download(new Blob([docx]), output_entry_name(file.name));
//! }
//! ```

use jpg2docx_core::{convert, ConvertOptions, InputImage, ARCHIVE_FILE_NAME, DEFAULT_OUTPUT_EXTENSION};
use wasm_bindgen::prelude::*;

/// Convert a single JPEG into a one-page DOCX document.
///
/// The image is embedded unchanged, six inches wide, with its height scaled
/// to keep the aspect ratio.
///
/// # Arguments
///
/// * `name` - The original file name (recorded as the picture name)
/// * `bytes` - The raw JPEG file bytes as a `Uint8Array`
///
/// # Returns
///
/// A `Uint8Array` containing the DOCX package.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a JPEG
/// - The JPEG is corrupted or truncated
#[wasm_bindgen]
pub fn convert_jpg_to_docx(name: &str, bytes: &[u8]) -> Result<Vec<u8>, JsValue> {
    let input = InputImage::new(name, bytes);
    convert::convert_image(&input, &ConvertOptions::default())
        .map(|document| document.bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check whether a file name has an accepted extension (`.jpg` or `.jpeg`,
/// any case).
#[wasm_bindgen]
pub fn is_accepted_file(name: &str) -> bool {
    convert::is_accepted_file_name(name)
}

/// The archive entry name a file will be converted to, e.g.
/// `photo.jpg` → `photo.docx`.
#[wasm_bindgen]
pub fn output_entry_name(name: &str) -> String {
    convert::output_entry_name(name, DEFAULT_OUTPUT_EXTENSION)
}

/// Suggested download name for the archive of a batch.
#[wasm_bindgen]
pub fn archive_file_name() -> String {
    ARCHIVE_FILE_NAME.to_string()
}
