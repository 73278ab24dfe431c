//! Single-image conversion: one JPEG in, one DOCX out.

use thiserror::Error;

use crate::decode::{decode_jpeg, DecodeError};
use crate::docx::{Document, DocxError};
use crate::ConvertOptions;

/// File extensions the upload picker accepts (compared case-insensitively).
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// An uploaded image: its original file name and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputImage {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// A serialized document ready to be added to the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    /// Archive entry name, e.g. `photo.docx`.
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Why a single image could not be converted.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Serialization(#[from] DocxError),
}

/// A failed conversion, tagged with the file it belongs to.
#[derive(Debug, Error)]
#[error("Error converting {file_name}: {error}")]
pub struct ConversionFailure {
    pub file_name: String,
    #[source]
    pub error: ConvertError,
}

impl ConversionFailure {
    /// Human-readable reason, without the file name.
    pub fn reason(&self) -> String {
        self.error.to_string()
    }
}

/// Outcome of converting one image.
pub type ConversionResult = Result<OutputDocument, ConversionFailure>;

/// Everything before the last `.`, or the whole name if there is none.
fn file_stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    }
}

/// Archive entry name for an uploaded file: the extension is replaced by
/// `extension`.
///
/// `photo.jpg` becomes `photo.docx`, `a.b.jpeg` becomes `a.b.docx`, and a
/// name without a dot just gets the extension appended.
pub fn output_entry_name(file_name: &str, extension: &str) -> String {
    format!("{}.{}", file_stem(file_name), extension)
}

/// Whether the upload picker should offer this file.
pub fn is_accepted_file_name(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ACCEPTED_EXTENSIONS
            .iter()
            .any(|accepted| ext.eq_ignore_ascii_case(accepted)),
        None => false,
    }
}

/// Convert one uploaded JPEG into a single-page document.
///
/// The image is decoded to prove it is readable, then embedded unchanged at
/// `options.image_width`, with its height following the aspect ratio at the
/// image's declared resolution. On failure nothing is produced and the error
/// names the file.
pub fn convert_image(input: &InputImage, options: &ConvertOptions) -> ConversionResult {
    build_document(input, options)
        .map(|bytes| OutputDocument {
            name: output_entry_name(&input.name, &options.output_extension),
            bytes,
        })
        .map_err(|error| ConversionFailure {
            file_name: input.name.clone(),
            error,
        })
}

fn build_document(input: &InputImage, options: &ConvertOptions) -> Result<Vec<u8>, ConvertError> {
    let info = decode_jpeg(&input.bytes)?;
    tracing::debug!(
        file = %input.name,
        width = info.width,
        height = info.height,
        "decoded image"
    );

    let mut document = Document::new();
    document.add_picture(&input.name, &input.bytes, info, options.image_width)?;
    Ok(document.save()?)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
