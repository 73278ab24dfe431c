//! jpg2docx Core - JPEG to DOCX conversion library
//!
//! This crate turns uploaded JPEG images into single-picture Word documents
//! and bundles them into one ZIP archive for download. It has no I/O of its
//! own: callers hand in named byte buffers and get byte buffers back.
//!
//! # Module Structure
//!
//! - `decode` - JPEG validation and pixel dimensions
//! - `docx` - Minimal WordprocessingML package writer
//! - `convert` - One image in, one document out
//! - `package` - Batch conversion into a ZIP archive with a summary

mod container;
pub mod convert;
pub mod decode;
pub mod docx;
pub mod package;

#[cfg(test)]
mod test_support;

pub use convert::{
    convert_image, is_accepted_file_name, output_entry_name, ConversionFailure, ConversionResult,
    ConvertError, InputImage, OutputDocument,
};
pub use docx::Length;
pub use package::{
    package_batch, package_batch_with_progress, ArchiveBundle, ArchiveError, BatchProgress,
    BatchReport, BatchSummary,
};

/// Suggested download name for the finished archive.
pub const ARCHIVE_FILE_NAME: &str = "converted_documents.zip";

/// MIME type of the finished archive.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// Display width of every embedded image. This is the text column of a US
/// Letter page with Word's default 1.25" side margins.
pub const DEFAULT_IMAGE_WIDTH_INCHES: f64 = 6.0;

/// Extension given to every generated document.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "docx";

/// Conversion settings shared by every item in a batch
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Width of the embedded picture; height follows the aspect ratio
    pub image_width: Length,
    /// Extension of the archive entries, without the dot
    pub output_extension: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            image_width: Length::from_inches(DEFAULT_IMAGE_WIDTH_INCHES),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }
}

impl ConvertOptions {
    /// Create options with the default six-inch width
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
