//! WASM-compatible wrapper types for batch results.
//!
//! This module provides JavaScript-friendly types that wrap the core jpg2docx
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use jpg2docx_core::{
    BatchReport, BatchSummary, ConversionFailure, ARCHIVE_CONTENT_TYPE, ARCHIVE_FILE_NAME,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Helper struct for serializing a failed item to JS via serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FailureJs {
    pub file_name: String,
    pub reason: String,
}

impl From<&ConversionFailure> for FailureJs {
    fn from(failure: &ConversionFailure) -> Self {
        Self {
            file_name: failure.file_name.clone(),
            reason: failure.reason(),
        }
    }
}

/// The outcome of a batch conversion, for JavaScript.
///
/// Holds the three counts the status panel shows, the per-file failures and
/// the finished ZIP archive.
///
/// # Memory Management
///
/// The archive is stored in WASM memory. `archive()` copies it into a
/// `Uint8Array`; call it once and hand the result to a `Blob`.
#[wasm_bindgen]
pub struct JsBatchResult {
    summary: BatchSummary,
    archive: Vec<u8>,
    failures: Vec<FailureJs>,
}

#[wasm_bindgen]
impl JsBatchResult {
    /// Number of files converted successfully
    #[wasm_bindgen(getter)]
    pub fn successful(&self) -> usize {
        self.summary.successful
    }

    /// Number of files that failed to convert
    #[wasm_bindgen(getter)]
    pub fn failed(&self) -> usize {
        self.summary.failed
    }

    /// Number of files in the batch
    #[wasm_bindgen(getter)]
    pub fn total(&self) -> usize {
        self.summary.total
    }

    /// Suggested download file name for the archive
    #[wasm_bindgen(getter)]
    pub fn archive_name(&self) -> String {
        ARCHIVE_FILE_NAME.to_string()
    }

    /// MIME type for the archive download
    #[wasm_bindgen(getter)]
    pub fn content_type(&self) -> String {
        ARCHIVE_CONTENT_TYPE.to_string()
    }

    /// Returns the ZIP archive as Uint8Array.
    ///
    /// Note: This creates a copy of the archive bytes.
    pub fn archive(&self) -> Vec<u8> {
        self.archive.clone()
    }

    /// Per-file failures as an array of `{ file_name, reason }` objects.
    ///
    /// # Errors
    /// Returns error if the records cannot be serialized
    pub fn failures(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.failures)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize failures: {}", e)))
    }

    /// Counts as a `{ successful, failed, total }` object.
    ///
    /// # Errors
    /// Returns error if the summary cannot be serialized
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.summary)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize summary: {}", e)))
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    /// Call this once the archive has been handed to the browser.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsBatchResult {
    /// Build the JS wrapper from a core report.
    pub(crate) fn from_report(report: BatchReport) -> Self {
        Self {
            failures: report.failures.iter().map(FailureJs::from).collect(),
            summary: report.summary,
            archive: report.archive,
        }
    }

    pub(crate) fn failure_records(&self) -> &[FailureJs] {
        &self.failures
    }
}
