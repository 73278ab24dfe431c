//! Batch packaging: convert every upload and bundle the documents into one
//! ZIP archive.
//!
//! # Architecture
//!
//! Conversion is sequential and in input order. Each item is attempted
//! exactly once and a failed item never stops the batch. Successful
//! documents are staged in an [`ArchiveBundle`], which is finalized into a
//! single ZIP buffer once every input has been seen.
//!
//! Uploads that share a file name map to the same archive entry. The later
//! document replaces the earlier one, and both still count as successful
//! conversions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::container::write_zip;
use crate::convert::{convert_image, ConversionFailure, InputImage, OutputDocument};
use crate::ConvertOptions;

/// Batch-level failure: the finished archive could not be written.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to write archive: {0}")]
    Write(String),
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        ArchiveError::Write(err.to_string())
    }
}

/// Counts reported to the user after a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub successful: usize,
    pub failed: usize,
    pub total: usize,
}

/// Emitted before each item is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress<'a> {
    /// 1-based position of the item about to be converted.
    pub index: usize,
    pub total: usize,
    pub file_name: &'a str,
}

/// Named documents waiting to be written into the download archive.
#[derive(Debug, Clone, Default)]
pub struct ArchiveBundle {
    entries: Vec<OutputDocument>,
    positions: HashMap<String, usize>,
}

impl ArchiveBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a document. Returns `true` if it replaced an entry of the same
    /// name, which keeps its original position.
    pub fn add(&mut self, document: OutputDocument) -> bool {
        match self.positions.get(&document.name) {
            Some(&position) => {
                self.entries[position] = document;
                true
            }
            None => {
                self.positions
                    .insert(document.name.clone(), self.entries.len());
                self.entries.push(document);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write all staged entries into a ZIP buffer.
    pub fn finish(self) -> Result<Vec<u8>, ArchiveError> {
        let entries = self
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.bytes.as_slice()));
        Ok(write_zip(entries)?)
    }
}

/// Result of a whole batch.
#[derive(Debug)]
pub struct BatchReport {
    /// The finished ZIP archive.
    pub archive: Vec<u8>,
    pub summary: BatchSummary,
    /// One record per failed item, in input order.
    pub failures: Vec<ConversionFailure>,
}

/// Convert every input and bundle the results.
pub fn package_batch(
    inputs: &[InputImage],
    options: &ConvertOptions,
) -> Result<BatchReport, ArchiveError> {
    package_batch_with_progress(inputs, options, |_| {})
}

/// Like [`package_batch`], reporting each item to `on_progress` before it is
/// converted.
pub fn package_batch_with_progress<F>(
    inputs: &[InputImage],
    options: &ConvertOptions,
    mut on_progress: F,
) -> Result<BatchReport, ArchiveError>
where
    F: FnMut(BatchProgress<'_>),
{
    let total = inputs.len();
    let mut bundle = ArchiveBundle::new();
    let mut failures = Vec::new();
    let mut summary = BatchSummary {
        total,
        ..Default::default()
    };

    for (i, input) in inputs.iter().enumerate() {
        on_progress(BatchProgress {
            index: i + 1,
            total,
            file_name: &input.name,
        });

        match convert_image(input, options) {
            Ok(document) => {
                let name = document.name.clone();
                if bundle.add(document) {
                    tracing::warn!(entry = %name, "archive entry overwritten by a later upload");
                }
                summary.successful += 1;
            }
            Err(failure) => {
                tracing::warn!(file = %failure.file_name, reason = %failure.error, "conversion failed");
                summary.failed += 1;
                failures.push(failure);
            }
        }
    }

    let archive = bundle.finish()?;
    tracing::info!(
        successful = summary.successful,
        failed = summary.failed,
        total = summary.total,
        archive_bytes = archive.len(),
        "batch complete"
    );

    Ok(BatchReport {
        archive,
        summary,
        failures,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
