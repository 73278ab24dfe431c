//! Batch conversion WASM bindings.
//!
//! The page collects the selected files into a [`JsBatch`], then calls
//! `convert` once the user presses the button.
//!
//! # Example
//!
//! ```typescript
//! import { JsBatch } from '@jpg2docx/wasm';
//!
//! const batch = new JsBatch();
//! for (const file of input.files) {
//!   batch.add_file(file.name, new Uint8Array(await file.arrayBuffer()));
//! }
//!
//! const result = batch.convert((index, total, name) => {
//!   progress.value = index / total;
//!   status.textContent = `Converting ${index}/${total}: ${name}`;
//! });
//!
//! console.log(`${result.successful} ok, ${result.failed} failed, ${result.total} total`);
//! const blob = new Blob([result.archive()], { type: result.content_type });
//! ```

use crate::types::{FailureJs, JsBatchResult};
use jpg2docx_core::{package_batch_with_progress, BatchProgress, ConvertOptions, InputImage};
use wasm_bindgen::prelude::*;

/// The set of files selected for one conversion run.
#[wasm_bindgen]
pub struct JsBatch {
    inputs: Vec<InputImage>,
}

impl Default for JsBatch {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsBatch {
    /// Create an empty batch
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsBatch {
        JsBatch { inputs: Vec::new() }
    }

    /// Add one uploaded file.
    ///
    /// # Arguments
    /// * `name` - Original file name, used to name the output document
    /// * `bytes` - File contents as a `Uint8Array`
    pub fn add_file(&mut self, name: String, bytes: Vec<u8>) {
        self.inputs.push(InputImage::new(name, bytes));
    }

    /// Number of files selected
    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Check if no files have been added
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Names of the selected files, in the order they were added
    pub fn file_names(&self) -> Vec<String> {
        self.inputs.iter().map(|i| i.name.clone()).collect()
    }

    /// Remove all files
    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    /// Convert every file with the default six-inch width.
    ///
    /// # Arguments
    /// * `on_progress` - Optional `(index, total, fileName) => void`, called
    ///   before each file is converted
    ///
    /// # Errors
    /// Returns an error if the batch is empty or the archive cannot be
    /// written. Individual file failures are reported in the result instead.
    pub fn convert(&self, on_progress: Option<js_sys::Function>) -> Result<JsBatchResult, JsValue> {
        self.run(&ConvertOptions::default(), on_progress.as_ref())
    }

    /// Convert every file with custom options.
    ///
    /// # Arguments
    /// * `options` - `{ image_width?: number (EMU), output_extension?: string }`
    /// * `on_progress` - Optional progress callback, as for `convert`
    ///
    /// # Errors
    /// Returns error if options cannot be deserialized, plus the `convert` errors
    pub fn convert_with_options(
        &self,
        options: JsValue,
        on_progress: Option<js_sys::Function>,
    ) -> Result<JsBatchResult, JsValue> {
        let options: ConvertOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid convert options: {}", e)))?;
        self.run(&options, on_progress.as_ref())
    }
}

impl JsBatch {
    fn run(
        &self,
        options: &ConvertOptions,
        on_progress: Option<&js_sys::Function>,
    ) -> Result<JsBatchResult, JsValue> {
        if self.inputs.is_empty() {
            return Err(JsValue::from_str("No files selected"));
        }

        let report = package_batch_with_progress(&self.inputs, options, |progress| {
            if let Some(callback) = on_progress {
                notify_progress(callback, progress);
            }
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let result = JsBatchResult::from_report(report);
        for failure in result.failure_records() {
            report_failure(failure);
        }
        Ok(result)
    }
}

fn notify_progress(callback: &js_sys::Function, progress: BatchProgress<'_>) {
    let result = callback.call3(
        &JsValue::NULL,
        &JsValue::from_f64(progress.index as f64),
        &JsValue::from_f64(progress.total as f64),
        &JsValue::from_str(progress.file_name),
    );
    // A throwing progress handler must not abort the batch
    if let Err(err) = result {
        web_sys::console::warn_2(&JsValue::from_str("progress callback failed:"), &err);
    }
}

fn report_failure(failure: &FailureJs) {
    // The console only exists inside a JS host
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&format!(
        "Error converting {}: {}",
        failure.file_name, failure.reason
    )));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = failure;
}

/// Tests for batch bindings.
///
/// Note: Error paths build a `JsValue`, which only works on wasm32 targets.
/// The native tests below stick to batches that succeed; failures are covered
/// by the wasm tests and by `jpg2docx_core::package`.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_jpeg;

    #[test]
    fn test_add_and_len() {
        let mut batch = JsBatch::new();
        assert!(batch.is_empty());

        batch.add_file("a.jpg".to_string(), vec![1]);
        batch.add_file("b.jpg".to_string(), vec![2]);

        assert_eq!(batch.len(), 2);
        assert!(!batch.is_empty());
        assert_eq!(batch.file_names(), vec!["a.jpg", "b.jpg"]);

        batch.clear();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_convert_all_valid() {
        let mut batch = JsBatch::new();
        batch.add_file("photo.jpg".to_string(), test_jpeg(80, 60));
        batch.add_file("other.jpeg".to_string(), test_jpeg(60, 80));

        let result = batch.convert(None).unwrap();
        assert_eq!(result.successful(), 2);
        assert_eq!(result.failed(), 0);
        assert_eq!(result.total(), 2);
        assert!(result.failure_records().is_empty());

        // ZIP local file header
        assert_eq!(&result.archive()[0..4], &[0x50, 0x4B, 0x03, 0x04]);
    }

    #[test]
    fn test_report_failure_is_silent_off_wasm() {
        report_failure(&FailureJs {
            file_name: "bad.jpg".to_string(),
            reason: "Invalid or unsupported image format".to_string(),
        });
    }
}
