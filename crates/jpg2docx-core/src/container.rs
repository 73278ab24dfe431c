//! In-memory ZIP writing shared by the document and archive writers.
//!
//! Both DOCX packages and the download bundle are ZIP containers. Entries are
//! deflated and stamped with the DOS epoch (1980-01-01 00:00) so the same
//! input always produces the same bytes.

use std::io::{Cursor, Write};

use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

/// Write `entries` into a fresh ZIP buffer, in iteration order.
///
/// Entry names must be unique; the zip writer rejects duplicates.
pub(crate) fn write_zip<'a, I>(entries: I) -> ZipResult<Vec<u8>>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(name, entry_options())?;
        zip.write_all(data)?;
    }
    Ok(zip.finish()?.into_inner())
}
