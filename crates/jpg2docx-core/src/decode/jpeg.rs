//! JPEG validation and header metadata.

use std::io::Cursor;

use exif::{In, Reader, Tag, Value};
use image::{ImageError, ImageFormat, ImageReader};

use super::{DecodeError, ImageInfo, Resolution, DEFAULT_DPI};

/// Validate a JPEG and report its pixel dimensions and declared resolution.
///
/// The header is read first, then the whole image is decoded so a truncated
/// or corrupted scan is rejected here rather than producing a document that
/// word processors cannot render. Images whose pixel buffer would exceed the
/// decoder's memory limit are accepted on the strength of their header alone.
/// The decoded pixels are dropped; only the metadata is kept.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes carry no recognisable
/// image signature, `DecodeError::UnsupportedFormat` for a valid image of
/// another format, `DecodeError::TooLarge` if the header itself breaks the
/// decoder limits, and `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_jpeg(bytes: &[u8]) -> Result<ImageInfo, DecodeError> {
    let (width, height) = jpeg_reader(bytes)?
        .into_dimensions()
        .map_err(map_image_error)?;
    let info = ImageInfo::new(width, height).with_resolution(read_resolution(bytes));

    match jpeg_reader(bytes)?.decode() {
        Ok(_) => Ok(info),
        Err(ImageError::Limits(err)) => {
            tracing::debug!(width, height, %err, "image too large for a full decode, header accepted");
            Ok(info)
        }
        Err(err) => Err(map_image_error(err)),
    }
}

fn jpeg_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    match reader.format() {
        Some(ImageFormat::Jpeg) => Ok(reader),
        Some(other) => Err(DecodeError::UnsupportedFormat(format!("{:?}", other))),
        None => Err(DecodeError::InvalidFormat),
    }
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Limits(e) => DecodeError::TooLarge(e.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DensityUnit {
    Inch,
    Centimetre,
    Unspecified,
}

fn to_dpi(density: f64, unit: DensityUnit) -> u32 {
    match unit {
        DensityUnit::Inch => density.round() as u32,
        DensityUnit::Centimetre => (density * 2.54).round() as u32,
        DensityUnit::Unspecified => DEFAULT_DPI,
    }
}

/// Declared resolution: the JFIF header if present, then EXIF, then 72 dpi.
fn read_resolution(bytes: &[u8]) -> Resolution {
    jfif_resolution(bytes)
        .or_else(|| exif_resolution(bytes))
        .unwrap_or_default()
}

/// Density fields of a JFIF APP0 segment directly after SOI.
fn jfif_resolution(bytes: &[u8]) -> Option<Resolution> {
    let app0 = bytes.get(2..18)?;
    if app0[0..2] != [0xFF, 0xE0] || &app0[4..9] != b"JFIF\0" {
        return None;
    }
    let unit = match app0[11] {
        1 => DensityUnit::Inch,
        2 => DensityUnit::Centimetre,
        _ => DensityUnit::Unspecified,
    };
    let x = u16::from_be_bytes([app0[12], app0[13]]);
    let y = u16::from_be_bytes([app0[14], app0[15]]);
    Some(Resolution::new(
        to_dpi(f64::from(x), unit),
        to_dpi(f64::from(y), unit),
    ))
}

/// `XResolution`/`YResolution` of the primary EXIF image.
fn exif_resolution(bytes: &[u8]) -> Option<Resolution> {
    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;

    let unit = match exif
        .get_field(Tag::ResolutionUnit, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .unwrap_or(2)
    {
        2 => DensityUnit::Inch,
        3 => DensityUnit::Centimetre,
        _ => DensityUnit::Unspecified,
    };
    let dpi = |tag: Tag| match exif.get_field(tag, In::PRIMARY).map(|f| &f.value) {
        Some(Value::Rational(values)) if !values.is_empty() => to_dpi(values[0].to_f64(), unit),
        _ => DEFAULT_DPI,
    };
    Some(Resolution::new(dpi(Tag::XResolution), dpi(Tag::YResolution)))
}
