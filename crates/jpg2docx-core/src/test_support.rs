//! Fixtures shared by the unit tests.

use std::io::{Cursor, Read};

use image::codecs::jpeg::{JpegEncoder, PixelDensity, PixelDensityUnit};
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Gradient RGB pixels so the encoders have something non-trivial to chew on.
fn gradient_pixels(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / width.max(1)) as u8);
            pixels.push((y * 255 / height.max(1)) as u8);
            pixels.push(128);
        }
    }
    pixels
}

fn encode_jpeg(width: u32, height: u32, density: PixelDensity) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, 90);
    encoder.set_pixel_density(density);
    encoder
        .write_image(
            &gradient_pixels(width, height),
            width,
            height,
            ExtendedColorType::Rgb8,
        )
        .unwrap();
    buffer.into_inner()
}

/// Encode a gradient test image as JPEG, with a JFIF header that carries no
/// physical density.
pub(crate) fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode_jpeg(width, height, PixelDensity::default())
}

/// Encode a gradient test image as JPEG declaring `x_dpi` by `y_dpi`.
pub(crate) fn jpeg_bytes_with_dpi(width: u32, height: u32, x_dpi: u16, y_dpi: u16) -> Vec<u8> {
    encode_jpeg(
        width,
        height,
        PixelDensity {
            density: (x_dpi, y_dpi),
            unit: PixelDensityUnit::Inches,
        },
    )
}

/// Rewrite the frame header so the JPEG claims `width` x `height` pixels.
///
/// The scan data is left alone, so only header readers see the new size.
pub(crate) fn with_frame_size(mut jpeg: Vec<u8>, width: u16, height: u16) -> Vec<u8> {
    let mut pos = 2;
    while pos + 4 <= jpeg.len() {
        assert_eq!(jpeg[pos], 0xFF, "lost marker sync at {}", pos);
        let marker = jpeg[pos + 1];
        let length = u16::from_be_bytes([jpeg[pos + 2], jpeg[pos + 3]]) as usize;
        if marker == 0xC0 {
            jpeg[pos + 5..pos + 7].copy_from_slice(&height.to_be_bytes());
            jpeg[pos + 7..pos + 9].copy_from_slice(&width.to_be_bytes());
            return jpeg;
        }
        pos += 2 + length;
    }
    panic!("no baseline frame header found");
}

/// Swap the JFIF header of `jpeg` for an EXIF header declaring the given
/// resolution in dots per inch.
pub(crate) fn with_exif_resolution(jpeg: &[u8], x_dpi: u32, y_dpi: u32) -> Vec<u8> {
    assert_eq!(&jpeg[2..4], &[0xFF, 0xE0], "expected a JFIF header first");
    let app0_length = u16::from_be_bytes([jpeg[4], jpeg[5]]) as usize;
    let rest = &jpeg[4 + app0_length..];

    // Big-endian TIFF with one IFD: XResolution, YResolution, ResolutionUnit
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    for (tag, offset) in [(0x011Au16, 50u32), (0x011B, 58)] {
        tiff.extend_from_slice(&tag.to_be_bytes());
        tiff.extend_from_slice(&5u16.to_be_bytes());
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&offset.to_be_bytes());
    }
    tiff.extend_from_slice(&0x0128u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&[0x00, 0x02, 0x00, 0x00]);
    tiff.extend_from_slice(&0u32.to_be_bytes());
    for dpi in [x_dpi, y_dpi] {
        tiff.extend_from_slice(&dpi.to_be_bytes());
        tiff.extend_from_slice(&1u32.to_be_bytes());
    }
    assert_eq!(tiff.len(), 66);

    let mut payload = b"Exif\x00\x00".to_vec();
    payload.extend_from_slice(&tiff);

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(rest);
    out
}

/// Encode a gradient test image as PNG.
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            &gradient_pixels(width, height),
            width,
            height,
            ExtendedColorType::Rgb8,
        )
        .unwrap();
    buffer
}

/// Open a ZIP buffer for inspection.
pub(crate) fn open_zip(bytes: &[u8]) -> zip::ZipArchive<Cursor<&[u8]>> {
    zip::ZipArchive::new(Cursor::new(bytes)).unwrap()
}

/// All entry names of a ZIP buffer, in central-directory order.
pub(crate) fn zip_entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = open_zip(bytes);
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Read one entry of a ZIP buffer as raw bytes.
pub(crate) fn zip_entry(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = open_zip(bytes);
    let mut file = archive.by_name(name).unwrap();
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).unwrap();
    contents
}

/// Read one entry of a ZIP buffer as UTF-8 text.
pub(crate) fn zip_entry_text(bytes: &[u8], name: &str) -> String {
    String::from_utf8(zip_entry(bytes, name)).unwrap()
}

/// Parse `bytes` as XML and fail the test on anything a strict parser would
/// reject: bad nesting, malformed attributes, stray `&` or characters outside
/// the XML 1.0 range.
pub(crate) fn assert_well_formed(part: &str, bytes: &[u8]) {
    let xml = std::str::from_utf8(bytes)
        .unwrap_or_else(|e| panic!("{} is not UTF-8: {}", part, e));

    if let Some(c) = xml.chars().find(|&c| {
        !(matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && !matches!(c, '\u{FFFE}' | '\u{FFFF}')))
    }) {
        panic!("{} contains U+{:04X}, which XML cannot represent", part, c as u32);
    }

    for (i, _) in xml.match_indices('&') {
        let rest = &xml[i + 1..];
        assert!(
            ["amp;", "lt;", "gt;", "quot;", "apos;", "#"]
                .iter()
                .any(|entity| rest.starts_with(entity)),
            "{} has a bare '&' at byte {}",
            part,
            i
        );
    }

    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
                for attr in e.attributes() {
                    if let Err(err) = attr {
                        panic!("{} has a malformed attribute: {}", part, err);
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    roots += 1;
                }
                for attr in e.attributes() {
                    if let Err(err) = attr {
                        panic!("{} has a malformed attribute: {}", part, err);
                    }
                }
            }
            Ok(Event::End(_)) => {
                depth = depth
                    .checked_sub(1)
                    .unwrap_or_else(|| panic!("{} closes more elements than it opens", part));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("{} is not well-formed: {}", part, e),
        }
    }
    assert_eq!(depth, 0, "{} leaves elements open", part);
    assert_eq!(roots, 1, "{} must have exactly one root element", part);
}

/// Check every XML part of a DOCX package.
pub(crate) fn assert_package_well_formed(docx: &[u8]) {
    for name in zip_entry_names(docx) {
        if name.ends_with(".xml") || name.ends_with(".rels") {
            assert_well_formed(&name, &zip_entry(docx, &name));
        }
    }
}
