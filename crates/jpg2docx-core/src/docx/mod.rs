//! Minimal WordprocessingML (DOCX) writer.
//!
//! A [`Document`] starts empty and collects inline pictures, one paragraph
//! each. [`Document::save`] renders the package parts with `quick-xml` and
//! zips them into a single buffer:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! docProps/core.xml
//! docProps/app.xml
//! word/document.xml
//! word/_rels/document.xml.rels
//! word/styles.xml
//! word/media/image1.jpeg
//! ```
//!
//! Picture bytes are stored exactly as given.

mod markup;
mod units;

pub use units::{proportional_height, Length, EMU_PER_INCH};

use thiserror::Error;

use crate::container::write_zip;
use crate::decode::ImageInfo;
use markup::InlinePicture;

/// Application name recorded in the document properties.
pub const CREATOR: &str = "jpg2docx";

/// Errors that can occur while building or serializing a document.
#[derive(Debug, Error)]
pub enum DocxError {
    /// The picture has a zero pixel dimension, so no height can be derived.
    #[error("Invalid picture dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The requested display width is zero.
    #[error("Picture width must be greater than zero")]
    ZeroWidth,

    /// Rendering an XML part failed.
    #[error("Failed to render document XML: {0}")]
    Xml(String),

    /// Writing the ZIP package failed.
    #[error("Failed to write document package: {0}")]
    Package(String),
}

impl From<zip::result::ZipError> for DocxError {
    fn from(err: zip::result::ZipError) -> Self {
        DocxError::Package(err.to_string())
    }
}

#[derive(Debug, Clone)]
struct Media {
    part_name: String,
    bytes: Vec<u8>,
}

/// An in-memory word-processing document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pictures: Vec<InlinePicture>,
    media: Vec<Media>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a JPEG picture in its own paragraph, `width` wide.
    ///
    /// The height follows from the pixel aspect ratio and resolution in
    /// `info`.
    pub fn add_picture(
        &mut self,
        name: &str,
        jpeg: &[u8],
        info: ImageInfo,
        width: Length,
    ) -> Result<(), DocxError> {
        if width.is_zero() {
            return Err(DocxError::ZeroWidth);
        }
        if info.is_empty() {
            return Err(DocxError::InvalidDimensions {
                width: info.width,
                height: info.height,
            });
        }
        let height = proportional_height(width, &info).ok_or(
            DocxError::InvalidDimensions {
                width: info.width,
                height: info.height,
            },
        )?;

        let index = self.pictures.len() + 1;
        let target = format!("media/image{}.jpeg", index);
        self.media.push(Media {
            part_name: format!("word/{}", target),
            bytes: jpeg.to_vec(),
        });
        self.pictures.push(InlinePicture {
            id: index,
            rel_id: InlinePicture::rel_id_for(index),
            target,
            name: name.to_string(),
            width,
            height,
        });
        Ok(())
    }

    /// Serialize the document into DOCX bytes.
    pub fn save(&self) -> Result<Vec<u8>, DocxError> {
        let content_types = markup::content_types_xml()?;
        let package_rels = markup::package_rels_xml()?;
        let core = markup::core_props_xml()?;
        let app = markup::app_props_xml()?;
        let document = markup::document_xml(&self.pictures)?;
        let document_rels = markup::document_rels_xml(&self.pictures)?;
        let styles = markup::styles_xml()?;

        let mut entries: Vec<(&str, &[u8])> = vec![
            (markup::CONTENT_TYPES_PART, content_types.as_slice()),
            (markup::PACKAGE_RELS_PART, package_rels.as_slice()),
            (markup::CORE_PROPS_PART, core.as_slice()),
            (markup::APP_PROPS_PART, app.as_slice()),
            (markup::DOCUMENT_PART, document.as_slice()),
            (markup::DOCUMENT_RELS_PART, document_rels.as_slice()),
            (markup::STYLES_PART, styles.as_slice()),
        ];
        entries.extend(
            self.media
                .iter()
                .map(|m| (m.part_name.as_str(), m.bytes.as_slice())),
        );

        Ok(write_zip(entries)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Resolution;
    use crate::test_support::{
        assert_package_well_formed, jpeg_bytes, zip_entry, zip_entry_names, zip_entry_text,
    };

    #[test]
    fn test_empty_document_saves() {
        let bytes = Document::new().save().unwrap();
        let names = zip_entry_names(&bytes);

        assert_eq!(names[0], "[Content_Types].xml");
        assert!(names.contains(&"word/document.xml".to_string()));
        assert!(!names.iter().any(|n| n.starts_with("word/media/")));
    }

    #[test]
    fn test_single_picture_package_layout() {
        let jpeg = jpeg_bytes(8, 6);
        let mut doc = Document::new();
        doc.add_picture("photo.jpg", &jpeg, ImageInfo::new(8, 6), Length::from_inches(6.0))
            .unwrap();

        let bytes = doc.save().unwrap();
        assert_eq!(
            zip_entry_names(&bytes),
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "docProps/core.xml",
                "docProps/app.xml",
                "word/document.xml",
                "word/_rels/document.xml.rels",
                "word/styles.xml",
                "word/media/image1.jpeg",
            ]
        );

        // Media is stored byte-for-byte
        assert_eq!(zip_entry(&bytes, "word/media/image1.jpeg"), jpeg);

        let document = zip_entry_text(&bytes, "word/document.xml");
        assert!(document.contains(r#"<wp:extent cx="5486400" cy="4114800"/>"#));
    }

    #[test]
    fn test_two_pictures_get_distinct_parts() {
        let mut doc = Document::new();
        let width = Length::from_inches(2.0);
        doc.add_picture("a.jpg", &jpeg_bytes(4, 4), ImageInfo::new(4, 4), width)
            .unwrap();
        doc.add_picture("b.jpg", &jpeg_bytes(4, 2), ImageInfo::new(4, 2), width)
            .unwrap();

        let bytes = doc.save().unwrap();
        let names = zip_entry_names(&bytes);
        assert!(names.contains(&"word/media/image1.jpeg".to_string()));
        assert!(names.contains(&"word/media/image2.jpeg".to_string()));

        let rels = zip_entry_text(&bytes, "word/_rels/document.xml.rels");
        assert!(rels.contains(r#"Id="rId2""#));
        assert!(rels.contains(r#"Id="rId3""#));

        let document = zip_entry_text(&bytes, "word/document.xml");
        assert_eq!(document.matches("<w:drawing>").count(), 2);
        assert!(document.contains(r#"cx="1828800" cy="914400""#));
    }

    #[test]
    fn test_add_picture_rejects_zero_dimensions() {
        let mut doc = Document::new();
        let result = doc.add_picture("x.jpg", &[], ImageInfo::new(0, 10), Length::from_inches(6.0));

        assert!(matches!(
            result,
            Err(DocxError::InvalidDimensions { width: 0, height: 10 })
        ));
        let names = zip_entry_names(&doc.save().unwrap());
        assert!(!names.iter().any(|n| n.starts_with("word/media/")));
    }

    #[test]
    fn test_add_picture_rejects_zero_width() {
        let mut doc = Document::new();
        let result = doc.add_picture("x.jpg", &[], ImageInfo::new(10, 10), Length::from_emu(0));
        assert!(matches!(result, Err(DocxError::ZeroWidth)));
    }

    #[test]
    fn test_save_is_deterministic() {
        let jpeg = jpeg_bytes(16, 9);
        let mut doc = Document::new();
        doc.add_picture("wide.jpg", &jpeg, ImageInfo::new(16, 9), Length::from_inches(6.0))
            .unwrap();

        assert_eq!(doc.save().unwrap(), doc.save().unwrap());
    }

    #[test]
    fn test_saved_parts_are_well_formed() {
        let mut doc = Document::new();
        let width = Length::from_inches(6.0);
        for name in ["plain.jpg", "we\u{FFFE}ird & <n>.jpg", "quote\"'\u{1F}.jpeg", "日本語.jpg"] {
            doc.add_picture(name, &jpeg_bytes(8, 6), ImageInfo::new(8, 6), width)
                .unwrap();
        }

        let bytes = doc.save().unwrap();
        assert_package_well_formed(&bytes);

        let document = zip_entry_text(&bytes, "word/document.xml");
        assert!(document.contains(r#"name="weird &amp; &lt;n&gt;.jpg""#));
        assert!(document.contains(r#"name="日本語.jpg""#));
    }

    #[test]
    fn test_add_picture_honours_resolution() {
        let info = ImageInfo::new(800, 600).with_resolution(Resolution::new(72, 96));
        let mut doc = Document::new();
        doc.add_picture("dpi.jpg", &jpeg_bytes(8, 6), info, Length::from_inches(6.0))
            .unwrap();

        let document = zip_entry_text(&doc.save().unwrap(), "word/document.xml");
        assert!(document.contains(r#"<wp:extent cx="5486400" cy="3086100"/>"#));
    }
}
