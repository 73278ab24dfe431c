//! XML parts of a WordprocessingML package.
//!
//! Parts are emitted event by event through a `quick_xml::Writer`, which
//! escapes every attribute value and text node. Caller-supplied text (the
//! picture names) is additionally stripped of characters XML 1.0 cannot
//! represent at all.

use std::borrow::Cow;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{DocxError, Length, CREATOR};

pub(crate) const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub(crate) const PACKAGE_RELS_PART: &str = "_rels/.rels";
pub(crate) const CORE_PROPS_PART: &str = "docProps/core.xml";
pub(crate) const APP_PROPS_PART: &str = "docProps/app.xml";
pub(crate) const DOCUMENT_PART: &str = "word/document.xml";
pub(crate) const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
pub(crate) const STYLES_PART: &str = "word/styles.xml";

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_WORDML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_OFFICE_RELS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_DRAWINGML: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PICTURE: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_APP_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Relationship id of the styles part; pictures are numbered after it.
const STYLES_REL_ID: &str = "rId1";

/// US Letter, in twentieths of a point.
const PAGE_WIDTH_TWIPS: u32 = 12_240;
const PAGE_HEIGHT_TWIPS: u32 = 15_840;
/// 1" top/bottom and 1.25" left/right leave a 6" text column.
const MARGIN_VERTICAL_TWIPS: u32 = 1_440;
const MARGIN_HORIZONTAL_TWIPS: u32 = 1_800;

/// Whether `c` matches the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Drop characters that cannot appear in an XML document, escaped or not.
pub(crate) fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

/// One inline picture as it appears in the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InlinePicture {
    /// 1-based drawing id, unique within the document.
    pub id: usize,
    /// Relationship id linking the drawing to its media part.
    pub rel_id: String,
    /// Media part path relative to `word/`, e.g. `media/image1.jpeg`.
    pub target: String,
    /// Original file name, kept as the picture's non-visual name.
    pub name: String,
    pub width: Length,
    pub height: Length,
}

impl InlinePicture {
    pub(crate) fn rel_id_for(index: usize) -> String {
        // rId1 belongs to the styles part
        format!("rId{}", index + 1)
    }
}

/// Thin event writer for a single part.
struct PartWriter {
    writer: Writer<Vec<u8>>,
}

impl PartWriter {
    fn new() -> Result<Self, DocxError> {
        let mut part = Self {
            writer: Writer::new(Vec::new()),
        };
        part.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(part)
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), DocxError> {
        self.writer
            .write_event(event)
            .map_err(|e| DocxError::Xml(e.to_string()))
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocxError> {
        self.write(Event::Start(
            BytesStart::new(name).with_attributes(attrs.iter().copied()),
        ))
    }

    fn close(&mut self, name: &str) -> Result<(), DocxError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocxError> {
        self.write(Event::Empty(
            BytesStart::new(name).with_attributes(attrs.iter().copied()),
        ))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), DocxError> {
        self.open(name, &[])?;
        self.write(Event::Text(BytesText::new(&xml_safe(text))))?;
        self.close(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

pub(crate) fn content_types_xml() -> Result<Vec<u8>, DocxError> {
    let overrides = [
        (
            DOCUMENT_PART,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            STYLES_PART,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            CORE_PROPS_PART,
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            APP_PROPS_PART,
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];

    let mut part = PartWriter::new()?;
    part.open("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    part.empty(
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    part.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    part.empty(
        "Default",
        &[("Extension", "jpeg"), ("ContentType", "image/jpeg")],
    )?;
    for (part_name, content_type) in overrides {
        let part_name = format!("/{}", part_name);
        part.empty(
            "Override",
            &[("PartName", part_name.as_str()), ("ContentType", content_type)],
        )?;
    }
    part.close("Types")?;
    Ok(part.finish())
}

fn relationships_xml(relationships: &[(&str, &str, &str)]) -> Result<Vec<u8>, DocxError> {
    let mut part = PartWriter::new()?;
    part.open("Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
    for &(id, kind, target) in relationships {
        part.empty(
            "Relationship",
            &[("Id", id), ("Type", kind), ("Target", target)],
        )?;
    }
    part.close("Relationships")?;
    Ok(part.finish())
}

pub(crate) fn package_rels_xml() -> Result<Vec<u8>, DocxError> {
    relationships_xml(&[
        ("rId1", REL_OFFICE_DOCUMENT, DOCUMENT_PART),
        ("rId2", REL_CORE_PROPS, CORE_PROPS_PART),
        ("rId3", REL_APP_PROPS, APP_PROPS_PART),
    ])
}

pub(crate) fn document_rels_xml(pictures: &[InlinePicture]) -> Result<Vec<u8>, DocxError> {
    let mut relationships = vec![(STYLES_REL_ID, REL_STYLES, "styles.xml")];
    relationships.extend(
        pictures
            .iter()
            .map(|p| (p.rel_id.as_str(), REL_IMAGE, p.target.as_str())),
    );
    relationships_xml(&relationships)
}

/// Core properties. Timestamps are left out so identical input yields an
/// identical package.
pub(crate) fn core_props_xml() -> Result<Vec<u8>, DocxError> {
    let mut part = PartWriter::new()?;
    part.open(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    part.text_element("dc:creator", CREATOR)?;
    part.text_element("cp:revision", "1")?;
    part.close("cp:coreProperties")?;
    Ok(part.finish())
}

pub(crate) fn app_props_xml() -> Result<Vec<u8>, DocxError> {
    let mut part = PartWriter::new()?;
    part.open(
        "Properties",
        &[
            (
                "xmlns",
                "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
            ),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    part.text_element("Application", CREATOR)?;
    part.text_element("DocSecurity", "0")?;
    part.close("Properties")?;
    Ok(part.finish())
}

pub(crate) fn styles_xml() -> Result<Vec<u8>, DocxError> {
    let mut part = PartWriter::new()?;
    part.open("w:styles", &[("xmlns:w", NS_WORDML)])?;
    part.open("w:docDefaults", &[])?;

    part.open("w:rPrDefault", &[])?;
    part.open("w:rPr", &[])?;
    part.empty("w:sz", &[("w:val", "22")])?;
    part.empty("w:szCs", &[("w:val", "22")])?;
    part.close("w:rPr")?;
    part.close("w:rPrDefault")?;

    part.open("w:pPrDefault", &[])?;
    part.open("w:pPr", &[])?;
    part.empty(
        "w:spacing",
        &[("w:after", "200"), ("w:line", "276"), ("w:lineRule", "auto")],
    )?;
    part.close("w:pPr")?;
    part.close("w:pPrDefault")?;

    part.close("w:docDefaults")?;
    part.open(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    part.empty("w:name", &[("w:val", "Normal")])?;
    part.empty("w:qFormat", &[])?;
    part.close("w:style")?;
    part.close("w:styles")?;
    Ok(part.finish())
}

fn write_picture_paragraph(part: &mut PartWriter, picture: &InlinePicture) -> Result<(), DocxError> {
    let cx = picture.width.emu().to_string();
    let cy = picture.height.emu().to_string();
    let id = picture.id.to_string();
    let doc_name = format!("Picture {}", picture.id);
    let name = xml_safe(&picture.name);

    part.open("w:p", &[])?;
    part.open("w:r", &[])?;
    part.open("w:drawing", &[])?;
    part.open(
        "wp:inline",
        &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
    )?;
    part.empty("wp:extent", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    part.empty("wp:docPr", &[("id", id.as_str()), ("name", doc_name.as_str())])?;
    part.open("wp:cNvGraphicFramePr", &[])?;
    part.empty("a:graphicFrameLocks", &[("noChangeAspect", "1")])?;
    part.close("wp:cNvGraphicFramePr")?;

    part.open("a:graphic", &[])?;
    part.open("a:graphicData", &[("uri", NS_PICTURE)])?;
    part.open("pic:pic", &[])?;

    part.open("pic:nvPicPr", &[])?;
    part.empty("pic:cNvPr", &[("id", "0"), ("name", &*name)])?;
    part.empty("pic:cNvPicPr", &[])?;
    part.close("pic:nvPicPr")?;

    part.open("pic:blipFill", &[])?;
    part.empty("a:blip", &[("r:embed", picture.rel_id.as_str())])?;
    part.open("a:stretch", &[])?;
    part.empty("a:fillRect", &[])?;
    part.close("a:stretch")?;
    part.close("pic:blipFill")?;

    part.open("pic:spPr", &[])?;
    part.open("a:xfrm", &[])?;
    part.empty("a:off", &[("x", "0"), ("y", "0")])?;
    part.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    part.close("a:xfrm")?;
    part.open("a:prstGeom", &[("prst", "rect")])?;
    part.empty("a:avLst", &[])?;
    part.close("a:prstGeom")?;
    part.close("pic:spPr")?;

    part.close("pic:pic")?;
    part.close("a:graphicData")?;
    part.close("a:graphic")?;
    part.close("wp:inline")?;
    part.close("w:drawing")?;
    part.close("w:r")?;
    part.close("w:p")
}

pub(crate) fn document_xml(pictures: &[InlinePicture]) -> Result<Vec<u8>, DocxError> {
    let mut part = PartWriter::new()?;
    part.open(
        "w:document",
        &[
            ("xmlns:w", NS_WORDML),
            ("xmlns:r", NS_OFFICE_RELS),
            ("xmlns:wp", NS_WP_DRAWING),
            ("xmlns:a", NS_DRAWINGML),
            ("xmlns:pic", NS_PICTURE),
        ],
    )?;
    part.open("w:body", &[])?;
    for picture in pictures {
        write_picture_paragraph(&mut part, picture)?;
    }

    let page_width = PAGE_WIDTH_TWIPS.to_string();
    let page_height = PAGE_HEIGHT_TWIPS.to_string();
    let vertical = MARGIN_VERTICAL_TWIPS.to_string();
    let horizontal = MARGIN_HORIZONTAL_TWIPS.to_string();
    part.open("w:sectPr", &[])?;
    part.empty("w:pgSz", &[("w:w", page_width.as_str()), ("w:h", page_height.as_str())])?;
    part.empty(
        "w:pgMar",
        &[
            ("w:top", vertical.as_str()),
            ("w:right", horizontal.as_str()),
            ("w:bottom", vertical.as_str()),
            ("w:left", horizontal.as_str()),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    part.close("w:sectPr")?;

    part.close("w:body")?;
    part.close("w:document")?;
    Ok(part.finish())
}
