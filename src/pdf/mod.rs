//! PDF serialization of an [`ExportedDocument`].
//!
//! Pages are written with the base-14 Helvetica faces and, for raster
//! documents, one Flate-compressed DeviceRGB image XObject. Element
//! coordinates are millimetres from the top-left; PDF user space is
//! points from the bottom-left, so every position is converted and
//! flipped here.

mod encoding;

pub use encoding::{encode_win_ansi, win_ansi_byte};

use crate::config::{PageFormat, MM_PER_POINT};
use crate::error::Result;
use crate::layout::metrics::text_width_pt;
use crate::model::{Align, Element, ExportedDocument, Font, PageContent, Raster};
use chrono::{DateTime, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::io::Write;

const PRODUCER: &str = concat!("ticketpdf ", env!("CARGO_PKG_VERSION"));

/// Serialize a document to PDF bytes, stamped with the current time.
pub fn write_document(doc: &ExportedDocument) -> Result<Vec<u8>> {
    write_document_at(doc, Utc::now())
}

/// Serialize a document to PDF bytes with an explicit creation time.
pub fn write_document_at(doc: &ExportedDocument, created: DateTime<Utc>) -> Result<Vec<u8>> {
    let mut pdf = Document::with_version("1.4");
    let pages_id = pdf.new_object_id();

    let fonts = font_resources(&mut pdf);
    let mut kids = Vec::with_capacity(doc.pages.len());
    let mut image_count = 0usize;

    for page in &doc.pages {
        let page_id = write_page(&mut pdf, pages_id, &fonts, doc.format, page, &mut image_count)?;
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(pdf_date(created)),
    };
    if !doc.title.is_empty() {
        info.set("Title", Object::String(encode_win_ansi(&doc.title), StringFormat::Literal));
    }
    let info_id = pdf.add_object(info);
    pdf.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)?;
    log::debug!(
        "wrote {} ({} page(s), {} image(s), {} bytes)",
        doc.filename,
        doc.pages.len(),
        image_count,
        bytes.len()
    );
    Ok(bytes)
}

/// Format a timestamp as a PDF date string.
pub fn pdf_date(time: DateTime<Utc>) -> String {
    time.format("D:%Y%m%d%H%M%SZ").to_string()
}

fn font_resources(pdf: &mut Document) -> Dictionary {
    let mut fonts = Dictionary::new();
    for font in [Font::Helvetica, Font::HelveticaBold] {
        let id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), id);
    }
    fonts
}

fn write_page(
    pdf: &mut Document,
    pages_id: ObjectId,
    fonts: &Dictionary,
    format: PageFormat,
    page: &PageContent,
    image_count: &mut usize,
) -> Result<ObjectId> {
    let page_h = format.height_pt();
    let mut operations = Vec::new();
    let mut xobjects = Dictionary::new();

    for element in &page.elements {
        match element {
            Element::Image { placement, raster } => {
                *image_count += 1;
                let name = format!("Im{}", *image_count);
                let image_id = pdf.add_object(image_stream(raster)?);
                xobjects.set(name.as_str(), image_id);

                let width = pt(placement.width);
                let height = pt(placement.height);
                let x = pt(placement.x);
                let y = page_h - pt(placement.y) - height;
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "cm",
                    vec![real(width), real(0.0), real(0.0), real(height), real(x), real(y)],
                ));
                operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
                operations.push(Operation::new("Q", vec![]));
            }
            Element::Text {
                x,
                y,
                text,
                font,
                size,
                align,
            } => {
                let mut x = pt(*x);
                if *align == Align::Center {
                    x -= text_width_pt(*font, *size, text) / 2.0;
                }
                let y = page_h - pt(*y);
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font.resource_name().as_bytes().to_vec()), real(*size)],
                ));
                operations.push(Operation::new("Td", vec![real(x), real(y)]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            Element::Rule {
                x1,
                y1,
                x2,
                y2,
                width,
            } => {
                operations.push(Operation::new("w", vec![real(*width)]));
                operations.push(Operation::new("m", vec![real(pt(*x1)), real(page_h - pt(*y1))]));
                operations.push(Operation::new("l", vec![real(pt(*x2)), real(page_h - pt(*y2))]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }

    let content = Content { operations }.encode()?;
    let content_id = pdf.add_object(Stream::new(
        dictionary! { "Filter" => "FlateDecode" },
        flate_compress(&content)?,
    ));

    let mut resources = dictionary! { "Font" => fonts.clone() };
    if !xobjects.is_empty() {
        resources.set("XObject", xobjects);
    }

    Ok(pdf.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), real(format.width_pt()), real(page_h)],
        "Resources" => resources,
        "Contents" => content_id,
    }))
}

fn image_stream(raster: &Raster) -> Result<Stream> {
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => raster.width as i64,
        "Height" => raster.height as i64,
        "ColorSpace" => raster.color_space(),
        "BitsPerComponent" => raster.bits_per_component() as i64,
        "Filter" => "FlateDecode",
    };
    Ok(Stream::new(dict, flate_compress(&raster.pixels)?))
}

fn flate_compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn pt(mm: f64) -> f64 {
    mm / MM_PER_POINT
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::layout::{flow_lines, Placement};
    use crate::model::StrategyKind;
    use chrono::TimeZone;

    fn text_document(lines: usize) -> ExportedDocument {
        let config = ExportConfig::default();
        let body: Vec<String> = (0..lines).map(|i| format!("Line {}", i)).collect();
        let mut doc = ExportedDocument::new("t.pdf", StrategyKind::Text, config.format)
            .with_title(config.title.clone());
        for page in flow_lines(&body, &config) {
            doc.add_page(page);
        }
        doc
    }

    #[test]
    fn test_text_document_loads_back() {
        let doc = text_document(70);
        assert_eq!(doc.page_count(), 3);

        let bytes = write_document(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));

        let loaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 3);
    }

    #[test]
    fn test_text_is_extractable() {
        let doc = text_document(3);
        let bytes = write_document(&doc).unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();
        let text = loaded.extract_text(&[1]).unwrap();
        assert!(text.contains("Line 0"));
        assert!(text.contains("Line 2"));
    }

    #[test]
    fn test_raster_document_loads_back() {
        let format = PageFormat::a4();
        let raster = Raster::filled(20, 10, [255, 0, 0]);
        let placement = Placement::fit(format.width_mm, format.height_mm, 20.0, 10.0, 0.95).unwrap();

        let mut page = PageContent::new(1);
        page.push(Element::Image { placement, raster });
        let mut doc = ExportedDocument::new("r.pdf", StrategyKind::Raster, format);
        doc.add_page(page);

        let bytes = write_document(&doc).unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 1);

        let images: Vec<&Stream> = loaded
            .objects
            .values()
            .filter_map(|obj| obj.as_stream().ok())
            .filter(|s| s.dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(&b"Image"[..]))
            .collect();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].dict.get(b"Width").and_then(Object::as_i64).unwrap(), 20);
        assert_eq!(images[0].dict.get(b"Height").and_then(Object::as_i64).unwrap(), 10);
    }

    #[test]
    fn test_empty_document_has_no_pages() {
        let doc = ExportedDocument::new("e.pdf", StrategyKind::Text, PageFormat::a4());
        let bytes = write_document(&doc).unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();
        assert!(loaded.get_pages().is_empty());
    }

    #[test]
    fn test_pdf_date() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(pdf_date(time), "D:20240309140500Z");
    }

    #[test]
    fn test_compress_round_trip() {
        use flate2::read::ZlibDecoder;
        use std::io::Read;

        let data = b"BT /F1 12 Tf ET".repeat(10);
        let compressed = flate_compress(&data).unwrap();
        let mut out = Vec::new();
        ZlibDecoder::new(&compressed[..]).read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
    }
}
