use std::collections::HashMap;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object};
use press_release::assemble::press_release;
use press_release::decorator::footer_text;
use press_release::fonts;
use press_release::model::Background;
use press_release::RenderedPdf;
use sha2::{Digest, Sha256};

const SKIP_HINT: &str =
    "fonts missing. Install Liberation Sans or set PRESS_RELEASE_FONTS_DIR.";

fn render_press_release() -> Option<RenderedPdf> {
    if !fonts::default_fonts_available() {
        return None;
    }

    Some(press_release().render().expect("render press release"))
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    for tag in [&b"/CreationDate"[..], b"/ModDate", b"/Producer"] {
        let mut open = tag.to_vec();
        open.push(b'(');
        scrub_segment(&mut normalized, &open, b')');
        open.insert(tag.len(), b' ');
        scrub_segment(&mut normalized, &open, b')');
    }
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/ID [", b']');
    scrub_xml(&mut normalized, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    scrub_xml(&mut normalized, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    scrub_xml(
        &mut normalized,
        b"<xmp:MetadataDate>",
        b"</xmp:MetadataDate>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:DocumentID>",
        b"</xmpMM:DocumentID>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:InstanceID>",
        b"</xmpMM:InstanceID>",
    );
    scrub_xml(&mut normalized, b"<xmpMM:VersionID>", b"</xmpMM:VersionID>");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    let digest = Sha256::digest(&normalized);
    digest.into()
}

fn info_string(document: &Document, key: &[u8]) -> Option<String> {
    let id = document
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .ok()?;
    let bytes = document
        .get_object(id)
        .and_then(Object::as_dict)
        .and_then(|info| info.get(key))
        .and_then(Object::as_str)
        .ok()?;
    Some(String::from_utf8_lossy(bytes).into_owned())
}

fn outline_count(document: &Document) -> Option<i64> {
    let outlines = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .and_then(|id| document.get_object(id))
        .and_then(Object::as_dict)
        .and_then(|catalog| catalog.get(b"Outlines"))
        .and_then(Object::as_reference)
        .and_then(|id| document.get_object(id))
        .and_then(Object::as_dict)
        .ok()?;
    outlines.get(b"Count").and_then(Object::as_i64).ok()
}

fn page_operations(document: &Document, page: u32) -> Vec<Operation> {
    let page_id = document.get_pages()[&page];
    let content = document.get_page_content(page_id).expect("page content");
    Content::decode(&content).expect("decode page content").operations
}

fn numbers(operation: &Operation) -> Vec<f64> {
    operation
        .operands
        .iter()
        .filter_map(|operand| operand.as_float().ok().map(f64::from))
        .collect()
}

/// Operands of the first `re` that is filled right away, with the fill colour
/// set before it.
fn first_filled_rect(operations: &[Operation]) -> Option<(Vec<f64>, Vec<f64>)> {
    let index = operations
        .windows(2)
        .position(|pair| pair[0].operator == "re" && pair[1].operator == "f")?;
    let colour = operations[..index]
        .iter()
        .rev()
        .find(|operation| operation.operator == "rg")?;
    Some((numbers(&operations[index]), numbers(colour)))
}

fn close(actual: &[f64], expected: &[f64]) -> bool {
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected)
            .all(|(a, e)| (a - e).abs() < 0.05)
}

/// Glyph id to character table from a font's `ToUnicode` CMap.
fn glyph_table(document: &Document, font: &Dictionary) -> HashMap<u16, char> {
    let mut table = HashMap::new();
    let Ok(stream) = font
        .get(b"ToUnicode")
        .and_then(Object::as_reference)
        .and_then(|id| document.get_object(id))
        .and_then(Object::as_stream)
    else {
        return table;
    };
    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let mut in_block = false;
    for line in String::from_utf8_lossy(&data).lines() {
        let line = line.trim();
        if line.ends_with("beginbfchar") {
            in_block = true;
        } else if line == "endbfchar" {
            in_block = false;
        } else if in_block {
            let codes: Vec<&str> = line
                .split(|c| c == '<' || c == '>')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect();
            if let [glyph, unicode] = codes[..] {
                let glyph = u16::from_str_radix(glyph, 16).ok();
                let unicode = u32::from_str_radix(unicode, 16).ok().and_then(char::from_u32);
                if let (Some(glyph), Some(unicode)) = (glyph, unicode) {
                    table.insert(glyph, unicode);
                }
            }
        }
    }
    table
}

fn push_glyphs(operands: &[Object], table: &HashMap<u16, char>, text: &mut String) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => {
                for pair in bytes.chunks(2) {
                    if let [high, low] = pair {
                        if let Some(c) = table.get(&u16::from_be_bytes([*high, *low])) {
                            text.push(if *c == '\u{a0}' { ' ' } else { *c });
                        }
                    }
                }
            }
            Object::Array(items) => push_glyphs(items, table, text),
            _ => {}
        }
    }
}

/// Text shown on `page`, decoded glyph by glyph.
fn page_text(document: &Document, page: u32) -> String {
    let page_id = document.get_pages()[&page];
    let tables: HashMap<Vec<u8>, HashMap<u16, char>> = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, glyph_table(document, font)))
        .collect();

    let mut font = None;
    let mut text = String::new();
    for operation in page_operations(document, page) {
        match operation.operator.as_str() {
            "Tf" => {
                font = operation
                    .operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .map(<[u8]>::to_vec);
            }
            "Tj" | "TJ" => {
                if let Some(table) = font.as_ref().and_then(|name| tables.get(name)) {
                    push_glyphs(&operation.operands, table, &mut text);
                }
            }
            _ => {}
        }
    }
    text
}

#[test]
fn renders_every_section() {
    let Some(pdf) = render_press_release() else {
        eprintln!("Skipping renders_every_section: {}", SKIP_HINT);
        return;
    };

    let document = Document::load_mem(&pdf.bytes).expect("parse rendered PDF");
    let pages = document.get_pages().len();
    assert!(pages >= 5, "expected at least 5 pages, got {}", pages);
    assert_eq!(pages, pdf.page_count);
    assert_eq!(pdf.schedule.len(), pdf.page_count);
}

#[test]
fn backgrounds_alternate_across_sections() {
    let Some(pdf) = render_press_release() else {
        eprintln!("Skipping backgrounds_alternate_across_sections: {}", SKIP_HINT);
        return;
    };

    let section_backgrounds: Vec<Background> = pdf
        .section_pages
        .iter()
        .map(|page| pdf.schedule.background_for(*page))
        .collect();
    assert_eq!(
        section_backgrounds,
        vec![
            Background::Dark,
            Background::Light,
            Background::Dark,
            Background::Light,
            Background::Light,
        ]
    );
    assert_eq!(pdf.schedule.background_for(1), Background::Dark);
    assert!(pdf.section_pages.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn metadata_and_outline_are_written() {
    let Some(pdf) = render_press_release() else {
        eprintln!("Skipping metadata_and_outline_are_written: {}", SKIP_HINT);
        return;
    };

    let document = Document::load_mem(&pdf.bytes).expect("parse rendered PDF");
    assert_eq!(
        info_string(&document, b"Title").as_deref(),
        Some("SOJAI - Press Release 2026")
    );
    assert_eq!(info_string(&document, b"Author").as_deref(), Some("SOJAI"));
    assert_eq!(outline_count(&document), Some(5));
}

#[test]
fn page_counter_restarts_for_every_build() {
    let Some(first) = render_press_release() else {
        eprintln!("Skipping page_counter_restarts_for_every_build: {}", SKIP_HINT);
        return;
    };
    let Some(second) = render_press_release() else {
        return;
    };

    assert_eq!(first.page_count, second.page_count);
    assert_eq!(first.schedule, second.schedule);
    assert_eq!(first.section_pages, second.section_pages);
}

#[test]
fn rendering_is_deterministic() {
    let Some(pdf_a) = render_press_release() else {
        eprintln!("Skipping rendering_is_deterministic: {}", SKIP_HINT);
        return;
    };
    let Some(pdf_b) = render_press_release() else {
        return;
    };

    assert_eq!(pdf_a.bytes.len(), pdf_b.bytes.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&pdf_a.bytes),
        normalized_hash(&pdf_b.bytes),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn writes_the_output_file() {
    if !fonts::default_fonts_available() {
        eprintln!("Skipping writes_the_output_file: {}", SKIP_HINT);
        return;
    }

    let path = std::env::temp_dir().join(format!(
        "press_release_test_{}.pdf",
        std::process::id()
    ));
    let written = press_release::build_pdf_to(&path).expect("write press release");
    assert_eq!(written, path);

    let bytes = std::fs::read(&path).expect("read output");
    assert!(bytes.starts_with(b"%PDF"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn cover_page_is_filled_dark() {
    let Some(pdf) = render_press_release() else {
        eprintln!("Skipping cover_page_is_filled_dark: {}", SKIP_HINT);
        return;
    };

    let document = Document::load_mem(&pdf.bytes).expect("parse rendered PDF");
    let (rect, colour) =
        first_filled_rect(&page_operations(&document, 1)).expect("page 1 has a filled rectangle");
    assert!(close(&rect, &[0.0, 0.0, 595.28, 841.89]), "fill covers {:?}", rect);
    assert!(close(&colour, &[26.0 / 255.0, 26.0 / 255.0, 46.0 / 255.0]));

    let light_page = pdf.section_pages[1] as u32;
    let (rect, colour) = first_filled_rect(&page_operations(&document, light_page))
        .expect("announcement page has a filled rectangle");
    assert!(close(&rect, &[0.0, 0.0, 595.28, 841.89]));
    assert!(close(&colour, &[1.0, 1.0, 1.0]));
}

#[test]
fn footers_name_every_page_but_the_cover() {
    let Some(pdf) = render_press_release() else {
        eprintln!("Skipping footers_name_every_page_but_the_cover: {}", SKIP_HINT);
        return;
    };

    let document = Document::load_mem(&pdf.bytes).expect("parse rendered PDF");
    assert!(!page_text(&document, 1).contains("|  Page"));
    for page in 2..=pdf.page_count {
        let text = page_text(&document, page as u32);
        let footer = footer_text(page).expect("footer after the cover");
        assert!(text.contains(&footer), "page {} text: {:?}", page, text);
    }
}
