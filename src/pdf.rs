use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::export::ExportError;

// A4 in points, single Helvetica column.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 40;
const FONT_SIZE: i64 = 12;
const LINE_HEIGHT: i64 = 14;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LINE_HEIGHT) as usize;

/// Chunk width in characters. Lines are pre-broken rather than trusting the
/// renderer to wrap arbitrary input.
const LINE_WIDTH: usize = 80;

/// Map text into the Latin-1 range: smart punctuation is folded to its plain
/// ASCII equivalent, zero-width spaces are deleted, and anything still
/// outside the range is dropped. Never fails.
pub fn normalize_latin1(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201c}' | '\u{201d}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            '\u{00a0}' => out.push(' '),
            '\u{200b}' => {}
            c if (c as u32) < 256 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Split on existing line breaks, then into fixed-width chunks.
fn wrap_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        for chunk in chars.chunks(LINE_WIDTH) {
            lines.push(chunk.iter().collect());
        }
    }
    lines
}

// Every char is < 256 after normalization, so one byte per char.
fn latin1_bytes(line: &str) -> Vec<u8> {
    line.chars().map(|c| c as u8).collect()
}

/// Lay normalized text out as successive text blocks in a minimal
/// single-font PDF. Unrepresentable characters have already been folded or
/// dropped; rendering itself never fails on input content.
pub fn render(text: &str) -> Result<Vec<u8>, ExportError> {
    let lines = wrap_lines(&normalize_latin1(text));

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut line_pages: Vec<&[String]> = lines.chunks(LINES_PER_PAGE).collect();
    if line_pages.is_empty() {
        line_pages.push(&[]);
    }

    let mut page_ids = Vec::new();
    for page_lines in line_pages {
        let mut ops = Vec::new();
        let mut y = PAGE_HEIGHT - MARGIN - FONT_SIZE;
        for line in page_lines {
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]));
            ops.push(Operation::new("Td", vec![MARGIN.into(), y.into()]));
            ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(latin1_bytes(line))],
            ));
            ops.push(Operation::new("ET", vec![]));
            y -= LINE_HEIGHT;
        }
        let content = Content { operations: ops };
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Serialize(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let count = page_ids.len() as i64;
    let kids: Vec<Object> = page_ids.into_iter().map(Object::Reference).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Serialize(e.to_string()))?;
    Ok(bytes)
}
