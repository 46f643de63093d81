use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::parse::Document;

const SNIPPET_CHARS: usize = 1000;
const QA_CONTEXT_CHARS: usize = 1500;

/// Structural element counts for one page. Fixed shape: every category is
/// always present, zero when nothing matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralAnalysis {
    pub links: usize,
    pub headings: usize,
    pub paragraphs: usize,
    pub tables: usize,
    pub images: usize,
    pub lists: usize,
}

/// Count each category independently. Complete and deterministic for a given
/// document.
pub fn analyze(doc: &Document) -> StructuralAnalysis {
    let count = |css: &str| doc.count(&Selector::parse(css).unwrap());
    StructuralAnalysis {
        links: count("a[href]"),
        headings: count("h1, h2, h3"),
        paragraphs: count("p"),
        tables: count("table"),
        images: count("img"),
        lists: count("ul, ol"),
    }
}

/// One human-readable line per non-zero category, in fixed category order
/// (never reordered by magnitude).
pub fn suggest(analysis: &StructuralAnalysis) -> Vec<String> {
    let lines = [
        (analysis.links, "links found"),
        (analysis.headings, "titles and headings"),
        (analysis.paragraphs, "text paragraphs"),
        (analysis.tables, "tables"),
        (analysis.images, "images"),
        (analysis.lists, "lists"),
    ];
    lines
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("- {count} {label}"))
        .collect()
}

/// The three text views of a page that must stay mutually consistent: all are
/// derived from one full-text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub full_text: String,
    pub snippet: String,
    pub qa_context: String,
}

impl PageReport {
    pub fn new(full_text: String) -> Self {
        let snippet = if full_text.chars().count() > SNIPPET_CHARS {
            format!("{}...", take_chars(&full_text, SNIPPET_CHARS))
        } else {
            full_text.clone()
        };
        let qa_context = take_chars(&full_text, QA_CONTEXT_CHARS).to_string();
        Self {
            full_text,
            snippet,
            qa_context,
        }
    }
}

/// Character-based prefix; byte slicing would split multibyte sequences.
fn take_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
