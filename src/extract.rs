use scraper::Selector;

use crate::parse::Document;

/// Named content views a caller can request from a page. Unrecognized names
/// fall back to full-text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCategory {
    Links,
    Headings,
    Paragraphs,
    Everything,
}

impl ContentCategory {
    /// Case-insensitive match against the fixed vocabulary, including the
    /// Portuguese names with and without diacritics.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "links" => Self::Links,
            "headings" | "títulos" | "titulos" => Self::Headings,
            "paragraphs" | "parágrafos" | "paragrafos" => Self::Paragraphs,
            "everything" | "tudo" => Self::Everything,
            _ => Self::Everything,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    Links(Vec<String>),
    Headings(Vec<String>),
    Paragraphs(Vec<String>),
    Text(String),
}

impl ContentView {
    /// Flatten a view into prompt-ready text. List views join entries with
    /// newlines; the text view passes through.
    pub fn into_text(self) -> String {
        match self {
            Self::Links(items) | Self::Headings(items) | Self::Paragraphs(items) => {
                items.join("\n")
            }
            Self::Text(text) => text,
        }
    }
}

pub fn extract(doc: &Document, category: ContentCategory) -> ContentView {
    match category {
        ContentCategory::Links => {
            let sel = Selector::parse("a[href]").unwrap();
            let links = doc
                .select(&sel)
                .filter_map(|a| a.value().attr("href"))
                .map(str::to_string)
                .collect();
            ContentView::Links(links)
        }
        ContentCategory::Headings => {
            let sel = Selector::parse("h1, h2, h3").unwrap();
            ContentView::Headings(element_texts(doc, &sel))
        }
        ContentCategory::Paragraphs => {
            let sel = Selector::parse("p").unwrap();
            ContentView::Paragraphs(element_texts(doc, &sel))
        }
        ContentCategory::Everything => ContentView::Text(doc.full_text()),
    }
}

fn element_texts(doc: &Document, sel: &Selector) -> Vec<String> {
    doc.select(sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Document {
        Document::parse(html)
    }

    #[test]
    fn links_skip_anchors_without_href() {
        let d = doc(
            "<body><a href=\"/first\">a</a><a name=\"anchor\">b</a>\
             <a href=\"https://example.com\">c</a></body>",
        );
        assert_eq!(
            extract(&d, ContentCategory::Links),
            ContentView::Links(vec!["/first".into(), "https://example.com".into()])
        );
    }

    #[test]
    fn links_are_raw_and_unresolved() {
        let d = doc("<body><a href=\"../up?q=1\">x</a><a href=\"../up?q=1\">y</a></body>");
        // no resolution, no dedup
        assert_eq!(
            extract(&d, ContentCategory::Links),
            ContentView::Links(vec!["../up?q=1".into(), "../up?q=1".into()])
        );
    }

    #[test]
    fn headings_cover_h1_to_h3_in_document_order() {
        let d = doc("<body><h2> Second </h2><h1>First</h1><h3>Third</h3><h4>skip</h4></body>");
        assert_eq!(
            extract(&d, ContentCategory::Headings),
            ContentView::Headings(vec!["Second".into(), "First".into(), "Third".into()])
        );
    }

    #[test]
    fn paragraphs_are_trimmed() {
        let d = doc("<body><p>  spaced  </p><p>plain</p></body>");
        assert_eq!(
            extract(&d, ContentCategory::Paragraphs),
            ContentView::Paragraphs(vec!["spaced".into(), "plain".into()])
        );
    }

    #[test]
    fn category_parse_is_case_insensitive_with_variants() {
        assert_eq!(ContentCategory::parse("LINKS"), ContentCategory::Links);
        assert_eq!(ContentCategory::parse("Títulos"), ContentCategory::Headings);
        assert_eq!(ContentCategory::parse("titulos"), ContentCategory::Headings);
        assert_eq!(
            ContentCategory::parse("parágrafos"),
            ContentCategory::Paragraphs
        );
        assert_eq!(ContentCategory::parse("tudo"), ContentCategory::Everything);
    }

    #[test]
    fn unknown_category_falls_back_to_everything() {
        assert_eq!(
            ContentCategory::parse("images"),
            ContentCategory::Everything
        );
        let d = doc("<body><p>alpha</p><p>beta</p></body>");
        assert_eq!(
            extract(&d, ContentCategory::parse("nonsense")),
            ContentView::Text("alpha\nbeta".into())
        );
    }

    #[test]
    fn view_flattens_to_prompt_text() {
        let view = ContentView::Headings(vec!["a".into(), "b".into()]);
        assert_eq!(view.into_text(), "a\nb");
    }
}
