use scraper::{Html, Selector};

/// Tags removed from every parsed page before extraction or analysis runs.
/// Noise reduction, not an HTML correctness requirement.
const STRIP_TAGS: [&str; 5] = ["script", "style", "iframe", "meta", "noscript"];

/// A parsed page after noise-element stripping. Owned by one request and
/// dropped with it; stripped nodes are gone for good.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(raw_html: &str) -> Self {
        let mut html = Html::parse_document(raw_html);

        let unwanted: Vec<_> = html
            .tree
            .nodes()
            .filter(|node| {
                node.value()
                    .as_element()
                    .map_or(false, |el| STRIP_TAGS.contains(&el.name()))
            })
            .map(|node| node.id())
            .collect();
        for id in unwanted {
            if let Some(mut node) = html.tree.get_mut(id) {
                node.detach();
            }
        }

        Self { html }
    }

    /// Count the elements matching a CSS selector group.
    pub fn count(&self, selector: &Selector) -> usize {
        self.html.select(selector).count()
    }

    pub fn select<'a>(&'a self, selector: &'a Selector) -> scraper::html::Select<'a, 'a> {
        self.html.select(selector)
    }

    /// Canonical visible-text extraction: every text node of the cleaned
    /// tree, trimmed, empties dropped, joined with newlines. The snippet,
    /// the QA context and the "everything" category all derive from this
    /// one string.
    pub fn full_text(&self) -> String {
        self.html
            .root_element()
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_noise_elements() {
        let doc = Document::parse(
            "<html><head><meta charset=\"utf-8\"><style>p{color:red}</style></head>\
             <body><script>var x = 1;</script><noscript>enable js</noscript>\
             <iframe src=\"/ad\"></iframe><p>kept</p></body></html>",
        );
        let text = doc.full_text();
        assert_eq!(text, "kept");
        assert!(!text.contains("var x"));
        assert!(!text.contains("enable js"));
        assert!(!text.contains("color:red"));
    }

    #[test]
    fn stripped_elements_invisible_to_selectors() {
        let doc = Document::parse("<body><script>x</script><p>a</p></body>");
        let sel = Selector::parse("script").unwrap();
        assert_eq!(doc.count(&sel), 0);
    }

    #[test]
    fn full_text_joins_blocks_with_newlines() {
        let doc = Document::parse("<body><h1>Title</h1><p>one</p><p> two </p></body>");
        assert_eq!(doc.full_text(), "Title\none\ntwo");
    }

    #[test]
    fn tolerates_malformed_markup() {
        let doc = Document::parse("<p>unclosed <b>bold");
        assert!(doc.full_text().contains("unclosed"));
    }

    #[test]
    fn empty_input_yields_empty_text() {
        assert_eq!(Document::parse("").full_text(), "");
    }
}
