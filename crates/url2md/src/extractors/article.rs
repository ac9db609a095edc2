// ABOUTME: Article field extraction: title, meta description and main content HTML.
// ABOUTME: Walks a SelectorChain (platform first, generic after) over an already cleaned document.

use dom_query::Document;
use tracing::debug;

use crate::extractors::platforms::SelectorChain;
use crate::extractors::select::{first_html_with_min_text, first_text, meta_content, select_first};

/// A content candidate must carry more than this many characters of text.
pub const MIN_CONTENT_CHARS: usize = 100;

const META_DESCRIPTION: &str = r#"meta[name="description"]"#;

/// Raw fields pulled out of the document, before Markdown conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub title: String,
    pub description: String,
    /// Serialized subtree (tags included) of the chosen content element.
    pub content_html: String,
}

pub fn extract_title(doc: &Document, chain: &SelectorChain) -> String {
    first_text(doc, chain.title()).unwrap_or_default()
}

pub fn extract_description(doc: &Document) -> String {
    meta_content(doc, META_DESCRIPTION).unwrap_or_default()
}

/// Picks the first qualifying content candidate, falling back to `body` and
/// then to the whole document.
pub fn extract_content_html(doc: &Document, chain: &SelectorChain) -> String {
    if let Some((css, html)) = first_html_with_min_text(doc, chain.content(), MIN_CONTENT_CHARS) {
        debug!(selector = css, "content selector matched");
        return html;
    }

    debug!("no content selector qualified, falling back to body");
    match select_first(doc, "body") {
        Some(body) => body.html().to_string(),
        None => doc.html().to_string(),
    }
}

/// Extracts all three fields in pipeline order.
pub fn extract(doc: &Document, chain: &SelectorChain) -> Extraction {
    Extraction {
        title: extract_title(doc, chain),
        description: extract_description(doc),
        content_html: extract_content_html(doc, chain),
    }
}
