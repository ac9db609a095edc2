// ABOUTME: Lazy-image repair: promotes data-src style attributes into src when src is a placeholder.
// ABOUTME: Also strips web-archive snapshot prefixes from image sources.

use dom_query::{Document, Selection};

use crate::formats::strip_archive_prefix;

/// Attributes lazy loaders park the real image URL in, by priority.
pub const LAZY_SRC_ATTRS: &[&str] = &[
    "data-src",
    "data-original-src",
    "data-actualsrc",
    "data-original",
    "data-lazy-src",
];

/// Sources shorter than this are treated as placeholders or tracking pixels.
const PLACEHOLDER_MAX_CHARS: usize = 10;

const ARCHIVE_MARKER: &str = "web.archive.org/web/";

/// First present, non-empty lazy-load attribute of `img`.
fn real_src(img: &Selection) -> Option<String> {
    for name in LAZY_SRC_ATTRS {
        if let Some(value) = img.attr(name) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Whether `src` looks like a stand-in for the real image.
pub fn is_placeholder(src: &str) -> bool {
    src.is_empty() || src.starts_with("data:image") || src.chars().count() < PLACEHOLDER_MAX_CHARS
}

fn fix_image(img: &Selection) {
    let current = img.attr("src").map(|s| s.to_string()).unwrap_or_default();

    if is_placeholder(&current) {
        if let Some(real) = real_src(img) {
            img.set_attr("src", &real);
        }
    }

    let src = img.attr("src").map(|s| s.to_string()).unwrap_or_default();
    if src.contains(ARCHIVE_MARKER) {
        let cleaned = strip_archive_prefix(&src);
        if !cleaned.is_empty() && cleaned != src {
            img.set_attr("src", &cleaned);
        }
    }
}

/// Repairs every `img` in the document in place. Returns the number of images seen.
pub fn fix_lazy_images(doc: &Document) -> usize {
    let images = doc.select("img");
    let mut seen = 0;
    for img in images.iter() {
        fix_image(&img);
        seen += 1;
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src_of(doc: &Document, css: &str) -> Option<String> {
        doc.select(css).attr("src").map(|s| s.to_string())
    }

    #[test]
    fn promotes_data_src_over_base64_placeholder() {
        let doc = Document::from(
            r#"<img id="a" src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" data-src="https://cdn.example.com/a.png">"#,
        );
        fix_lazy_images(&doc);
        assert_eq!(
            src_of(&doc, "#a").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[test]
    fn fills_missing_and_short_src() {
        let doc = Document::from(
            r#"<img id="missing" data-original="https://cdn.example.com/m.png">
               <img id="short" src="x.gif" data-actualsrc="https://cdn.example.com/s.png">"#,
        );
        fix_lazy_images(&doc);
        assert_eq!(
            src_of(&doc, "#missing").as_deref(),
            Some("https://cdn.example.com/m.png")
        );
        assert_eq!(
            src_of(&doc, "#short").as_deref(),
            Some("https://cdn.example.com/s.png")
        );
    }

    #[test]
    fn attribute_priority_is_fixed() {
        let doc = Document::from(
            r#"<img id="p" data-lazy-src="https://cdn.example.com/last.png"
                    data-original-src="https://cdn.example.com/second.png"
                    data-src="">"#,
        );
        fix_lazy_images(&doc);
        // empty data-src is skipped; data-original-src outranks data-lazy-src
        assert_eq!(
            src_of(&doc, "#p").as_deref(),
            Some("https://cdn.example.com/second.png")
        );
    }

    #[test]
    fn real_sources_are_left_alone() {
        let doc = Document::from(
            r#"<img id="r" src="https://cdn.example.com/real.png" data-src="https://cdn.example.com/other.png">"#,
        );
        fix_lazy_images(&doc);
        assert_eq!(
            src_of(&doc, "#r").as_deref(),
            Some("https://cdn.example.com/real.png")
        );
    }

    #[test]
    fn placeholder_without_lazy_attr_is_kept() {
        let doc = Document::from(r#"<img id="k" src="a.gif">"#);
        fix_lazy_images(&doc);
        assert_eq!(src_of(&doc, "#k").as_deref(), Some("a.gif"));
    }

    #[test]
    fn strips_archive_prefix_from_src() {
        let doc = Document::from(
            r#"<img id="w" src="https://web.archive.org/web/20240101120000im_/https://example.com/a.png">"#,
        );
        fix_lazy_images(&doc);
        assert_eq!(
            src_of(&doc, "#w").as_deref(),
            Some("https://example.com/a.png")
        );
    }

    #[test]
    fn strips_archive_prefix_from_promoted_src() {
        let doc = Document::from(
            r#"<img id="z" src="" data-src="https://web.archive.org/web/2024id_/https://example.com/b.jpg">"#,
        );
        fix_lazy_images(&doc);
        assert_eq!(
            src_of(&doc, "#z").as_deref(),
            Some("https://example.com/b.jpg")
        );
    }

    #[test]
    fn placeholder_detection() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("data:image/png;base64,AAAA"));
        assert!(is_placeholder("p.gif"));
        assert!(!is_placeholder("https://example.com/x.png"));
    }

    #[test]
    fn counts_images() {
        let doc = Document::from("<p><img src='https://a.example/1.png'><img></p>");
        assert_eq!(fix_lazy_images(&doc), 2);
    }
}
