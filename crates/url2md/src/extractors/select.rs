// ABOUTME: Selector-based lookups over a parsed document: first non-empty text, first qualifying subtree, meta content.
// ABOUTME: Each selector contributes only its first matching element; selectors are tried in the given order.

use dom_query::{Document, Selection};

use crate::extractors::compiled::get_or_compile;

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Length in characters of the element's text with every text node trimmed,
/// so indentation between tags does not count.
pub fn stripped_text_len(el: &Selection) -> usize {
    el.nodes()
        .iter()
        .flat_map(|node| node.descendants_it())
        .filter(|node| node.is_text())
        .map(|node| node.text().trim().chars().count())
        .sum()
}

/// First element matched by `css`, if the selector is valid and matches.
pub fn select_first<'a>(doc: &'a Document, css: &str) -> Option<Selection<'a>> {
    let matcher = get_or_compile(css)?;
    let first = doc.select_matcher(&matcher).first();
    if first.exists() {
        Some(first)
    } else {
        None
    }
}

/// Returns the normalized text of the first selector whose first match has text.
pub fn first_text<'s, I>(doc: &Document, selectors: I) -> Option<String>
where
    I: IntoIterator<Item = &'s str>,
{
    selectors.into_iter().find_map(|css| {
        let el = select_first(doc, css)?;
        let text = normalize_whitespace(&el.text());
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    })
}

/// Returns the outer HTML of the first selector's first match whose stripped
/// text is longer than `min_chars` characters, with the selector that won.
pub fn first_html_with_min_text<'s, I>(
    doc: &Document,
    selectors: I,
    min_chars: usize,
) -> Option<(&'s str, String)>
where
    I: IntoIterator<Item = &'s str>,
{
    selectors.into_iter().find_map(|css| {
        let el = select_first(doc, css)?;
        if stripped_text_len(&el) > min_chars {
            Some((css, el.html().to_string()))
        } else {
            None
        }
    })
}

/// Returns the trimmed `content` attribute of the first match of `css`.
pub fn meta_content(doc: &Document, css: &str) -> Option<String> {
    let el = select_first(doc, css)?;
    let content = el.attr("content")?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
