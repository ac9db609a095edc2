// ABOUTME: HTML to GFM Markdown conversion and Markdown clean-up passes.
// ABOUTME: Uses htmd with ATX headings; code fences get languages inferred from class names.

//! Output format conversion module.
//!
//! `html_to_markdown` is the whole converter: code blocks are lifted out,
//! the rest goes through htmd, fences are put back, and the text is cleaned.

pub mod code;

use dom_query::Document;
use htmd::options::{BulletListMarker, CodeBlockStyle, HeadingStyle, Options};
use htmd::HtmlToMarkdown;
use once_cell::sync::Lazy;
use regex::Regex;

use self::code::{lift_code_blocks, restore_code_blocks};

static ARCHIVE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://web\.archive\.org/web/\d+[a-z_]*/").unwrap());

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

static TRAILING_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

static CONVERTER: Lazy<HtmlToMarkdown> = Lazy::new(|| {
    HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "noscript"])
        .options(Options {
            heading_style: HeadingStyle::Atx,
            code_block_style: CodeBlockStyle::Fenced,
            bullet_list_marker: BulletListMarker::Dash,
            ..Default::default()
        })
        .build()
});

/// Removes web-archive snapshot prefixes, leaving the original URLs.
///
/// `https://web.archive.org/web/20240101120000im_/https://example.com/a.png`
/// becomes `https://example.com/a.png`; text without a prefix is unchanged.
pub fn strip_archive_prefix(text: &str) -> String {
    ARCHIVE_PREFIX_RE.replace_all(text, "").into_owned()
}

/// Collapse more than 2 consecutive newlines to exactly 2.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").into_owned()
}

/// Strip spaces and tabs at the end of every line.
pub fn strip_trailing_whitespace(text: &str) -> String {
    TRAILING_WS_RE.replace_all(text, "").into_owned()
}

/// Clean-up applied to converted Markdown.
pub fn clean_markdown(markdown: &str) -> String {
    let text = strip_archive_prefix(markdown);
    let text = strip_trailing_whitespace(&text);
    let text = collapse_blank_lines(&text);
    text.trim().to_string()
}

/// Convert an HTML fragment to clean GFM Markdown.
///
/// On conversion error, the fragment's plain text is used instead.
pub fn html_to_markdown(html: &str) -> String {
    let doc = Document::from(html);
    let blocks = lift_code_blocks(&doc);

    let body = doc.select("body");
    let prepared = if body.exists() {
        body.inner_html().to_string()
    } else {
        doc.html().to_string()
    };

    let markdown = CONVERTER
        .convert(&prepared)
        .unwrap_or_else(|_| doc.select("body").text().to_string());

    clean_markdown(&restore_code_blocks(&markdown, &blocks))
}
