// ABOUTME: Article struct holding the title, description and Markdown content of one converted page.
// ABOUTME: Includes JSON serialization and the description fallback derived from content.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::extractors::select::normalize_whitespace;

/// Maximum length, in characters, of a description derived from content.
pub const DERIVED_DESCRIPTION_CHARS: usize = 150;

/// Markdown syntax characters dropped before deriving a description.
const MARKDOWN_SYNTAX: &[char] = &['#', '*', '`', '[', ']', '(', ')', '!', '\n', '>', '-'];

/// The result of converting a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    /// GFM Markdown body.
    pub content: String,
}

impl Article {
    /// Fills an empty description from the content, if there is any.
    pub fn fill_description(&mut self) {
        if self.description.is_empty() && !self.content.is_empty() {
            self.description = derive_description(&self.content);
        }
    }

    /// Serialize as JSON; non-ASCII text is written literally.
    pub fn to_json(&self, pretty: bool) -> Result<String, ParseError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|e| ParseError::unexpected("", "Serialize", e))
    }
}

/// Plain-text summary of Markdown content: syntax characters removed,
/// whitespace collapsed, cut to 150 characters.
pub fn derive_description(content: &str) -> String {
    let stripped: String = content
        .chars()
        .filter(|c| !MARKDOWN_SYNTAX.contains(c))
        .collect();
    normalize_whitespace(&stripped)
        .chars()
        .take(DERIVED_DESCRIPTION_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derive_description_strips_markdown_syntax() {
        let content = "# Title\n\nSome **bold** and `code` with a [link](https://x.example).\n\n> quote\n- item";
        assert_eq!(
            derive_description(content),
            "TitleSome bold and code with a linkhttps://x.example. quote item"
        );
    }

    #[test]
    fn derive_description_caps_at_150_chars() {
        let content = "字".repeat(400);
        let description = derive_description(&content);
        assert_eq!(description.chars().count(), 150);
        assert!(description.chars().all(|c| c == '字'));
    }

    #[test]
    fn derive_description_of_syntax_only_is_empty() {
        assert_eq!(derive_description("# ---\n> **"), "");
    }

    #[test]
    fn fill_description_keeps_existing_value() {
        let mut article = Article {
            title: "T".into(),
            description: "from meta".into(),
            content: "# Body".into(),
        };
        article.fill_description();
        assert_eq!(article.description, "from meta");
    }

    #[test]
    fn fill_description_derives_when_missing() {
        let mut article = Article {
            content: "## Heading\n\nBody text".into(),
            ..Default::default()
        };
        article.fill_description();
        // newlines are dropped, not turned into spaces
        assert_eq!(article.description, "HeadingBody text");
    }

    #[test]
    fn to_json_has_exactly_three_fields() {
        let article = Article {
            title: "标题".into(),
            description: "描述".into(),
            content: "内容".into(),
        };
        let json = article.to_json(true).expect("serializes");
        assert!(json.contains("\"title\": \"标题\""));

        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let obj = value.as_object().expect("object");
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["content"], "内容");
    }

    #[test]
    fn to_json_compact_is_single_line() {
        let json = Article::default().to_json(false).expect("serializes");
        assert_eq!(json, r#"{"title":"","description":"","content":""}"#);
    }
}
