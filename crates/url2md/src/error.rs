// ABOUTME: Error types for url2md including the ErrorCode enum and ParseError struct.
// ABOUTME: Every failure of a single invocation is one categorized, terminal ParseError.

use std::fmt;

/// Error codes representing different categories of conversion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Usage,
    Fetch,
    Extract,
    Unexpected,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Usage => "usage error",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Extract => "extraction error",
            ErrorCode::Unexpected => "unexpected error",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for conversion operations.
///
/// `Display` renders the user-facing message that ends up in the
/// `{"error": ...}` envelope; `op` and `source` are kept for logs.
#[derive(Debug, thiserror::Error)]
pub struct ParseError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            ErrorCode::Usage => write!(f, "用法: url2md <URL>"),
            ErrorCode::Fetch => write!(f, "无法获取页面内容: {}", self.url),
            ErrorCode::Extract => write!(f, "无法提取文章内容"),
            ErrorCode::Unexpected => match self.source {
                Some(ref src) => write!(f, "{}", src),
                None => write!(f, "{} {}: {}", self.op, self.url, self.code),
            },
        }
    }
}

impl ParseError {
    /// Create a Usage error.
    pub fn usage(op: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Usage,
            url: String::new(),
            op: op.into(),
            source: None,
        }
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Fetch,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an Extract error.
    pub fn extract(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Extract,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an Unexpected error wrapping an arbitrary failure.
    pub fn unexpected(
        url: impl Into<String>,
        op: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Unexpected,
            url: url.into(),
            op: op.into(),
            source: Some(source.into()),
        }
    }

    /// Returns true if this is a Usage error.
    pub fn is_usage(&self) -> bool {
        self.code == ErrorCode::Usage
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns true if this is an Extract error.
    pub fn is_extract(&self) -> bool {
        self.code == ErrorCode::Extract
    }

    /// Returns true if this is an Unexpected error.
    pub fn is_unexpected(&self) -> bool {
        self.code == ErrorCode::Unexpected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_message_names_url() {
        let err = ParseError::fetch("https://example.com/a", "Fetch", None);
        assert_eq!(err.to_string(), "无法获取页面内容: https://example.com/a");
        assert!(err.is_fetch());
    }

    #[test]
    fn extract_message_is_fixed() {
        let err = ParseError::extract(
            "https://example.com/a",
            "Extract",
            Some(anyhow::anyhow!("empty markdown")),
        );
        assert_eq!(err.to_string(), "无法提取文章内容");
        assert!(err.is_extract());
    }

    #[test]
    fn unexpected_uses_source_text() {
        let err = ParseError::unexpected("", "ReadHtml", anyhow::anyhow!("permission denied"));
        assert_eq!(err.to_string(), "permission denied");
        assert!(err.is_unexpected());
        assert!(!err.is_fetch());
    }

    #[test]
    fn usage_has_no_url() {
        let err = ParseError::usage("Args");
        assert!(err.is_usage());
        assert!(err.url.is_empty());
        assert!(err.to_string().contains("<URL>"));
    }
}
