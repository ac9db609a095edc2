// ABOUTME: Fenced code block handling: language inference from class names and fence rendering.
// ABOUTME: Pre blocks are swapped for placeholders before conversion and rendered back afterwards.

use dom_query::{Document, Selection};
use once_cell::sync::Lazy;
use regex::Regex;

/// Class names taken verbatim as a fence language (prism/hljs style).
pub const KNOWN_LANGUAGES: &[&str] = &[
    "python",
    "javascript",
    "java",
    "cpp",
    "c",
    "go",
    "rust",
    "typescript",
    "bash",
    "shell",
    "sql",
    "html",
    "css",
    "json",
    "yaml",
    "xml",
    "ruby",
    "php",
    "kotlin",
    "swift",
    "scala",
    "r",
    "matlab",
    "lua",
    "perl",
];

// language-python, lang-js, highlight-go
static PREFIXED_CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:language|lang|highlight)-(\w+)").unwrap());

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"URL2MDCODE(\d+)BLOCK").unwrap());

static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?\s*>").unwrap());

/// Infers a fence language from a whitespace-separated class list.
///
/// A `language-`/`lang-`/`highlight-` prefixed class wins over a bare
/// known language name anywhere in the list.
pub fn detect_code_language(classes: &str) -> Option<String> {
    let prefixed = classes.split_whitespace().find_map(|cls| {
        PREFIXED_CLASS_RE
            .captures(cls)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    });
    prefixed.or_else(|| {
        classes
            .split_whitespace()
            .find(|cls| KNOWN_LANGUAGES.contains(cls))
            .map(str::to_string)
    })
}

/// A `pre` block lifted out of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub code: String,
}

impl CodeBlock {
    /// Renders the block as a fenced code block, one entry per line.
    pub fn fence_lines(&self) -> Vec<String> {
        let longest_run = self
            .code
            .split(|c| c != '`')
            .map(str::len)
            .max()
            .unwrap_or(0);
        let fence = "`".repeat(longest_run.max(2) + 1);

        let mut lines = Vec::new();
        lines.push(format!(
            "{}{}",
            fence,
            self.language.as_deref().unwrap_or_default()
        ));
        lines.extend(self.code.lines().map(str::to_string));
        lines.push(fence);
        lines
    }
}

fn placeholder(index: usize) -> String {
    format!("URL2MDCODE{}BLOCK", index)
}

fn block_language(pre: &Selection) -> Option<String> {
    pre.attr("class")
        .and_then(|classes| detect_code_language(&classes))
        .or_else(|| {
            pre.select("code")
                .first()
                .attr("class")
                .and_then(|classes| detect_code_language(&classes))
        })
}

/// Text of a `pre` block with `<br>` line breaks kept as newlines.
fn code_text(pre: &Selection) -> String {
    let inner = BR_RE.replace_all(&pre.inner_html(), "\n").into_owned();
    let text = Document::from(inner.as_str()).select("body").text();
    text.trim_start_matches(['\n', '\r']).trim_end().to_string()
}

/// Replaces every `pre` element with a placeholder paragraph and returns the
/// lifted blocks, indexed by placeholder number.
pub fn lift_code_blocks(doc: &Document) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    for pre in doc.select("pre").iter() {
        let language = block_language(&pre);
        let code = code_text(&pre);

        pre.replace_with_html(format!("<p>{}</p>", placeholder(blocks.len())));
        blocks.push(CodeBlock { language, code });
    }
    blocks
}

/// Prefix for the continuation lines of a block that sat behind `prefix`
/// (list markers become indentation, quote markers are kept).
fn continuation_prefix(prefix: &str) -> String {
    prefix
        .chars()
        .map(|c| if c == '>' { '>' } else { ' ' })
        .collect()
}

/// Substitutes placeholders in converted Markdown with their fenced blocks.
pub fn restore_code_blocks(markdown: &str, blocks: &[CodeBlock]) -> String {
    if blocks.is_empty() {
        return markdown.to_string();
    }

    let mut out: Vec<String> = Vec::new();
    for line in markdown.lines() {
        let Some(caps) = PLACEHOLDER_RE.captures(line) else {
            out.push(line.to_string());
            continue;
        };
        let (Some(whole), Some(index)) = (caps.get(0), caps.get(1)) else {
            out.push(line.to_string());
            continue;
        };
        let Some(block) = index
            .as_str()
            .parse::<usize>()
            .ok()
            .and_then(|i| blocks.get(i))
        else {
            out.push(line.to_string());
            continue;
        };

        let prefix = &line[..whole.start()];
        let rest = line[whole.end()..].trim();
        let continuation = continuation_prefix(prefix);
        for (i, fence_line) in block.fence_lines().into_iter().enumerate() {
            let lead = if i == 0 { prefix } else { continuation.as_str() };
            out.push(format!("{}{}", lead, fence_line));
        }
        if !rest.is_empty() {
            out.push(format!("{}{}", continuation, rest));
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_prefixed_classes() {
        assert_eq!(detect_code_language("language-python"), Some("python".into()));
        assert_eq!(detect_code_language("hljs lang-js"), Some("js".into()));
        assert_eq!(detect_code_language("highlight-go x"), Some("go".into()));
    }

    #[test]
    fn prefixed_word_stops_at_non_word_char() {
        assert_eq!(detect_code_language("language-c++"), Some("c".into()));
    }

    #[test]
    fn detects_bare_known_names() {
        assert_eq!(detect_code_language("hljs rust"), Some("rust".into()));
        assert_eq!(detect_code_language("r"), Some("r".into()));
    }

    #[test]
    fn prefixed_class_wins_over_earlier_bare_name() {
        assert_eq!(
            detect_code_language("python language-ruby"),
            Some("ruby".into())
        );
    }

    #[test]
    fn unknown_classes_give_no_language() {
        assert_eq!(detect_code_language("hljs prettyprint"), None);
        assert_eq!(detect_code_language("Python"), None);
        assert_eq!(detect_code_language(""), None);
    }

    #[test]
    fn fence_grows_past_backticks_in_code() {
        let block = CodeBlock {
            language: None,
            code: "let s = ```;".to_string(),
        };
        let lines = block.fence_lines();
        assert_eq!(lines.first().map(String::as_str), Some("````"));
        assert_eq!(lines.last().map(String::as_str), Some("````"));
    }

    #[test]
    fn lifts_pre_blocks_with_language() {
        let doc = Document::from(
            r#"<div><pre class="line-numbers"><code class="language-rust">fn main() {}
</code></pre><pre class="python">print(1)<br>print(2)</pre></div>"#,
        );
        let blocks = lift_code_blocks(&doc);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language.as_deref(), Some("rust"));
        assert_eq!(blocks[0].code, "fn main() {}");
        assert_eq!(blocks[1].language.as_deref(), Some("python"));
        assert_eq!(blocks[1].code, "print(1)\nprint(2)");
        assert!(doc.html().contains("URL2MDCODE0BLOCK"));
        assert!(doc.select("pre").is_empty());
    }

    #[test]
    fn restores_blocks_in_place() {
        let blocks = vec![CodeBlock {
            language: Some("go".into()),
            code: "a := 1\nb := 2".into(),
        }];
        let md = "Intro\n\nURL2MDCODE0BLOCK\n\nOutro";
        assert_eq!(
            restore_code_blocks(md, &blocks),
            "Intro\n\n```go\na := 1\nb := 2\n```\n\nOutro"
        );
    }

    #[test]
    fn restores_blocks_inside_quotes() {
        let blocks = vec![CodeBlock {
            language: None,
            code: "x\ny".into(),
        }];
        assert_eq!(
            restore_code_blocks("> URL2MDCODE0BLOCK", &blocks),
            "> ```\n> x\n> y\n> ```"
        );
    }
}
