// ABOUTME: Resource handling module for fetching article pages over HTTP.
// ABOUTME: Applies the acceptance rule, falls back to an archive snapshot once, and decodes charsets.

use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info};

use crate::error::ParseError;
use crate::options::Options;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// A body must be strictly longer than this many characters to be accepted.
pub const MIN_BODY_CHARS: usize = 1000;

/// How many leading characters are inspected for challenge-page markers.
const CHALLENGE_WINDOW_CHARS: usize = 500;

const CHALLENGE_MARKERS: &[&str] = &["<noscript>", "window.onload=setTimeout"];

/// Which acceptance rule a fetch attempt is judged by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// The page itself; challenge pages are rejected.
    Direct,
    /// The archive snapshot; challenge check skipped.
    Archive,
}

/// Why a single fetch attempt was not accepted.
#[derive(Debug, thiserror::Error)]
pub enum Rejection {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("body too large ({0} bytes)")]
    TooLarge(usize),
    #[error("body too short ({0} chars)")]
    TooShort(usize),
    #[error("javascript challenge page")]
    Challenge,
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as UTF-8 text, using charset hints from content-type header.
    pub fn text_utf8(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(charset) = content_type.and_then(extract_charset) {
        if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
            let (decoded, _, _) = encoding.decode(body);
            return decoded.into_owned();
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    lower.split(';').find_map(|part| {
        part.trim()
            .strip_prefix("charset=")
            .map(|charset| charset.trim_matches('"').trim_matches('\'').to_string())
    })
}

/// Heuristic for bot-protection interstitials served instead of the article.
pub fn looks_like_challenge(body: &str) -> bool {
    let head: String = body.chars().take(CHALLENGE_WINDOW_CHARS).collect();
    CHALLENGE_MARKERS.iter().any(|marker| head.contains(marker))
}

/// Build the archive snapshot URL for `url`.
pub fn archive_url(base: &str, url: &str) -> String {
    format!("{}{}", base, url)
}

/// Apply the acceptance rule to a decoded body.
fn accept(text: String, attempt: Attempt) -> Result<String, Rejection> {
    let chars = text.chars().count();
    if chars <= MIN_BODY_CHARS {
        return Err(Rejection::TooShort(chars));
    }
    if attempt == Attempt::Direct && looks_like_challenge(&text) {
        return Err(Rejection::Challenge);
    }
    Ok(text)
}

/// Perform one GET and return the raw response.
pub fn fetch(
    client: &reqwest::blocking::Client,
    url: &str,
    timeout: Duration,
    opts: &Options,
) -> Result<FetchResult, Rejection> {
    let mut request = client.get(url).timeout(timeout);
    for (key, value) in &opts.headers {
        request = request.header(key.as_str(), value.as_str());
    }

    let response = request.send()?;
    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if status != 200 {
        return Err(Rejection::Status(status));
    }

    if let Some(len) = response.content_length() {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(Rejection::TooLarge(len as usize));
        }
    }

    let body = response.bytes()?;
    if body.len() > MAX_CONTENT_LENGTH {
        return Err(Rejection::TooLarge(body.len()));
    }

    Ok(FetchResult {
        final_url,
        content_type,
        body,
    })
}

/// Run a single attempt: fetch, decode and judge it.
fn attempt(
    client: &reqwest::blocking::Client,
    url: &str,
    timeout: Duration,
    kind: Attempt,
    opts: &Options,
) -> Result<String, Rejection> {
    let result = fetch(client, url, timeout, opts)?;
    debug!(
        url = %url,
        final_url = %result.final_url,
        bytes = result.body.len(),
        "response received"
    );
    accept(result.text_utf8(), kind)
}

/// Fetch the HTML for `url`, retrying once against the archive snapshot.
///
/// The URL must already be normalized (scheme present).
pub fn fetch_html(
    client: &reqwest::blocking::Client,
    url: &str,
    opts: &Options,
) -> Result<String, ParseError> {
    let parsed = url::Url::parse(url).map_err(|e| {
        ParseError::fetch(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ParseError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    let rejection = match attempt(client, url, opts.timeout, Attempt::Direct, opts) {
        Ok(html) => return Ok(html),
        Err(rejection) => rejection,
    };
    info!(url = %url, reason = %rejection, "direct fetch rejected");

    if !opts.archive_fallback {
        return Err(ParseError::fetch(
            url,
            "Fetch",
            Some(anyhow::Error::new(rejection)),
        ));
    }

    let snapshot = archive_url(&opts.archive_base, url);
    info!(snapshot = %snapshot, "trying archive snapshot");
    match attempt(client, &snapshot, opts.archive_timeout, Attempt::Archive, opts) {
        Ok(html) => Ok(html),
        Err(rejection) => {
            info!(url = %snapshot, reason = %rejection, "archive fetch rejected");
            Err(ParseError::fetch(
                url,
                "FetchArchive",
                Some(anyhow::Error::new(rejection)),
            ))
        }
    }
}
