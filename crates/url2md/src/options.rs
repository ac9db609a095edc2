// ABOUTME: Configuration options for url2md including Options and the fluent ClientBuilder.
// ABOUTME: Holds fetch timeouts, the browser header set, and the archive fallback settings.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;
use crate::error::ParseError;

/// Browser User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Snapshot endpoint prefix; the original URL is appended verbatim.
pub const DEFAULT_ARCHIVE_BASE: &str = "https://web.archive.org/web/2024/";

/// Configuration options for the url2md client.
#[derive(Debug, Clone)]
pub struct Options {
    /// Timeout for the direct fetch.
    pub timeout: Duration,
    /// Timeout for the archive snapshot fetch.
    pub archive_timeout: Duration,
    pub user_agent: String,
    /// Extra request headers, sent on both attempts.
    pub headers: HashMap<String, String>,
    pub archive_base: String,
    pub archive_fallback: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            archive_timeout: Duration::from_secs(20),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: HashMap::new(),
            archive_base: DEFAULT_ARCHIVE_BASE.to_string(),
            archive_fallback: true,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the direct fetch timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the archive fetch timeout.
    pub fn archive_timeout(mut self, timeout: Duration) -> Self {
        self.opts.archive_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Set the archive snapshot endpoint prefix.
    pub fn archive_base(mut self, base: impl Into<String>) -> Self {
        self.opts.archive_base = base.into();
        self
    }

    /// Enable or disable the archive fallback attempt.
    pub fn archive_fallback(mut self, enabled: bool) -> Self {
        self.opts.archive_fallback = enabled;
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, ParseError> {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fetch_policy() {
        let opts = Options::default();
        assert_eq!(opts.timeout, Duration::from_secs(15));
        assert_eq!(opts.archive_timeout, Duration::from_secs(20));
        assert_eq!(opts.archive_base, "https://web.archive.org/web/2024/");
        assert!(opts.archive_fallback);
        assert!(opts.user_agent.contains("Chrome/120"));
    }

    #[test]
    fn builder_overrides_options() {
        let builder = ClientBuilder::new()
            .timeout(Duration::from_secs(3))
            .archive_timeout(Duration::from_secs(4))
            .archive_base("http://127.0.0.1:1/snap/")
            .archive_fallback(false)
            .header("Referer", "https://example.com/");

        assert_eq!(builder.opts.timeout, Duration::from_secs(3));
        assert_eq!(builder.opts.archive_timeout, Duration::from_secs(4));
        assert_eq!(builder.opts.archive_base, "http://127.0.0.1:1/snap/");
        assert!(!builder.opts.archive_fallback);
        assert_eq!(
            builder.opts.headers.get("Referer").map(String::as_str),
            Some("https://example.com/")
        );
    }
}
