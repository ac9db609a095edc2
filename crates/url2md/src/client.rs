// ABOUTME: The url2md Client: fetches a page, extracts the article and converts it to Markdown.
// ABOUTME: Also exposes the offline extraction pipeline for already-fetched HTML.

use std::time::Duration;

use dom_query::Document;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use tracing::{debug, info};

use crate::dom::cleaners::remove_noise;
use crate::dom::images::fix_lazy_images;
use crate::error::ParseError;
use crate::extractors::article::extract;
use crate::extractors::compiled::precompile_selectors;
use crate::extractors::platforms::{all_selectors, SelectorChain};
use crate::formats::html_to_markdown;
use crate::options::{ClientBuilder, Options};
use crate::resource;
use crate::result::Article;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_ZH: &str = "zh-CN,zh;q=0.9,en;q=0.8";
const MAX_REDIRECTS: usize = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Trims `raw` and prepends `https://` unless it already starts with `http`.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Runs the extraction pipeline over fetched HTML.
///
/// `url` only selects the platform profile; nothing is fetched. Fails with
/// an Extract error when the converted content is empty.
pub fn extract_article(html: &str, url: &str) -> Result<Article, ParseError> {
    let chain = SelectorChain::for_url(url);
    match chain.platform() {
        Some(profile) => debug!(url = %url, platform = profile.domain, "platform resolved"),
        None => debug!(url = %url, "no platform matched, using generic selectors"),
    }

    let doc = Document::from(html);
    let images = fix_lazy_images(&doc);
    let removed = remove_noise(&doc, chain.noise());
    debug!(images = images, removed = removed, "document normalized");

    let extraction = extract(&doc, &chain);
    let content = html_to_markdown(&extraction.content_html);
    if content.is_empty() {
        return Err(ParseError::extract(
            url,
            "Extract",
            Some(anyhow::anyhow!("content converted to empty markdown")),
        ));
    }

    let mut article = Article {
        title: extraction.title,
        description: extraction.description,
        content,
    };
    article.fill_description();
    Ok(article)
}

/// The main url2md client.
pub struct Client {
    opts: Options,
    http_client: reqwest::blocking::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ParseError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_ZH));

        let http_client = reqwest::blocking::Client::builder()
            .user_agent(&opts.user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .connect_timeout(CONNECT_TIMEOUT)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| ParseError::unexpected("", "BuildClient", e))?;

        precompile_selectors(all_selectors());

        Ok(Self { opts, http_client })
    }

    /// Fetch the page behind `url` (direct, then archive snapshot) and
    /// convert it.
    pub fn parse(&self, url: &str) -> Result<Article, ParseError> {
        let url = normalize_url(url);
        let html = self.fetch_html(&url)?;
        info!(url = %url, chars = html.chars().count(), "page fetched");
        extract_article(&html, &url)
    }

    /// Convert already-fetched HTML; `url` selects the platform profile.
    pub fn parse_html(&self, html: &str, url: &str) -> Result<Article, ParseError> {
        extract_article(html, &normalize_url(url))
    }

    /// Fetch the decoded HTML of `url` without extracting anything.
    pub fn fetch_html(&self, url: &str) -> Result<String, ParseError> {
        resource::fetch_html(&self.http_client, url, &self.opts)
    }
}
