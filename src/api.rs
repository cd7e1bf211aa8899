// API client module: a small blocking HTTP client that talks to the
// MediaWiki action API. Everything is synchronous; one `reqwest` client is
// kept for the lifetime of the process so connections get reused.

use crate::config::Settings;
use crate::error::FetchError;
use anyhow::Context;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sent with every request; Wikimedia asks clients to identify themselves.
pub const USER_AGENT: &str = concat!(
    "wikifetch-cli/",
    env!("CARGO_PKG_VERSION"),
    " (interactive terminal reader)"
);

/// Upper bound the API accepts for `srlimit` on anonymous requests.
pub const MAX_SEARCH_LIMIT: usize = 500;

const MISSING_PAGE_ID: &str = "-1";

/// Result of fetching a single page. `NotFound` covers both "the page does
/// not exist" and "the request failed"; the log tells them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Article {
    Found { title: String, body: String },
    NotFound,
}

impl Article {
    pub fn is_found(&self) -> bool {
        matches!(self, Article::Found { .. })
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Article::Found { title, .. } => Some(title),
            Article::NotFound => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Article::Found { body, .. } => Some(body),
            Article::NotFound => None,
        }
    }

    /// Tuple view `(title, body, found)`. When `found` is false both
    /// strings are `None`.
    pub fn into_parts(self) -> (Option<String>, Option<String>, bool) {
        match self {
            Article::Found { title, body } => (Some(title), Some(body), true),
            Article::NotFound => (None, None, false),
        }
    }
}

/// One hit from `list=search`. Only `title` is relied upon; the remaining
/// fields (pageid, size, wordcount, timestamp...) are kept as-is.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub title: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// The three operations the menu needs. Implementations never fail: errors
/// are logged and turned into `Article::NotFound` or an empty list.
pub trait ArticleSource {
    fn search(&self, query: &str, limit: usize) -> Vec<SearchResult>;
    fn fetch_by_title(&self, title: &str) -> Article;
    fn fetch_random(&self) -> Article;
}

// Wire shapes. The API wraps everything in `{"query": {...}}`, or returns
// `{"error": {...}}` when it rejects the parameters.

#[derive(Deserialize)]
struct Envelope<T> {
    query: Option<T>,
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Deserialize)]
struct PagesQuery {
    pages: BTreeMap<String, PageEntry>,
}

#[derive(Deserialize)]
struct PageEntry {
    title: Option<String>,
    extract: Option<String>,
    missing: Option<serde_json::Value>,
    invalid: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct SearchQuery {
    search: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct RandomQuery {
    random: Vec<RandomPage>,
}

#[derive(Deserialize)]
struct RandomPage {
    title: String,
}

fn unwrap_query<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    if let Some(err) = envelope.error {
        return Err(FetchError::UnexpectedShape(format!(
            "API error {}: {}",
            err.code, err.info
        )));
    }
    envelope
        .query
        .ok_or_else(|| FetchError::UnexpectedShape("missing `query` object".into()))
}

fn parse_page(body: &str) -> Result<Article, FetchError> {
    let query: PagesQuery = unwrap_query(body)?;
    let (page_id, page) = query
        .pages
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::UnexpectedShape("`query.pages` is empty".into()))?;

    if page_id == MISSING_PAGE_ID || page.missing.is_some() || page.invalid.is_some() {
        return Ok(Article::NotFound);
    }

    let title = page
        .title
        .ok_or_else(|| FetchError::UnexpectedShape(format!("page {page_id} has no title")))?;
    let body = page
        .extract
        .ok_or_else(|| FetchError::UnexpectedShape(format!("page {page_id} has no extract")))?;
    Ok(Article::Found { title, body })
}

fn parse_search(body: &str) -> Result<Vec<SearchResult>, FetchError> {
    let query: SearchQuery = unwrap_query(body)?;
    Ok(query.search)
}

fn parse_random(body: &str) -> Result<String, FetchError> {
    let query: RandomQuery = unwrap_query(body)?;
    query
        .random
        .into_iter()
        .next()
        .map(|page| page.title)
        .ok_or_else(|| FetchError::UnexpectedShape("`query.random` is empty".into()))
}

/// Blocking client for the Wikipedia action API.
pub struct WikiClient {
    client: Client,
    base_url: String,
}

impl WikiClient {
    /// Create a client for the given `api.php` endpoint.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(WikiClient {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(settings.api_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one `action=query` GET and return the raw body.
    fn get(&self, params: &[(&str, &str)]) -> Result<String, FetchError> {
        debug!("GET {} {:?}", self.base_url, params);
        let res = self
            .client
            .get(&self.base_url)
            .query(&[("action", "query"), ("format", "json")])
            .query(params)
            .send()?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(res.text()?)
    }

    /// Fetch the full plain-text extract of `title`, following redirects.
    pub fn try_fetch_by_title(&self, title: &str) -> Result<Article, FetchError> {
        if title.trim().is_empty() {
            return Ok(Article::NotFound);
        }
        let body = self.get(&[
            ("titles", title),
            ("prop", "extracts"),
            ("explaintext", "true"),
            ("redirects", "true"),
        ])?;
        parse_page(&body)
    }

    /// Full-text search; at most `limit` results, in API order.
    pub fn try_search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, FetchError> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let limit = limit.min(MAX_SEARCH_LIMIT);
        let srlimit = limit.to_string();
        let body = self.get(&[
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", srlimit.as_str()),
        ])?;
        let mut results = parse_search(&body)?;
        results.truncate(limit);
        Ok(results)
    }

    /// Pick a random main-namespace page, then fetch it by title.
    pub fn try_fetch_random(&self) -> Result<Article, FetchError> {
        let body = self.get(&[("list", "random"), ("rnlimit", "1"), ("rnnamespace", "0")])?;
        let title = parse_random(&body)?;
        info!("Random article: {}", title);
        self.try_fetch_by_title(&title)
    }
}

/// Log prefix that tells a network problem apart from a bad response.
fn failure_kind(err: &FetchError) -> &'static str {
    if err.is_transport() {
        "Network error"
    } else {
        "Unexpected response"
    }
}

impl ArticleSource for WikiClient {
    fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        match self.try_search(query, limit) {
            Ok(results) => results,
            Err(e) => {
                warn!("{} searching Wikipedia for {query:?}: {e}", failure_kind(&e));
                Vec::new()
            }
        }
    }

    fn fetch_by_title(&self, title: &str) -> Article {
        match self.try_fetch_by_title(title) {
            Ok(Article::NotFound) => {
                debug!("No page titled {title:?}");
                Article::NotFound
            }
            Ok(article) => article,
            Err(e) => {
                warn!("{} fetching page {title:?}: {e}", failure_kind(&e));
                Article::NotFound
            }
        }
    }

    fn fetch_random(&self) -> Article {
        self.try_fetch_random().unwrap_or_else(|e| {
            warn!("{} getting random article: {e}", failure_kind(&e));
            Article::NotFound
        })
    }
}
