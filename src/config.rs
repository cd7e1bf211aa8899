// Runtime settings. Everything comes from environment variables with a
// sensible fallback so the binary runs with zero configuration.

use anyhow::{bail, Context, Result};

/// Public English Wikipedia endpoint.
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
/// Number of hits shown by the search menu entry.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;
/// Width of the article banner and wrapped body.
pub const DEFAULT_WIDTH: usize = 80;

const MIN_WIDTH: usize = 20;

/// Settings resolved once at startup and handed to the client and the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub search_limit: usize,
    pub width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: DEFAULT_API_URL.into(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            width: DEFAULT_WIDTH,
        }
    }
}

impl Settings {
    /// Read `WIKI_API_URL`, `WIKI_SEARCH_LIMIT` and `WIKI_DISPLAY_WIDTH`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but with an injectable lookup, so tests don't
    /// have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(url) = lookup("WIKI_API_URL") {
            let url = url.trim();
            if !url.is_empty() {
                settings.api_url = url.to_string();
            }
        }

        if let Some(raw) = lookup("WIKI_SEARCH_LIMIT") {
            let limit: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("WIKI_SEARCH_LIMIT is not a number: {raw:?}"))?;
            if limit == 0 {
                bail!("WIKI_SEARCH_LIMIT must be at least 1");
            }
            settings.search_limit = limit;
        }

        if let Some(raw) = lookup("WIKI_DISPLAY_WIDTH") {
            let width: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("WIKI_DISPLAY_WIDTH is not a number: {raw:?}"))?;
            if width < MIN_WIDTH {
                bail!("WIKI_DISPLAY_WIDTH must be at least {MIN_WIDTH}, got {width}");
            }
            settings.width = width;
        }

        Ok(settings)
    }
}
