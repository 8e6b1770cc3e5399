use crate::error::{Result, StatsError};

pub const API_KEY_ENV_VAR: &str = "YOUTUBE_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_CHANNEL_ID: &str = "UCc_pE2B8AkSK-o1SRMZtL7g";

/// Largest page the playlistItems endpoint will return.
pub const PAGE_SIZE: u32 = 50;
pub const DEFAULT_STATS_CONCURRENCY: usize = 5;

/// Everything needed to talk to the YouTube Data API.
///
/// Built once by the front-end and handed to [`crate::YoutubeClient`] and
/// [`crate::PlaylistAggregator`]; nothing is read from process-wide state
/// after that.
#[derive(Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub page_size: u32,
    pub stats_concurrency: usize,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: PAGE_SIZE,
            stats_concurrency: DEFAULT_STATS_CONCURRENCY,
        }
    }

    /// Load the API key from `YOUTUBE_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_key(std::env::var(API_KEY_ENV_VAR).ok())
    }

    /// Validate an optional key the way `from_env` does. Blank keys count as missing.
    pub fn from_key(api_key: Option<String>) -> Result<Self> {
        match api_key {
            Some(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(StatsError::MissingCredential {
                env_var: API_KEY_ENV_VAR.to_string(),
            }),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_stats_concurrency(mut self, concurrency: usize) -> Self {
        self.stats_concurrency = concurrency.max(1);
        self
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("stats_concurrency", &self.stats_concurrency)
            .finish()
    }
}
