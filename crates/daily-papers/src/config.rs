//! Configuration for the daily papers pipeline.

use std::path::PathBuf;
use std::time::Duration;

/// Feed and HTTP constants.
pub mod api {
    use std::time::Duration;

    /// Daily papers feed endpoint.
    pub const FEED_URL: &str = "https://huggingface.co/api/daily_papers";

    /// OpenAI-compatible API base URL.
    pub const OPENAI_API: &str = "https://api.openai.com/v1";

    /// Paper page on Hugging Face, suffixed with the paper id.
    pub const PAPER_PAGE_URL: &str = "https://huggingface.co/papers";

    /// arXiv PDF link, suffixed with the paper id.
    pub const PDF_URL: &str = "https://arxiv.org/pdf";

    /// Request timeout (completions over a full day of papers can be slow).
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Summarizer agent defaults.
pub mod agent {
    /// Agent name recorded in snapshots and logs.
    pub const NAME: &str = "AI-Research-Paper-Summarizer";

    /// Chat model.
    pub const MODEL: &str = "gpt-4o-mini";

    /// Sampling temperature.
    pub const TEMPERATURE: f32 = 0.1;

    /// Context length in tokens.
    pub const CONTEXT_LENGTH: usize = 200_000;

    /// User name sent with each completion.
    pub const USER_NAME: &str = "research_team";

    /// Default autosave snapshot file.
    pub const SNAPSHOT_FILE: &str = "ai_research_summarizer.json";
}

/// Pipeline configuration.
#[derive(Clone)]
pub struct Config {
    /// API key for the text generation service.
    pub api_key: Option<String>,

    /// Daily papers feed URL (for testing with mock servers).
    pub feed_url: String,

    /// Chat completions base URL (for testing with mock servers).
    pub agent_base_url: String,

    /// Chat model.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Agent context length in tokens.
    pub context_length: usize,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Where to write the agent settings snapshot, if anywhere.
    pub autosave_path: Option<PathBuf>,
}

impl Config {
    /// Create a new configuration with an optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            feed_url: api::FEED_URL.to_string(),
            agent_base_url: api::OPENAI_API.to_string(),
            model: agent::MODEL.to_string(),
            temperature: agent::TEMPERATURE,
            context_length: agent::CONTEXT_LENGTH,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            autosave_path: None,
        }
    }

    /// Create a test configuration pointing both endpoints at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            feed_url: format!("{}/api/daily_papers", base_url),
            agent_base_url: format!("{}/v1", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `OPENAI_API_KEY`, and optionally `OPENAI_BASE_URL` and
    /// `DAILY_PAPERS_FEED_URL`.
    ///
    /// # Errors
    ///
    /// Returns error if an override URL is not a valid URL.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new(std::env::var("OPENAI_API_KEY").ok());

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            url::Url::parse(&base_url)?;
            config.agent_base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(feed_url) = std::env::var("DAILY_PAPERS_FEED_URL") {
            url::Url::parse(&feed_url)?;
            config.feed_url = feed_url;
        }

        Ok(config)
    }

    /// Enable the agent settings snapshot at `path`.
    #[must_use]
    pub fn with_autosave(mut self, path: impl Into<PathBuf>) -> Self {
        self.autosave_path = Some(path.into());
        self
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("has_api_key", &self.has_api_key())
            .field("feed_url", &self.feed_url)
            .field("agent_base_url", &self.agent_base_url)
            .field("model", &self.model)
            .finish()
    }
}
