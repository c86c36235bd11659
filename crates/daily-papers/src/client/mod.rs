//! Daily papers feed client.
//!
//! One GET per call, no retries and no caching. Every fetch reflects the
//! feed as it is right now.

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::models::FeedDate;

/// Client for the Hugging Face daily papers feed.
#[derive(Clone)]
pub struct DailyPapersClient {
    /// HTTP client.
    client: Client,

    /// Feed endpoint, without query string.
    feed_url: String,
}

impl DailyPapersClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the feed URL is invalid or HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Url::parse(&config.feed_url)?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self { client, feed_url: config.feed_url.clone() })
    }

    /// Feed endpoint this client talks to.
    #[must_use]
    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Download the raw feed for a `YYYYMMDD` date, or today when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidInput`] for a malformed date, a transport
    /// error for network failures and non-2xx responses, and
    /// [`FetchError::Parse`] when the body is not JSON.
    pub async fn fetch_batch(&self, date: Option<&str>) -> FetchResult<Value> {
        let date = match date {
            Some(raw) => FeedDate::parse(raw).inspect_err(|e| {
                tracing::error!(error = %e, "Rejected date argument");
            })?,
            None => FeedDate::today(),
        };

        self.fetch_date(&date).await
    }

    /// Download the raw feed for an already validated date.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_batch`](Self::fetch_batch), minus date validation.
    pub async fn fetch_date(&self, date: &FeedDate) -> FetchResult<Value> {
        let url = self.request_url(date)?;
        tracing::debug!(%url, "Requesting daily papers");

        let result = self.get_json(url).await;
        match &result {
            Ok(_) => tracing::info!(%date, "Successfully downloaded daily papers"),
            Err(e) => tracing::error!(%date, error = %e, "Error downloading daily papers"),
        }
        result
    }

    fn request_url(&self, date: &FeedDate) -> FetchResult<Url> {
        Ok(Url::parse_with_params(&self.feed_url, &[("date", date.to_query())])?)
    }

    async fn get_json(&self, url: Url) -> FetchResult<Value> {
        let response = self.client.get(url).send().await?;
        let response = Self::handle_response(response).await?;

        // Read as text first so a bad body is a parse error, not a transport one.
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Map non-2xx responses to [`FetchError::Status`].
    async fn handle_response(response: reqwest::Response) -> FetchResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(FetchError::Status { status: status.as_u16(), message })
    }
}

impl std::fmt::Debug for DailyPapersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyPapersClient").field("feed_url", &self.feed_url).finish()
    }
}
