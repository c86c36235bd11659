//! Fetch → digest → prompt → summary.

use crate::agent::TextGenerator;
use crate::client::DailyPapersClient;
use crate::digest::generate_digest;
use crate::error::{FetchResult, SummarizeResult};

/// Wrap a digest in the summarization instruction.
#[must_use]
pub fn build_prompt(digest: &str) -> String {
    format!(
        "Please summarize the following AI research papers with accuracy and precision:\n\n{digest}"
    )
}

/// One-shot daily papers summarizer.
///
/// Holds no state between runs: every call fetches the feed again.
#[derive(Debug, Clone)]
pub struct Summarizer<A> {
    client: DailyPapersClient,
    agent: A,
}

impl<A: TextGenerator> Summarizer<A> {
    /// Create a summarizer from a feed client and a generator.
    pub fn new(client: DailyPapersClient, agent: A) -> Self {
        Self { client, agent }
    }

    /// The generator in use.
    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Summarize today's papers.
    ///
    /// Returns `Ok(None)` when the feed has nothing usable; the agent is not
    /// called in that case.
    ///
    /// # Errors
    ///
    /// Returns fetch errors and agent errors unchanged.
    pub async fn summarize(&self) -> SummarizeResult<Option<String>> {
        self.summarize_date(None).await
    }

    /// Summarize the papers of a `YYYYMMDD` date, or today when `None`.
    ///
    /// # Errors
    ///
    /// Same as [`summarize`](Self::summarize), plus invalid dates.
    pub async fn summarize_date(&self, date: Option<&str>) -> SummarizeResult<Option<String>> {
        let Some(digest) = self.digest_for(date).await? else {
            tracing::warn!("No papers to summarize");
            return Ok(None);
        };

        let prompt = build_prompt(&digest);

        tracing::info!(agent = self.agent.name(), "Summarizing AI research papers");
        match self.agent.generate(&prompt).await {
            Ok(summary) => {
                tracing::info!("Summary generated successfully");
                Ok(Some(summary))
            }
            Err(e) => {
                tracing::error!(error = %e, "An error occurred while generating the summary");
                Err(e.into())
            }
        }
    }

    /// Fetch a date's feed and render the digest without summarizing it.
    ///
    /// # Errors
    ///
    /// Returns fetch errors; an unusable payload is `Ok(None)`.
    pub async fn digest_for(&self, date: Option<&str>) -> FetchResult<Option<String>> {
        let raw = self.client.fetch_batch(date).await?;
        Ok(generate_digest(&raw))
    }
}
