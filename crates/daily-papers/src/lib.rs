//! Daily Papers Digest
//!
//! Fetches the Hugging Face daily papers feed for a date, validates it into a
//! [`PaperBatch`], renders a Markdown digest and hands that digest to a
//! text-generation agent for summarization.
//!
//! # Pipeline
//!
//! date → raw JSON → validated records → Markdown digest → prompt → summary
//!
//! Hard failures (transport, parse, agent) are returned as errors. A feed with
//! nothing usable in it is a soft failure and comes back as `None`.
//!
//! # Example
//!
//! ```no_run
//! use daily_papers::{Config, DailyPapersClient, OpenAiAgent, Summarizer};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = DailyPapersClient::new(&config)?;
//!     let agent = OpenAiAgent::new(&config)?;
//!
//!     let summarizer = Summarizer::new(client, agent);
//!     if let Some(summary) = summarizer.summarize().await? {
//!         println!("{summary}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod client;
pub mod config;
pub mod digest;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod models;
pub mod summarizer;

pub use agent::{AgentSettings, OpenAiAgent, TextGenerator};
pub use client::DailyPapersClient;
pub use config::Config;
pub use digest::{generate_digest, validate_and_normalize};
pub use error::{AgentError, FetchError, SummarizeError};
pub use models::{PaperBatch, PaperRecord};
pub use summarizer::Summarizer;
