//! Text generation agents.
//!
//! The pipeline only needs "prompt in, text out". [`TextGenerator`] is that
//! seam; [`OpenAiAgent`] is the production implementation and tests plug in
//! their own.

mod openai;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{Config, agent};
use crate::error::AgentResult;

pub use openai::OpenAiAgent;

/// System prompt for research paper summarization.
pub const RESEARCH_SUMMARY_SYSTEM_PROMPT: &str = "\
You are an AI research paper summarization expert. Your task is to analyze and summarize AI \
research papers in a clear, concise, and detailed manner. For every paper you summarize, consider \
the following key points:

1. **Thoroughness**: Provide a summary that fully encapsulates the essence of the research. \
Highlight key contributions, novel methodologies, experiments, and findings.
2. **Technical Depth**: Explain the methodologies, such as architectures, algorithms, and \
mathematical frameworks.
3. **Contextual Understanding**: Discuss the significance of the research in the broader AI field, \
including how it advances the state of the art or opens new avenues for further research.
4. **Applications and Impact**: Where applicable, describe potential real-world applications and \
societal impacts of the research.
5. **Clarity**: Avoid unnecessary jargon. Keep the summary accessible to a technically literate \
but non-expert audience.

When summarizing:
- Start with a high-level overview (1-2 sentences) that describes the purpose of the paper.
- Summarize the methodology, experiments, results, and conclusions.
- Include significant challenges, limitations, or future work mentioned by the authors.
- Stay accurate and precise, and avoid misinterpreting the content.

Summaries should be reliable for AI researchers, engineers, and students, and suitable for \
inclusion in a research digest or a presentation for colleagues in the AI field.
";

/// Something that turns a prompt into text.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generator name for logs.
    fn name(&self) -> &str;

    /// Run one generation pass.
    async fn generate(&self, prompt: &str) -> AgentResult<String>;
}

/// Fixed agent configuration, also written out as the autosave snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSettings {
    /// Agent name.
    pub agent_name: String,

    /// Chat model.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Context length in tokens.
    pub context_length: usize,

    /// User name attached to requests.
    pub user_name: String,

    /// System instruction.
    pub system_prompt: String,
}

impl AgentSettings {
    /// Settings derived from pipeline configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            context_length: config.context_length,
            ..Self::default()
        }
    }

    /// Rough token estimate for a prompt under these settings.
    ///
    /// Counts the system prompt too, at four characters per token.
    #[must_use]
    pub fn estimate_tokens(&self, prompt: &str) -> usize {
        let chars = self.system_prompt.chars().count() + prompt.chars().count();
        chars.div_ceil(4)
    }

    /// Write the settings as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read settings written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            agent_name: agent::NAME.to_string(),
            model: agent::MODEL.to_string(),
            temperature: agent::TEMPERATURE,
            context_length: agent::CONTEXT_LENGTH,
            user_name: agent::USER_NAME.to_string(),
            system_prompt: RESEARCH_SUMMARY_SYSTEM_PROMPT.to_string(),
        }
    }
}
