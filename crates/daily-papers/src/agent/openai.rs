//! OpenAI-compatible chat completions agent.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AgentSettings, TextGenerator};
use crate::config::Config;
use crate::error::{AgentError, AgentResult};

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    user: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// Single-pass summarizer backed by a chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiAgent {
    client: Client,
    api_key: String,
    base_url: String,
    settings: AgentSettings,
}

impl OpenAiAgent {
    /// Create an agent from pipeline configuration.
    ///
    /// Writes the settings snapshot when `config.autosave_path` is set; a
    /// failed write is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::MissingApiKey`] without a key, or a transport
    /// error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> AgentResult<Self> {
        let api_key = config.api_key.clone().ok_or(AgentError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let agent = Self {
            client,
            api_key,
            base_url: config.agent_base_url.trim_end_matches('/').to_string(),
            settings: AgentSettings::from_config(config),
        };

        if let Some(path) = &config.autosave_path {
            match agent.settings.save(path) {
                Ok(()) => tracing::debug!(path = %path.display(), "Saved agent settings snapshot"),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to save agent settings snapshot");
                }
            }
        }

        Ok(agent)
    }

    /// Replace the agent settings.
    #[must_use]
    pub fn with_settings(mut self, settings: AgentSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    fn check_context(&self, prompt: &str) -> AgentResult<()> {
        let estimated = self.settings.estimate_tokens(prompt);
        let limit = self.settings.context_length;
        if estimated > limit {
            return Err(AgentError::ContextOverflow { estimated, limit });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAiAgent {
    fn name(&self) -> &str {
        &self.settings.agent_name
    }

    async fn generate(&self, prompt: &str) -> AgentResult<String> {
        self.check_context(prompt)?;

        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage { role: "system", content: &self.settings.system_prompt },
                ChatMessage { role: "user", content: prompt },
            ],
            temperature: self.settings.temperature,
            user: &self.settings.user_name,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AgentError::Status { status: status.as_u16(), message });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AgentError::EmptyResponse)
    }
}

impl std::fmt::Debug for OpenAiAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiAgent")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.settings.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let err = OpenAiAgent::new(&Config::default()).unwrap_err();
        assert!(matches!(err, AgentError::MissingApiKey));
    }

    #[test]
    fn test_debug_redacts_key() {
        let agent = OpenAiAgent::new(&Config::new(Some("sk-secret".to_string()))).unwrap();
        let debug = format!("{agent:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_context_overflow_rejected_before_request() {
        let config = Config {
            agent_base_url: "http://127.0.0.1:9".to_string(),
            ..Config::new(Some("key".to_string()))
        };
        let agent = OpenAiAgent::new(&config).unwrap().with_settings(AgentSettings {
            system_prompt: String::new(),
            context_length: 2,
            ..AgentSettings::default()
        });

        let err = agent.generate("way more than eight characters").await.unwrap_err();
        assert!(matches!(err, AgentError::ContextOverflow { limit: 2, .. }));
    }

    #[test]
    fn test_autosave_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.json");
        let config = Config::new(Some("key".to_string())).with_autosave(&path);

        let agent = OpenAiAgent::new(&config).unwrap();
        assert_eq!(&AgentSettings::load(&path).unwrap(), agent.settings());
    }

    #[test]
    fn test_autosave_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("agent.json");
        let config = Config::new(Some("key".to_string())).with_autosave(&path);

        assert!(OpenAiAgent::new(&config).is_ok());
        assert!(!path.exists());
    }
}
