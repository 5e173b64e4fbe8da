//! OpenAI-compatible chat-completions backend.

use serde::{Deserialize, Serialize};

use super::{GeneratorError, TextGenerator};
use crate::config::GeneratorConfig;

/// Chat completion message
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

/// Chat completion response (non-streaming)
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Text generator talking to `{base_url}/chat/completions`.
///
/// Must be called from a blocking context (the engine runs it inside
/// `spawn_blocking`).
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    config: GeneratorConfig,
}

impl OpenAiGenerator {
    /// Creates a generator; fails when the configuration has no API key.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        if config.api_key.is_none() {
            return Err(GeneratorError::Unavailable(
                "no API key configured".to_string(),
            ));
        }
        Ok(Self { config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

impl TextGenerator for OpenAiGenerator {
    fn complete(&self, prompt: &str, temperature: f32) -> Result<String, GeneratorError> {
        // The blocking client owns a runtime of its own, so it is built and
        // dropped on the calling thread.
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()?;

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature,
        };

        let mut builder = client.post(self.endpoint()).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        log::debug!(
            "Requesting completion from {} (model {}, temperature {temperature})",
            self.config.base_url,
            self.config.model
        );
        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GeneratorError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json()?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(GeneratorError::EmptyResponse);
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        let err = OpenAiGenerator::new(GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GeneratorError::Unavailable(_)));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let generator = OpenAiGenerator::new(GeneratorConfig {
            api_key: Some("sk-test".to_string()),
            base_url: "http://localhost:9999/v1/".to_string(),
            ..GeneratorConfig::default()
        })
        .unwrap();
        assert_eq!(generator.endpoint(), "http://localhost:9999/v1/chat/completions");
        assert_eq!(generator.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_response_shape_parses() {
        let raw = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"hi"},"finish_reason":"stop"}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hi");
    }

    #[test]
    fn test_unreachable_server_is_an_error() {
        let generator = OpenAiGenerator::new(GeneratorConfig {
            api_key: Some("sk-test".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: std::time::Duration::from_secs(2),
            ..GeneratorConfig::default()
        })
        .unwrap();
        assert!(generator.complete("hello", 0.2).is_err());
    }
}
