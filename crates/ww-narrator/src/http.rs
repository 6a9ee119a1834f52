//! Narrator backed by an OpenAI-compatible chat-completions API.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use ww_engine::{GenerationError, Narrator, SceneContext};

use crate::config::NarratorConfig;
use crate::error::NarratorResult;
use crate::prompt::{SYSTEM_PROMPT, interpretation_prompt, scene_prompt};

/// Temperature for choice interpretation. Kept at zero for repeatable answers.
const INTERPRETATION_TEMPERATURE: f32 = 0.0;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for a chat-completions server.
///
/// Every request is bounded by the configured timeout and never retried.
pub struct ChatNarrator {
    client: Client,
    config: NarratorConfig,
}

impl ChatNarrator {
    /// Create a narrator for the configured server.
    pub fn new(config: NarratorConfig) -> NarratorResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// The narrator's configuration.
    pub fn config(&self) -> &NarratorConfig {
        &self.config
    }

    fn complete(&self, prompt: &str, temperature: f32) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature,
        };

        let mut builder = self.client.post(self.config.completions_url()).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        debug!(model = %self.config.model, "sending chat completion");
        let response = builder.send().map_err(transport_error)?;

        let status = response.status();
        let body = response.text().map_err(transport_error)?;
        if !status.is_success() {
            return Err(GenerationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }
}

impl Narrator for ChatNarrator {
    fn generate_scene(&self, context: &SceneContext) -> Result<String, GenerationError> {
        self.complete(&scene_prompt(context), self.config.temperature)
    }

    fn interpret_choice(
        &self,
        offered: &[String],
        raw_input: &str,
    ) -> Result<String, GenerationError> {
        self.complete(
            &interpretation_prompt(offered, raw_input),
            INTERPRETATION_TEMPERATURE,
        )
    }
}

fn transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Unreachable(e.to_string())
    }
}

/// Extract the first message text from a chat-completions response body.
fn parse_completion(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::InvalidResponse("no choices in response".to_string()))?
        .message
        .content
        .unwrap_or_default();

    let content = content.trim();
    if content.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parses_first_choice() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"  Mist curls between the trunks.\n"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Mist curls between the trunks.");
    }

    #[test]
    fn empty_content_is_an_error() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"   "}}]}"#;
        assert_eq!(parse_completion(body), Err(GenerationError::EmptyResponse));

        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(parse_completion(body), Err(GenerationError::EmptyResponse));
    }

    #[test]
    fn missing_choices_is_invalid() {
        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#),
            Err(GenerationError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_completion("<html>bad gateway</html>"),
            Err(GenerationError::InvalidResponse(_))
        ));
    }

    #[test]
    fn request_shape() {
        let request = ChatRequest {
            model: "llama3.2",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3.2");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn unreachable_server_degrades() {
        let config = NarratorConfig::default()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2));
        let narrator = ChatNarrator::new(config).unwrap();

        let err = narrator
            .interpret_choice(&["Go left".to_string()], "left")
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Unreachable(_) | GenerationError::Timeout
        ));
    }
}
