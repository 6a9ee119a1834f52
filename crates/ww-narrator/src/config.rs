//! Configuration for the HTTP narrator.

use std::time::Duration;

use crate::error::{NarratorError, NarratorResult};

/// Default chat-completions server (a local Ollama).
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model name.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Default sampling temperature for scene prose.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable names read by [`NarratorConfig::from_env`].
pub mod env {
    /// Server base URL.
    pub const BASE_URL: &str = "WW_LLM_BASE_URL";
    /// Model name.
    pub const MODEL: &str = "WW_LLM_MODEL";
    /// Bearer token, if the server needs one.
    pub const API_KEY: &str = "WW_LLM_API_KEY";
    /// Sampling temperature.
    pub const TEMPERATURE: &str = "WW_LLM_TEMPERATURE";
    /// Timeout in seconds.
    pub const TIMEOUT_SECS: &str = "WW_LLM_TIMEOUT_SECS";
}

/// Connection settings for [`crate::ChatNarrator`].
#[derive(Debug, Clone, PartialEq)]
pub struct NarratorConfig {
    /// Base URL of the server, without the `/v1/...` path.
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Optional bearer token.
    pub api_key: Option<String>,
    /// Sampling temperature for scene prose.
    pub temperature: f32,
    /// Upper bound on a single request.
    pub timeout: Duration,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl NarratorConfig {
    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> NarratorResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> NarratorResult<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(env::BASE_URL) {
            config = config.with_base_url(&url);
        }
        if let Some(model) = lookup(env::MODEL).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        config.api_key = lookup(env::API_KEY).filter(|k| !k.trim().is_empty());
        if let Some(raw) = lookup(env::TEMPERATURE) {
            config.temperature = parse_setting(env::TEMPERATURE, &raw)?;
        }
        if let Some(raw) = lookup(env::TIMEOUT_SECS) {
            let secs: u64 = parse_setting(env::TIMEOUT_SECS, &raw)?;
            config.timeout = Duration::from_secs(secs.max(1));
        }

        Ok(config)
    }

    /// Set the server base URL. Trailing slashes are dropped.
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

fn parse_setting<T: std::str::FromStr>(key: &str, raw: &str) -> NarratorResult<T> {
    raw.trim().parse().map_err(|_| NarratorError::InvalidSetting {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = NarratorConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, NarratorConfig::default());
        assert_eq!(
            config.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn reads_all_settings() {
        let config = NarratorConfig::from_lookup(lookup(&[
            (env::BASE_URL, "http://127.0.0.1:1234/"),
            (env::MODEL, "local-model"),
            (env::API_KEY, "secret"),
            (env::TEMPERATURE, "0.2"),
            (env::TIMEOUT_SECS, "15"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:1234");
        assert_eq!(config.model, "local-model");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn blank_values_ignored() {
        let config =
            NarratorConfig::from_lookup(lookup(&[(env::MODEL, "  "), (env::API_KEY, "")])).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn bad_number_rejected() {
        let err = NarratorConfig::from_lookup(lookup(&[(env::TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(err.to_string().contains(env::TIMEOUT_SECS));
    }

    #[test]
    fn builder_methods() {
        let config = NarratorConfig::default()
            .with_base_url("http://llm.local//")
            .with_model("mistral")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://llm.local");
        assert_eq!(config.model, "mistral");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
