// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter for Meeple.
//!
//! Implements [`ProviderAdapter`] on top of the non-streaming
//! `generateContent` REST endpoint.

pub mod client;
pub mod types;

use async_trait::async_trait;
use meeple_config::MeepleConfig;
use meeple_core::error::MeepleError;
use meeple_core::traits::{PluginAdapter, ProviderAdapter};
use meeple_core::types::{
    AdapterType, HealthStatus, ProviderRequest, ProviderResponse, TokenUsage,
};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::GenerateContentRequest;

/// Environment variables consulted, in order, when no key is configured.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Gemini provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` -> `GOOGLE_API_KEY` -> error.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Creates a new Gemini provider from the given configuration.
    pub fn new(config: &MeepleConfig) -> Result<Self, MeepleError> {
        let api_key = resolve_api_key(&config.gemini.api_key)?;
        let client = GeminiClient::new(&api_key, &config.gemini.base_url)?;

        info!(
            model = config.gemini.model,
            base_url = config.gemini.base_url,
            "Gemini provider initialized"
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MeepleError> {
        // No API call: a probe would spend quota.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MeepleError> {
        debug!("Gemini provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, MeepleError> {
        let api_request = GenerateContentRequest::from_prompt(request.prompt);
        let response = self
            .client
            .generate_content(&request.model, &api_request)
            .await?;

        let Some(text) = response.text() else {
            let message = match response.block_reason() {
                Some(reason) => format!("Gemini blocked the prompt: {reason}"),
                None => "Gemini returned no text candidates".to_string(),
            };
            return Err(MeepleError::Provider {
                message,
                source: None,
            });
        };

        let usage = response.usage_metadata.as_ref().map(|u| TokenUsage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        });

        Ok(ProviderResponse {
            text,
            model: response.model_version.unwrap_or(request.model),
            usage,
        })
    }
}

/// Resolves the API key from config or the process environment.
pub fn resolve_api_key(config_key: &Option<String>) -> Result<String, MeepleError> {
    resolve_api_key_with(config_key, |name| std::env::var(name).ok())
}

/// Resolves the API key using `lookup` in place of the process environment.
///
/// Empty values are skipped at every step.
pub fn resolve_api_key_with<F>(config_key: &Option<String>, lookup: F) -> Result<String, MeepleError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    API_KEY_ENV_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|v| !v.is_empty()))
        .ok_or_else(|| {
            MeepleError::Config(
                "Gemini API key not found. Set gemini.api_key in config or the GEMINI_API_KEY environment variable.".into(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn resolve_api_key_from_config() {
        let key = resolve_api_key_with(&Some("AIza-config".into()), no_env).unwrap();
        assert_eq!(key, "AIza-config");
    }

    #[test]
    fn resolve_api_key_prefers_gemini_env_over_google() {
        let key = resolve_api_key_with(&None, |name| match name {
            "GEMINI_API_KEY" => Some("gemini".into()),
            "GOOGLE_API_KEY" => Some("google".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(key, "gemini");
    }

    #[test]
    fn resolve_api_key_empty_values_fall_through() {
        let key = resolve_api_key_with(&Some(String::new()), |name| match name {
            "GEMINI_API_KEY" => Some(String::new()),
            "GOOGLE_API_KEY" => Some("google".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(key, "google");
    }

    #[test]
    fn resolve_api_key_missing_everywhere() {
        let err = resolve_api_key_with(&None, no_env).unwrap_err();
        assert!(matches!(err, MeepleError::Config(_)));
        assert!(err.to_string().contains("API key not found"), "got: {err}");
    }

    fn config_for(server: &MockServer) -> MeepleConfig {
        let mut config = MeepleConfig::default();
        config.gemini.api_key = Some("test-key".into());
        config.gemini.base_url = server.uri();
        config
    }

    fn request(prompt: &str) -> ProviderRequest {
        ProviderRequest {
            model: "gemini-2.5-flash".into(),
            prompt: prompt.into(),
        }
    }

    #[tokio::test]
    async fn complete_returns_text_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "{\"respuesta_corta\": \"hola\"}"}]}}],
                "usageMetadata": {"promptTokenCount": 20, "candidatesTokenCount": 7},
                "modelVersion": "gemini-2.5-flash-001"
            })))
            .mount(&server)
            .await;

        let provider = GeminiProvider::new(&config_for(&server)).unwrap();
        let resp = provider.complete(request("hola")).await.unwrap();
        assert_eq!(resp.text, "{\"respuesta_corta\": \"hola\"}");
        assert_eq!(resp.model, "gemini-2.5-flash-001");
        assert_eq!(
            resp.usage,
            Some(TokenUsage {
                input_tokens: 20,
                output_tokens: 7
            })
        );
    }

    #[tokio::test]
    async fn complete_without_candidates_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let provider = GeminiProvider::new(&config_for(&server)).unwrap();
        let err = provider.complete(request("x")).await.unwrap_err();
        assert!(matches!(err, MeepleError::Provider { .. }));
        assert!(err.to_string().contains("SAFETY"), "got: {err}");
    }

    #[tokio::test]
    async fn provider_metadata() {
        let server = MockServer::start().await;
        let provider = GeminiProvider::new(&config_for(&server)).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.adapter_type(), AdapterType::Provider);
        assert_eq!(provider.health_check().await.unwrap(), HealthStatus::Healthy);
    }
}
