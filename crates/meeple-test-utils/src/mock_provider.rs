// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock model provider for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use meeple_core::MeepleError;
use meeple_core::traits::adapter::PluginAdapter;
use meeple_core::traits::provider::ProviderAdapter;
use meeple_core::types::{
    AdapterType, HealthStatus, ProviderRequest, ProviderResponse, TokenUsage,
};

/// Reply used when the queue is empty: an off-topic fallback with no games.
pub const DEFAULT_REPLY: &str = r#"{"respuesta_corta": "mock response", "recomendaciones": []}"#;

#[derive(Debug, Clone)]
enum Scripted {
    Text(String),
    Error(String),
}

/// A mock model provider that replays scripted outcomes.
///
/// Outcomes are popped from a FIFO queue; when it is empty
/// [`DEFAULT_REPLY`] is returned. Every prompt received is recorded.
pub struct MockProvider {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new mock provider with an empty queue.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Create a mock provider pre-loaded with reply texts.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let provider = Self::new();
        let queue = responses.into_iter().map(Scripted::Text).collect();
        Self {
            script: Arc::new(Mutex::new(queue)),
            ..provider
        }
    }

    /// Sleep for `delay` before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a reply text.
    pub async fn add_response(&self, text: String) {
        self.script.lock().await.push_back(Scripted::Text(text));
    }

    /// Queue a provider error.
    pub async fn add_error(&self, message: &str) {
        self.script
            .lock()
            .await
            .push_back(Scripted::Error(message.to_string()));
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    async fn next(&self) -> Scripted {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Scripted::Text(DEFAULT_REPLY.to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MeepleError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MeepleError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, MeepleError> {
        self.prompts.lock().await.push(request.prompt);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next().await {
            Scripted::Text(text) => Ok(ProviderResponse {
                text,
                model: request.model,
                usage: Some(TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                }),
            }),
            Scripted::Error(message) => Err(MeepleError::Provider {
                message,
                source: None,
            }),
        }
    }
}

/// A well-formed model reply recommending one game per name.
pub fn recommendation_reply(names: &[&str]) -> String {
    let recs: Vec<serde_json::Value> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "description": format!("{name}: un clásico moderno"),
                "players": "2-4 jugadores",
                "duration": "45 minutos",
                "complexity": "Media",
                "min_age": "10+ años"
            })
        })
        .collect();
    serde_json::json!({"respuesta_corta": "", "recomendaciones": recs}).to_string()
}
