// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One chat exchange: prompt, model call, interpretation, persistence.

use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use meeple_config::MeepleConfig;
use meeple_core::types::{Exchange, ProviderRequest};
use meeple_core::{MeepleError, ProviderAdapter, StorageAdapter};
use tracing::{debug, info, warn};

use crate::prompt::build_prompt;
use crate::reply::parse_reply;

/// Result of a successful exchange.
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Text returned to the browser as `respuesta`.
    pub respuesta: String,
    /// Id of the stored conversation turn.
    pub turn_id: i64,
    /// Number of recommendation rows written.
    pub recommendations: usize,
}

/// Drives chat exchanges against a model provider and the store.
///
/// `provider` is `None` when the model client could not be built at startup;
/// every exchange then fails with [`MeepleError::ProviderUnavailable`]
/// without touching the store.
pub struct ChatService {
    provider: Option<Arc<dyn ProviderAdapter>>,
    storage: Arc<dyn StorageAdapter>,
    model: String,
    timeout: Duration,
}

impl ChatService {
    pub fn new(
        provider: Option<Arc<dyn ProviderAdapter>>,
        storage: Arc<dyn StorageAdapter>,
        model: String,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            storage,
            model,
            timeout,
        }
    }

    /// Builds a service using the model and timeout from `config`.
    pub fn from_config(
        config: &MeepleConfig,
        provider: Option<Arc<dyn ProviderAdapter>>,
        storage: Arc<dyn StorageAdapter>,
    ) -> Self {
        Self::new(
            provider,
            storage,
            config.gemini.model.clone(),
            Duration::from_secs(config.gemini.timeout_secs),
        )
    }

    pub fn provider(&self) -> Option<&Arc<dyn ProviderAdapter>> {
        self.provider.as_ref()
    }

    pub fn storage(&self) -> &Arc<dyn StorageAdapter> {
        &self.storage
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Runs one exchange for `message`.
    ///
    /// The model is called before anything is written. The turn and its
    /// recommendations are then stored in one transaction, so any error
    /// leaves the store unchanged.
    pub async fn handle_message(&self, message: &str) -> Result<ChatReply, MeepleError> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            MeepleError::ProviderUnavailable("model client was not initialized".to_string())
        })?;

        let request = ProviderRequest {
            model: self.model.clone(),
            prompt: build_prompt(message),
        };

        debug!(model = %self.model, message_len = message.len(), "calling model");
        let response = tokio::time::timeout(self.timeout, provider.complete(request))
            .await
            .map_err(|_| {
                warn!(timeout_secs = self.timeout.as_secs(), "model call timed out");
                MeepleError::Timeout {
                    duration: self.timeout,
                }
            })??;

        if let Some(usage) = response.usage {
            debug!(
                model = %response.model,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "model replied"
            );
        }

        let interpretation = parse_reply(&response.text).inspect_err(|e| {
            if let MeepleError::ReplyFormat { message, raw } = e {
                warn!(error = %message, raw = %raw, "model reply is not valid JSON");
            } else {
                warn!(error = %e, "model reply rejected");
            }
        })?;

        let exchange = Exchange {
            user_input: message.to_string(),
            robot_output: interpretation.output,
            recommendations: interpretation.recommendations,
            timestamp: now_timestamp(),
        };
        let turn_id = self.storage.record_exchange(&exchange).await?;

        info!(
            turn_id,
            recommendations = exchange.recommendations.len(),
            "chat exchange stored"
        );

        Ok(ChatReply {
            respuesta: exchange.robot_output,
            turn_id,
            recommendations: exchange.recommendations.len(),
        })
    }
}

/// Current UTC time as RFC 3339 with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
