// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the chat stack with a [`MockProvider`] and a temp
//! SQLite database. `send_message()` drives one full exchange.

use std::sync::Arc;
use std::time::Duration;

use meeple_agent::{ChatReply, ChatService};
use meeple_config::MeepleConfig;
use meeple_config::model::StorageConfig;
use meeple_core::{MeepleError, ProviderAdapter, StorageAdapter};
use meeple_storage::SqliteStorage;

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    provider_available: bool,
    provider_delay: Option<Duration>,
    timeout: Option<Duration>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            provider_available: true,
            provider_delay: None,
            timeout: None,
        }
    }

    /// Set mock provider replies.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Build the chat service with no model client, as when the API key is missing.
    pub fn without_provider(mut self) -> Self {
        self.provider_available = false;
        self
    }

    /// Make the mock provider wait before each reply.
    pub fn with_provider_delay(mut self, delay: Duration) -> Self {
        self.provider_delay = Some(delay);
        self
    }

    /// Override the model call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the test harness, creating the temp database and chat service.
    pub async fn build(self) -> Result<TestHarness, MeepleError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| MeepleError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = MeepleConfig::default();
        config.storage = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        let storage: Arc<dyn StorageAdapter> = Arc::new(storage);

        let mut mock = MockProvider::with_responses(self.responses);
        if let Some(delay) = self.provider_delay {
            mock = mock.with_delay(delay);
        }
        let mock_provider = Arc::new(mock);

        let provider = self
            .provider_available
            .then(|| mock_provider.clone() as Arc<dyn ProviderAdapter>);

        // Sub-second timeouts do not fit in `gemini.timeout_secs`.
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(config.gemini.timeout_secs));
        let chat = ChatService::new(provider, storage.clone(), config.gemini.model.clone(), timeout);

        Ok(TestHarness {
            mock_provider,
            storage,
            chat: Arc::new(chat),
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock provider and temp storage.
pub struct TestHarness {
    /// The mock model provider, shared with the chat service.
    pub mock_provider: Arc<MockProvider>,
    /// SQLite storage adapter (temp DB, cleaned up on drop).
    pub storage: Arc<dyn StorageAdapter>,
    /// Chat service wired to the mock provider and storage.
    pub chat: Arc<ChatService>,
    /// Configuration the stack was built from.
    pub config: MeepleConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Send a message through the full exchange pipeline.
    pub async fn send_message(&self, text: &str) -> Result<ChatReply, MeepleError> {
        self.chat.handle_message(text).await
    }

    /// Add a reply to the mock provider's queue.
    pub async fn add_provider_response(&self, text: String) {
        self.mock_provider.add_response(text).await;
    }
}
