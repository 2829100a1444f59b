// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the chat history and recommendation tables.

use async_trait::async_trait;

use crate::error::MeepleError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ConversationTurn, Exchange, GameRecommendation};

/// Adapter for the persistence backend.
///
/// Writes are append-only and happen only through [`record_exchange`],
/// which commits the turn and its recommendations atomically.
///
/// [`record_exchange`]: StorageAdapter::record_exchange
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Opens the backend and applies pending migrations.
    async fn initialize(&self) -> Result<(), MeepleError>;

    /// Flushes pending writes and releases the connection.
    async fn close(&self) -> Result<(), MeepleError>;

    /// Persists one exchange in a single transaction. Returns the new turn id.
    async fn record_exchange(&self, exchange: &Exchange) -> Result<i64, MeepleError>;

    /// All turns, oldest first.
    async fn list_turns(&self) -> Result<Vec<ConversationTurn>, MeepleError>;

    /// All recommendations, newest first.
    async fn list_recommendations(&self) -> Result<Vec<GameRecommendation>, MeepleError>;
}
