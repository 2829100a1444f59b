// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Meeple recommender chat.

use thiserror::Error;

/// The primary error type used across all Meeple adapter traits and core operations.
#[derive(Debug, Error)]
pub enum MeepleError {
    /// Configuration errors (invalid TOML, missing credentials, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Model provider errors (network failure, API error, empty candidates).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The model client could not be constructed at startup.
    #[error("model client unavailable: {0}")]
    ProviderUnavailable(String),

    /// The model reply could not be decoded as JSON after fence stripping.
    #[error("model reply is not valid JSON: {message}")]
    ReplyFormat {
        message: String,
        /// The raw reply text as returned by the model.
        raw: String,
    },

    /// The model reply decoded as JSON but did not have the expected shape.
    #[error("unexpected model reply: {0}")]
    Reply(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
