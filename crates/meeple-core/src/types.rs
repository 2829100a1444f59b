// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the adapters, the chat pipeline, and the gateway.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::text;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    /// Short label used in health reports.
    pub fn label(&self) -> String {
        match self {
            HealthStatus::Healthy => "healthy".to_string(),
            HealthStatus::Degraded(reason) => format!("degraded: {reason}"),
            HealthStatus::Unhealthy(reason) => format!("unhealthy: {reason}"),
        }
    }
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

// --- Provider types ---

/// A single-prompt request to a generative model.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Full prompt text sent as one user turn.
    pub prompt: String,
}

/// Token accounting reported by the provider, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// The free-text reply of a generative model.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Concatenated reply text.
    pub text: String,
    /// Model version that produced the reply.
    pub model: String,
    pub usage: Option<TokenUsage>,
}

// --- Storage types ---

/// One persisted user message paired with the composed reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationTurn {
    pub id: i64,
    pub user_input: String,
    pub robot_output: String,
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
}

/// One persisted game suggestion extracted from a model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecommendation {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub players: String,
    pub duration: String,
    pub complexity: String,
    pub min_age: String,
    /// RFC 3339 UTC timestamp.
    pub recommended_on: String,
}

impl GameRecommendation {
    /// The emoji-prefixed stats line shown under the description.
    pub fn stats_line(&self) -> String {
        text::stats_line(&self.players, &self.duration, &self.complexity, &self.min_age)
    }
}

/// A recommendation that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecommendation {
    pub name: String,
    pub description: String,
    pub players: String,
    pub duration: String,
    pub complexity: String,
    pub min_age: String,
}

impl NewRecommendation {
    /// The emoji-prefixed stats line shown under the description.
    pub fn stats_line(&self) -> String {
        text::stats_line(&self.players, &self.duration, &self.complexity, &self.min_age)
    }
}

/// Everything one chat exchange writes, committed as a single transaction.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user_input: String,
    pub robot_output: String,
    pub recommendations: Vec<NewRecommendation>,
    /// Timestamp applied to the turn and to every recommendation row.
    pub timestamp: String,
}
