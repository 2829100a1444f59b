// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for generative model integrations.

use async_trait::async_trait;

use crate::error::MeepleError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ProviderRequest, ProviderResponse};

/// Adapter for a generative model API.
///
/// One prompt in, one free-text reply out. Callers own timeouts; a provider
/// must not retry on its own.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends the prompt and returns the full reply.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, MeepleError>;
}
