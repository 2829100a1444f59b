// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Meeple recommender chat.
//!
//! Holds the error type, the domain types persisted by the store, and the
//! adapter traits that the storage and model-provider crates implement.

pub mod error;
pub mod text;
pub mod traits;
pub mod types;

pub use error::MeepleError;
pub use types::{AdapterType, HealthStatus};

pub use traits::{PluginAdapter, ProviderAdapter, StorageAdapter};
