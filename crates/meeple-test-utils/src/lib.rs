// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Meeple integration tests.
//!
//! Provides a scripted model provider and a harness that wires it to a
//! throwaway SQLite store, so the chat pipeline runs without network access.
//!
//! # Components
//!
//! - [`MockProvider`] - Model provider replaying queued replies and errors
//! - [`TestHarness`] - Temp database plus a ready [`meeple_agent::ChatService`]

pub mod harness;
pub mod mock_provider;

pub use harness::TestHarness;
pub use mock_provider::{MockProvider, recommendation_reply};
