// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Meeple recommender chat.
//!
//! Serves the chat page, the `/chat` exchange endpoint and a health report
//! on top of a shared [`meeple_agent::ChatService`].

pub mod error;
pub mod handlers;
pub mod page;
pub mod server;

pub use error::ChatError;
pub use server::{AppState, ServerConfig, build_router, start_server};
