// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Meeple recommender chat.
//!
//! Two append-only tables hold the conversation history and every game ever
//! recommended. Access goes through a single `tokio-rusqlite` connection and
//! migrations are embedded with refinery.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
