// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat exchange pipeline for the Meeple recommender.
//!
//! A message goes through [`prompt::build_prompt`], the model provider,
//! [`extract::extract_json_payload`] and [`reply::parse_reply`] before
//! [`ChatService`] stores the result atomically.

pub mod exchange;
pub mod extract;
pub mod prompt;
pub mod reply;
pub mod summary;

pub use exchange::{ChatReply, ChatService, now_timestamp};
pub use extract::extract_json_payload;
pub use reply::{Interpretation, parse_reply};
