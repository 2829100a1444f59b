// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the chat tables.

pub mod exchanges;
pub mod recommendations;
pub mod turns;
