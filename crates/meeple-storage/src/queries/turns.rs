// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation turn operations.

use meeple_core::MeepleError;
use meeple_core::types::ConversationTurn;
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Insert one turn on an open connection or transaction. Returns the new id.
pub(crate) fn insert_turn_row(
    conn: &rusqlite::Connection,
    user_input: &str,
    robot_output: &str,
    timestamp: &str,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO conversation_turns (user_input, robot_output, timestamp)
         VALUES (?1, ?2, ?3)",
        params![user_input, robot_output, timestamp],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All turns in chronological order. Ties keep insertion order.
pub async fn list_turns(db: &Database) -> Result<Vec<ConversationTurn>, MeepleError> {
    db.connection()
        .call(|conn| -> Result<Vec<ConversationTurn>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, user_input, robot_output, timestamp
                 FROM conversation_turns
                 ORDER BY timestamp ASC, id ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(ConversationTurn {
                    id: row.get(0)?,
                    user_input: row.get(1)?,
                    robot_output: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}
