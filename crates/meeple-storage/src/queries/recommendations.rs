// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game recommendation operations.

use meeple_core::MeepleError;
use meeple_core::types::{GameRecommendation, NewRecommendation};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Insert one recommendation on an open connection or transaction.
pub(crate) fn insert_recommendation_row(
    conn: &rusqlite::Connection,
    rec: &NewRecommendation,
    recommended_on: &str,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO game_recommendations
             (name, description, players, duration, complexity, min_age, recommended_on)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            rec.name,
            rec.description,
            rec.players,
            rec.duration,
            rec.complexity,
            rec.min_age,
            recommended_on,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All recommendations, most recent first.
pub async fn list_recommendations(db: &Database) -> Result<Vec<GameRecommendation>, MeepleError> {
    db.connection()
        .call(|conn| -> Result<Vec<GameRecommendation>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, name, description, players, duration, complexity, min_age, recommended_on
                 FROM game_recommendations
                 ORDER BY recommended_on DESC, id DESC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(GameRecommendation {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    players: row.get(3)?,
                    duration: row.get(4)?,
                    complexity: row.get(5)?,
                    min_age: row.get(6)?,
                    recommended_on: row.get(7)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}
