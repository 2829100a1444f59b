// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Atomic persistence of a full chat exchange.

use meeple_core::MeepleError;
use meeple_core::types::Exchange;

use super::recommendations::insert_recommendation_row;
use super::turns::insert_turn_row;
use crate::database::{Database, map_tr_err};

/// Write the turn and all of its recommendations in one transaction.
///
/// Either every row is committed or none is. Returns the id of the new turn.
pub async fn record_exchange(db: &Database, exchange: &Exchange) -> Result<i64, MeepleError> {
    let exchange = exchange.clone();
    let rec_count = exchange.recommendations.len();
    let turn_id = db
        .connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            let tx = conn.transaction()?;
            for rec in &exchange.recommendations {
                insert_recommendation_row(&tx, rec, &exchange.timestamp)?;
            }
            let turn_id = insert_turn_row(
                &tx,
                &exchange.user_input,
                &exchange.robot_output,
                &exchange.timestamp,
            )?;
            tx.commit()?;
            Ok(turn_id)
        })
        .await
        .map_err(map_tr_err)?;

    tracing::debug!(turn_id, recommendations = rec_count, "exchange recorded");
    Ok(turn_id)
}
