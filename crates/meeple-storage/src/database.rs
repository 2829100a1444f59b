// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access is serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::time::Duration;

use meeple_core::MeepleError;
use tracing::debug;

use crate::migrations;

/// How long SQLite waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the single SQLite connection.
///
/// Cloning the inner [`tokio_rusqlite::Connection`] shares the same
/// background thread, so every query still runs one at a time.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open the database, choosing the journal mode, and run migrations.
    pub async fn open_with_options(path: &str, wal_mode: bool) -> Result<Self, MeepleError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| map_tr_err(tokio_rusqlite::Error::Error(e)))?;

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                let mode: String = conn.pragma_update_and_check(
                    None,
                    "journal_mode",
                    "WAL",
                    |row| row.get(0),
                )?;
                debug!(journal_mode = %mode, "journal mode set");
            }
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", true)?;
            conn.busy_timeout(BUSY_TIMEOUT)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| -> Result<(), MeepleError> { migrations::run_migrations(conn) })
            .await
            .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The shared tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL so the main database file holds every committed write.
    pub async fn close(&self) -> Result<(), MeepleError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into [`MeepleError::Storage`].
pub fn map_tr_err<E>(e: tokio_rusqlite::Error<E>) -> MeepleError
where
    tokio_rusqlite::Error<E>: std::fmt::Display,
{
    MeepleError::Storage {
        source: e.to_string().into(),
    }
}
