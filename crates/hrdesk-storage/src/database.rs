// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite connection lifecycle: PRAGMA setup, WAL mode, migrations.
//!
//! Every statement runs on tokio-rusqlite's single background thread, so
//! writes are serialized. Do not open a second connection for writes.

use hrdesk_core::HrDeskError;
use tracing::debug;

use crate::migrations;

/// Convert a tokio-rusqlite error into [`HrDeskError::StoreUnavailable`].
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> HrDeskError {
    HrDeskError::StoreUnavailable {
        source: Box::new(e),
    }
}

/// An open, migrated SQLite database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path` and apply migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, HrDeskError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(HrDeskError::store)?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| HrDeskError::StoreUnavailable {
                source: e.to_string().into(),
            })?;

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            }
            conn.execute_batch(
                "PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(|e| HrDeskError::StoreUnavailable {
                source: format!("migration failed: {e}").into(),
            })?;

        debug!(path, wal_mode, "chat history database opened");
        Ok(Self { conn })
    }

    /// The shared background connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Flush the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), HrDeskError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}
