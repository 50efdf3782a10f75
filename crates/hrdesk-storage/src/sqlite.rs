// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of [`MessageLogAdapter`].

use async_trait::async_trait;
use rusqlite::params;
use tracing::debug;

use hrdesk_core::{AdapterType, HealthStatus, HrDeskError, MessageLogAdapter, PluginAdapter};

use crate::database::{Database, map_tr_err};

/// Message log kept in the `message_store` table, one row per record.
pub struct SqliteMessageLog {
    db: Database,
}

impl SqliteMessageLog {
    /// Open the database at `path` and apply migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, HrDeskError> {
        Ok(Self {
            db: Database::open(path, wal_mode).await?,
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteMessageLog {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::MessageLog
    }

    async fn health_check(&self) -> Result<HealthStatus, HrDeskError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HrDeskError> {
        self.db.checkpoint().await?;
        debug!("shutdown: WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl MessageLogAdapter for SqliteMessageLog {
    async fn range(&self, key: &str) -> Result<Vec<String>, HrDeskError> {
        let key = key.to_string();
        self.db
            .connection()
            .call(move |conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT record FROM message_store WHERE session_key = ?1 ORDER BY id ASC",
                )?;
                let rows = stmt.query_map(params![key], |row| row.get(0))?;
                rows.collect()
            })
            .await
            .map_err(map_tr_err)
    }

    async fn push(&self, key: &str, records: &[String]) -> Result<(), HrDeskError> {
        if records.is_empty() {
            return Ok(());
        }
        let key = key.to_string();
        let records = records.to_vec();
        self.db
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                let tx = conn.transaction()?;
                insert_all(&tx, &key, &records)?;
                tx.commit()
            })
            .await
            .map_err(map_tr_err)
    }

    async fn delete(&self, key: &str) -> Result<(), HrDeskError> {
        let key = key.to_string();
        self.db
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "DELETE FROM message_store WHERE session_key = ?1",
                    params![key],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn replace(&self, key: &str, records: &[String]) -> Result<(), HrDeskError> {
        let key = key.to_string();
        let records = records.to_vec();
        self.db
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                let tx = conn.transaction()?;
                tx.execute(
                    "DELETE FROM message_store WHERE session_key = ?1",
                    params![key],
                )?;
                insert_all(&tx, &key, &records)?;
                tx.commit()
            })
            .await
            .map_err(map_tr_err)
    }
}

fn insert_all(
    tx: &rusqlite::Transaction<'_>,
    key: &str,
    records: &[String],
) -> Result<(), rusqlite::Error> {
    let mut stmt =
        tx.prepare_cached("INSERT INTO message_store (session_key, record) VALUES (?1, ?2)")?;
    for record in records {
        stmt.execute(params![key, record])?;
    }
    Ok(())
}
