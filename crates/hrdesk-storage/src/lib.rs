// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat history persistence for HR Desk.
//!
//! [`ChatHistoryStore`] keeps one ordered message log per session on top of
//! a key-value [`MessageLogAdapter`](hrdesk_core::MessageLogAdapter): SQLite
//! by default (WAL mode, embedded migrations, single writer through
//! `tokio-rusqlite`), or Redis with the `redis` feature.

pub mod categorize;
pub mod database;
pub mod history;
pub mod migrations;
pub mod record;
pub mod sqlite;

#[cfg(feature = "redis")]
pub mod redis_log;

use std::sync::Arc;

use hrdesk_config::model::{StorageBackend, StorageConfig};
use hrdesk_core::{HrDeskError, MessageLogAdapter};
use tracing::info;

pub use categorize::categorize;
pub use database::Database;
pub use history::ChatHistoryStore;
pub use sqlite::SqliteMessageLog;

#[cfg(feature = "redis")]
pub use redis_log::RedisMessageLog;

/// Open the backend selected by `config.backend`.
pub async fn open_message_log(
    config: &StorageConfig,
) -> Result<Arc<dyn MessageLogAdapter>, HrDeskError> {
    match config.backend {
        StorageBackend::Sqlite => {
            let log = SqliteMessageLog::open(&config.database_path, config.wal_mode).await?;
            info!(path = %config.database_path, "chat history backend: sqlite");
            Ok(Arc::new(log))
        }
        #[cfg(feature = "redis")]
        StorageBackend::Redis => {
            let log = RedisMessageLog::connect(&config.redis_url).await?;
            info!(url = %config.redis_url, "chat history backend: redis");
            Ok(Arc::new(log))
        }
        #[cfg(not(feature = "redis"))]
        StorageBackend::Redis => Err(HrDeskError::Config(
            "storage.backend = \"redis\" requires building with the `redis` feature".into(),
        )),
    }
}

/// Open the configured backend and wrap it in a [`ChatHistoryStore`].
pub async fn open_history_store(config: &StorageConfig) -> Result<ChatHistoryStore, HrDeskError> {
    let log = open_message_log(config).await?;
    Ok(ChatHistoryStore::new(log, config.key_prefix.clone()))
}
