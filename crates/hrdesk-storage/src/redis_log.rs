// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redis implementation of [`MessageLogAdapter`].
//!
//! Lists are kept newest-first (`LPUSH`), the layout used by existing
//! deployments, and reversed on read.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::debug;

use hrdesk_core::{AdapterType, HealthStatus, HrDeskError, MessageLogAdapter, PluginAdapter};

/// Message log stored as one Redis list per key.
pub struct RedisMessageLog {
    conn: ConnectionManager,
}

impl RedisMessageLog {
    /// Connect to `url` (e.g. `redis://localhost:6379/0`).
    pub async fn connect(url: &str) -> Result<Self, HrDeskError> {
        let client = redis::Client::open(url).map_err(HrDeskError::store)?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(HrDeskError::store)?;
        debug!(url, "connected to redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl PluginAdapter for RedisMessageLog {
    fn name(&self) -> &str {
        "redis"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::MessageLog
    }

    async fn health_check(&self) -> Result<HealthStatus, HrDeskError> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(HrDeskError::store)?;
        if pong == "PONG" {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(format!("unexpected PING reply: {pong}")))
        }
    }

    async fn shutdown(&self) -> Result<(), HrDeskError> {
        Ok(())
    }
}

#[async_trait]
impl MessageLogAdapter for RedisMessageLog {
    async fn range(&self, key: &str) -> Result<Vec<String>, HrDeskError> {
        let mut conn = self.conn.clone();
        let mut records: Vec<String> = conn
            .lrange(key, 0, -1)
            .await
            .map_err(HrDeskError::store)?;
        records.reverse();
        Ok(records)
    }

    async fn push(&self, key: &str, records: &[String]) -> Result<(), HrDeskError> {
        if records.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        let _: () = conn
            .lpush(key, records)
            .await
            .map_err(HrDeskError::store)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), HrDeskError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await.map_err(HrDeskError::store)?;
        Ok(())
    }

    async fn replace(&self, key: &str, records: &[String]) -> Result<(), HrDeskError> {
        let mut conn = self.conn.clone();
        let mut pipe = redis::pipe();
        pipe.atomic().del(key).ignore();
        if !records.is_empty() {
            pipe.lpush(key, records).ignore();
        }
        let _: () = pipe
            .query_async(&mut conn)
            .await
            .map_err(HrDeskError::store)?;
        Ok(())
    }
}

// Needs a running server; skipped unless `REDIS_URL` is set.
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ChatHistoryStore;
    use hrdesk_core::{Role, SessionId};

    async fn connect() -> Option<RedisMessageLog> {
        let url = std::env::var("REDIS_URL").ok()?;
        Some(RedisMessageLog::connect(&url).await.unwrap())
    }

    fn unique_key(name: &str) -> String {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        format!("hrdesk-test:{name}:{}:{nanos}", std::process::id())
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn range_returns_push_order() {
        let Some(log) = connect().await else { return };
        let key = unique_key("push");
        log.push(&key, &strings(&["a", "b"])).await.unwrap();
        log.push(&key, &strings(&["c"])).await.unwrap();
        assert_eq!(log.range(&key).await.unwrap(), strings(&["a", "b", "c"]));

        // Stored newest-first, as existing deployments lay it out.
        let mut conn = log.conn.clone();
        let raw: Vec<String> = conn.lrange(&key, 0, -1).await.unwrap();
        assert_eq!(raw, strings(&["c", "b", "a"]));

        log.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn replace_keeps_order_and_empty_replace_removes_key() {
        let Some(log) = connect().await else { return };
        let key = unique_key("replace");
        log.push(&key, &strings(&["a", "b", "c"])).await.unwrap();

        log.replace(&key, &strings(&["a", "c"])).await.unwrap();
        assert_eq!(log.range(&key).await.unwrap(), strings(&["a", "c"]));

        log.replace(&key, &[]).await.unwrap();
        assert!(log.range(&key).await.unwrap().is_empty());
        let mut conn = log.conn.clone();
        let exists: bool = conn.exists(&key).await.unwrap();
        assert!(!exists);
    }

    #[tokio::test]
    async fn delete_removes_list() {
        let Some(log) = connect().await else { return };
        let key = unique_key("delete");
        log.push(&key, &strings(&["a"])).await.unwrap();
        log.delete(&key).await.unwrap();
        assert!(log.range(&key).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn history_store_round_trips_over_redis() {
        let Some(log) = connect().await else { return };
        let store = ChatHistoryStore::new(Arc::new(log), unique_key("history"));
        let session = SessionId::from("s1");

        assert!(store.append_pair(&session, "Leave?", "20 days").await.unwrap());
        assert!(store.append_pair(&session, "Notice?", "30 days").await.unwrap());
        assert_eq!(store.delete_by_content(&session, "leave?").await.unwrap(), 2);

        let messages = store.get_messages(&session).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "Notice?");
        assert_eq!(messages[1].content, "30 days");

        store.clear(&session).await.unwrap();
    }
}
