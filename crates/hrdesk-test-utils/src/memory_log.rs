// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory message log with a failure switch.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use hrdesk_core::traits::{MessageLogAdapter, PluginAdapter};
use hrdesk_core::types::{AdapterType, HealthStatus};
use hrdesk_core::HrDeskError;

/// `HashMap`-backed log. When unavailable, every call fails with
/// [`HrDeskError::StoreUnavailable`], like an unreachable server.
#[derive(Default)]
pub struct InMemoryMessageLog {
    lists: Mutex<HashMap<String, Vec<String>>>,
    unavailable: AtomicBool,
}

impl InMemoryMessageLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), HrDeskError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(HrDeskError::store(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PluginAdapter for InMemoryMessageLog {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::MessageLog
    }

    async fn health_check(&self) -> Result<HealthStatus, HrDeskError> {
        self.check()?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HrDeskError> {
        Ok(())
    }
}

#[async_trait]
impl MessageLogAdapter for InMemoryMessageLog {
    async fn range(&self, key: &str) -> Result<Vec<String>, HrDeskError> {
        self.check()?;
        Ok(self.lists.lock().await.get(key).cloned().unwrap_or_default())
    }

    async fn push(&self, key: &str, records: &[String]) -> Result<(), HrDeskError> {
        self.check()?;
        self.lists
            .lock()
            .await
            .entry(key.to_string())
            .or_default()
            .extend_from_slice(records);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), HrDeskError> {
        self.check()?;
        self.lists.lock().await.remove(key);
        Ok(())
    }

    async fn replace(&self, key: &str, records: &[String]) -> Result<(), HrDeskError> {
        self.check()?;
        let mut lists = self.lists.lock().await;
        if records.is_empty() {
            lists.remove(key);
        } else {
            lists.insert(key.to_string(), records.to_vec());
        }
        Ok(())
    }
}
