// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat history store on a throwaway SQLite database.

use std::sync::Arc;

use hrdesk_config::model::StorageConfig;
use hrdesk_core::HrDeskError;
use hrdesk_storage::ChatHistoryStore;

/// A [`ChatHistoryStore`] whose database lives in a temp dir removed on drop.
pub struct TempHistory {
    pub store: Arc<ChatHistoryStore>,
    pub config: StorageConfig,
    _temp_dir: tempfile::TempDir,
}

impl TempHistory {
    pub async fn new() -> Result<Self, HrDeskError> {
        let temp_dir = tempfile::TempDir::new().map_err(HrDeskError::store)?;
        let config = StorageConfig {
            database_path: temp_dir
                .path()
                .join("history.db")
                .to_string_lossy()
                .into_owned(),
            ..StorageConfig::default()
        };
        let store = hrdesk_storage::open_history_store(&config).await?;
        Ok(Self {
            store: Arc::new(store),
            config,
            _temp_dir: temp_dir,
        })
    }
}
