// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message log adapter trait for key-value chat history backends (SQLite, Redis).

use async_trait::async_trait;

use crate::error::HrDeskError;
use crate::traits::adapter::PluginAdapter;

/// An ordered list of encoded records per key.
///
/// Backends store records opaquely; decoding and validation live in the
/// chat history store. Records are returned oldest first.
#[async_trait]
pub trait MessageLogAdapter: PluginAdapter {
    /// Returns every record stored under `key`, oldest first. Unknown keys return an empty list.
    async fn range(&self, key: &str) -> Result<Vec<String>, HrDeskError>;

    /// Appends `records` to the end of the list stored under `key`.
    async fn push(&self, key: &str, records: &[String]) -> Result<(), HrDeskError>;

    /// Removes the whole list stored under `key`.
    async fn delete(&self, key: &str) -> Result<(), HrDeskError>;

    /// Deletes `key` and re-adds `records` in order.
    async fn replace(&self, key: &str, records: &[String]) -> Result<(), HrDeskError>;
}
