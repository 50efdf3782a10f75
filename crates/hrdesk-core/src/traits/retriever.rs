// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retriever adapter trait for context passage lookup.

use async_trait::async_trait;

use crate::error::HrDeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Passage;

/// Adapter returning the passages most relevant to a query.
#[async_trait]
pub trait RetrieverAdapter: PluginAdapter {
    /// Returns up to the configured top-K passages, most relevant first.
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, HrDeskError>;
}
