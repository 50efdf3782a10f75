// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for language model integrations.

use async_trait::async_trait;

use crate::error::HrDeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ProviderRequest, ProviderResponse};

/// Adapter for single-shot language model completion.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends the filled prompt and returns the model's raw output.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, HrDeskError>;
}
