// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding adapter trait for dense vector generation.

use async_trait::async_trait;

use crate::error::HrDeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{EmbeddingInput, EmbeddingOutput};

/// Adapter for generating dense embeddings from text.
#[async_trait]
pub trait EmbeddingAdapter: PluginAdapter {
    /// Generates one embedding per input text, in input order.
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, HrDeskError>;
}
