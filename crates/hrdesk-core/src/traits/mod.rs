// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod embedding;
pub mod provider;
pub mod retriever;
pub mod storage;

pub use adapter::PluginAdapter;
pub use embedding::EmbeddingAdapter;
pub use provider::ProviderAdapter;
pub use retriever::RetrieverAdapter;
pub use storage::MessageLogAdapter;
