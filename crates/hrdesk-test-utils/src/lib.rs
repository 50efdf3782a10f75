// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for HR Desk integration tests.
//!
//! Mock adapters and a temp-database history store for fast, deterministic
//! tests that need no Ollama, Pinecone or Redis.
//!
//! # Components
//!
//! - [`MockProvider`] - scripted language model replies and failures
//! - [`MockRetriever`] / [`MockEmbedder`] - fixed passages and vectors
//! - [`InMemoryMessageLog`] - message log that can be switched to failing
//! - [`TempHistory`] - `ChatHistoryStore` on a temp SQLite file

pub mod harness;
pub mod memory_log;
pub mod mock_provider;
pub mod mock_retriever;

pub use harness::TempHistory;
pub use memory_log::InMemoryMessageLog;
pub use mock_provider::MockProvider;
pub use mock_retriever::{MockEmbedder, MockRetriever};
