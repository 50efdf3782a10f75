// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for HR Desk.
//!
//! This crate provides the trait definitions, error type, and common types
//! shared by the chat history store, the response generator, and the web
//! gateway. Every external collaborator (message log backend, embedding
//! model, language model, retriever) implements a trait defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HrDeskError;
pub use types::{
    AdapterType, CategorizedHistory, ChatMessage, HealthStatus, HistoryEntry, Passage, Role,
    SessionId, normalize,
};

pub use traits::{
    EmbeddingAdapter, MessageLogAdapter, PluginAdapter, ProviderAdapter, RetrieverAdapter,
};
