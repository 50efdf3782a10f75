// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for HR Desk.

use thiserror::Error;

/// The primary error type used across all HR Desk adapter traits and core operations.
#[derive(Debug, Error)]
pub enum HrDeskError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// The chat history backend could not be reached or an operation on it failed.
    #[error("chat history store unavailable: {source}")]
    StoreUnavailable {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A stored chat record could not be decoded.
    #[error("corrupt chat history record: {message}")]
    StoreCorrupt { message: String },

    /// Retriever artifacts (sparse encoder parameters, index) are missing.
    #[error("retriever unavailable: {0}")]
    RetrieverUnavailable(String),

    /// Hybrid index query failed.
    #[error("retrieval error: {message}")]
    Retrieval {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedding model errors (connection failure, malformed response).
    #[error("embedding error: {message}")]
    Embedding {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Language model invocation errors (API failure, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HrDeskError {
    /// Wraps any backend error as [`HrDeskError::StoreUnavailable`].
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HrDeskError::StoreUnavailable {
            source: Box::new(err),
        }
    }

    /// Returns true for errors raised by the chat history backend.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            HrDeskError::StoreUnavailable { .. } | HrDeskError::StoreCorrupt { .. }
        )
    }
}
