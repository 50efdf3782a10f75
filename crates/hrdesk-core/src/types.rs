// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the HR Desk components.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Opaque identifier for one user's conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        SessionId(value.to_string())
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    MessageLog,
    Embedding,
    Provider,
    Retriever,
}

/// Author of a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Role {
    User,
    Bot,
}

/// One utterance in a session's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Set at append time. Legacy entries may lack it.
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp,
        }
    }

    pub fn bot(content: impl Into<String>, timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            timestamp,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Normalized content used for duplicate and match comparisons.
    pub fn normalized(&self) -> String {
        normalize(&self.content)
    }
}

/// A single row of the history sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub role: Role,
    pub message: String,
}

/// A session's log partitioned by calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedHistory {
    #[serde(rename = "Today")]
    pub today: Vec<HistoryEntry>,
    #[serde(rename = "Yesterday")]
    pub yesterday: Vec<HistoryEntry>,
    #[serde(rename = "Older")]
    pub older: Vec<HistoryEntry>,
}

impl CategorizedHistory {
    pub fn is_empty(&self) -> bool {
        self.today.is_empty() && self.yesterday.is_empty() && self.older.is_empty()
    }

    pub fn len(&self) -> usize {
        self.today.len() + self.yesterday.len() + self.older.len()
    }
}

/// A document chunk returned by the retriever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub text: String,
    /// Relevance score reported by the index, if any.
    #[serde(default)]
    pub score: Option<f32>,
    /// Remaining index metadata (source file, page, ...).
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Passage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            score: None,
            metadata: HashMap::new(),
        }
    }
}

/// Input for an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    pub texts: Vec<String>,
}

/// Output from an embedding adapter, one vector per input text.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    pub embeddings: Vec<Vec<f32>>,
    pub dimensions: usize,
}

/// A single-prompt completion request.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub model: String,
    /// The entire prompt, already filled in.
    pub prompt: String,
}

/// Raw model output before any post-processing.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub content: String,
    pub model: String,
}

/// Trims surrounding whitespace and case-folds.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
