// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for HR Desk.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level HR Desk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to a local single-node setup.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HrDeskConfig {
    /// Process-level settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Web server and session cookie settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat history backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Hybrid retrieval settings.
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Pinecone index settings.
    #[serde(default)]
    pub pinecone: PineconeConfig,

    /// Ollama embedding and generation settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Response generation settings.
    #[serde(default)]
    pub rag: RagConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Web server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Secret used to sign the session cookie. `None` generates a per-process key.
    #[serde(default)]
    pub secret_key: Option<String>,

    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            secret_key: None,
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cookie_name() -> String {
    "hrdesk_session".to_string()
}

/// Which key-value backend holds the chat history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local SQLite file.
    #[default]
    Sqlite,
    /// Redis server (requires the `redis` feature).
    Redis,
}

/// Chat history backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Prefix prepended to the session id to form the log key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
            redis_url: default_redis_url(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("hrdesk").join("history.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("hrdesk.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

fn default_redis_url() -> String {
    "redis://localhost:6379/0".to_string()
}

fn default_key_prefix() -> String {
    "message_store:".to_string()
}

/// Hybrid retrieval configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Path to the BM25 parameter file written by the ingestion pipeline.
    #[serde(default = "default_bm25_params_path")]
    pub bm25_params_path: String,

    /// Number of passages to retrieve per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Dense weight in the convex combination (sparse weight is `1 - alpha`).
    #[serde(default = "default_alpha")]
    pub alpha: f32,

    /// Metadata key holding the passage text in the index.
    #[serde(default = "default_text_key")]
    pub text_key: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            bm25_params_path: default_bm25_params_path(),
            top_k: default_top_k(),
            alpha: default_alpha(),
            text_key: default_text_key(),
        }
    }
}

fn default_bm25_params_path() -> String {
    "vectorstore/bm25_values.json".to_string()
}

fn default_top_k() -> usize {
    4
}

fn default_alpha() -> f32 {
    0.5
}

fn default_text_key() -> String {
    "context".to_string()
}

/// Pinecone index configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PineconeConfig {
    /// Pinecone API key. `None` disables retrieval.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Index name, resolved to a data-plane host at startup.
    #[serde(default)]
    pub index_name: Option<String>,

    /// Data-plane host. Skips the control-plane lookup when set.
    #[serde(default)]
    pub index_host: Option<String>,

    /// Optional namespace inside the index.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Control-plane base URL.
    #[serde(default = "default_controller_url")]
    pub controller_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_pinecone_timeout")]
    pub timeout_secs: u64,
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            index_name: None,
            index_host: None,
            namespace: None,
            controller_url: default_controller_url(),
            timeout_secs: default_pinecone_timeout(),
        }
    }
}

fn default_controller_url() -> String {
    "https://api.pinecone.io".to_string()
}

fn default_pinecone_timeout() -> u64 {
    30
}

/// Ollama configuration for embeddings and generation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    #[serde(default = "default_ollama_url")]
    pub base_url: String,

    /// Model used for dense query embeddings.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Model used to generate answers.
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_ollama_timeout")]
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            embedding_model: default_embedding_model(),
            llm_model: default_llm_model(),
            timeout_secs: default_ollama_timeout(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_llm_model() -> String {
    "llama3.2:latest".to_string()
}

fn default_ollama_timeout() -> u64 {
    120
}

/// Response generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RagConfig {
    /// Total model invocation attempts per query (1 = no retry).
    #[serde(default = "default_model_attempts")]
    pub model_attempts: u32,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            model_attempts: default_model_attempts(),
        }
    }
}

fn default_model_attempts() -> u32 {
    2
}
