// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the HR Desk configuration system.

use hrdesk_config::diagnostic::ConfigError;
use hrdesk_config::model::{HrDeskConfig, StorageBackend};
use hrdesk_config::{load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[agent]
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080
secret_key = "change-me"

[storage]
backend = "sqlite"
database_path = "/tmp/history.db"
wal_mode = false

[retrieval]
bm25_params_path = "/srv/hrdesk/bm25_values.json"
top_k = 6
alpha = 0.3

[pinecone]
api_key = "pc-123"
index_name = "hr-policies"

[ollama]
base_url = "http://ollama:11434"
llm_model = "deepseek-r1:8b"

[rag]
model_attempts = 1
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should load");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.secret_key.as_deref(), Some("change-me"));
    assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    assert_eq!(config.storage.database_path, "/tmp/history.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.retrieval.top_k, 6);
    assert!((config.retrieval.alpha - 0.3).abs() < 1e-6);
    assert_eq!(config.pinecone.index_name.as_deref(), Some("hr-policies"));
    assert_eq!(config.ollama.llm_model, "deepseek-r1:8b");
    assert_eq!(config.ollama.embedding_model, "nomic-embed-text");
    assert_eq!(config.rag.model_attempts, 1);
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5000);
    assert!(config.server.secret_key.is_none());
    assert_eq!(config.server.cookie_name, "hrdesk_session");
    assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    assert!(config.storage.wal_mode);
    assert_eq!(config.storage.key_prefix, "message_store:");
    assert!(config.pinecone.api_key.is_none());
    assert_eq!(config.pinecone.controller_url, "https://api.pinecone.io");
    assert_eq!(config.ollama.base_url, "http://localhost:11434");
    assert_eq!(config.ollama.llm_model, "llama3.2:latest");
    assert_eq!(config.rag.model_attempts, 2);
}

#[test]
fn unknown_key_yields_suggestion() {
    let toml = r#"
[ollama]
llm_modle = "llama3.2:latest"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "llm_modle");
            assert_eq!(suggestion.as_deref(), Some("llm_model"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[anthropic]
api_key = "sk-ant"
"#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[server]
port = "five thousand"
"#;
    let errors = load_and_validate_str(toml).expect_err("port must be an integer");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("port"))),
        "got {errors:?}"
    );
}

#[test]
fn validation_failures_surface_through_loader() {
    let toml = r#"
[retrieval]
alpha = -0.1
"#;
    let errors = load_and_validate_str(toml).expect_err("alpha out of range");
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
    assert!(errors[0].to_string().contains("retrieval.alpha"));
}

#[test]
fn dotted_override_reaches_nested_key() {
    use figment::{Figment, providers::Serialized};

    let config: HrDeskConfig = Figment::new()
        .merge(Serialized::defaults(HrDeskConfig::default()))
        .merge(("pinecone.api_key", "pc-from-env"))
        .merge(("pinecone.index_host", "hr-abc.svc.pinecone.io"))
        .extract()
        .expect("dotted keys should merge");

    assert_eq!(config.pinecone.api_key.as_deref(), Some("pc-from-env"));
    assert_eq!(
        config.pinecone.index_host.as_deref(),
        Some("hr-abc.svc.pinecone.io")
    );
}

#[test]
fn missing_config_file_is_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: HrDeskConfig = Figment::new()
        .merge(Serialized::defaults(HrDeskConfig::default()))
        .merge(Toml::file("/nonexistent/path/hrdesk.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.server.port, 5000);
}
