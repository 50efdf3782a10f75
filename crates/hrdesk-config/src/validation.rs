// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express. All failures are
//! collected rather than stopping at the first.

use crate::diagnostic::ConfigError;
use crate::model::{HrDeskConfig, StorageBackend};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
pub fn validate_config(config: &HrDeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.agent.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "agent.log_level `{}` must be one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::validation("server.host must not be empty"));
    } else if host.parse::<std::net::IpAddr>().is_err()
        && !host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        errors.push(ConfigError::validation(format!(
            "server.host `{host}` is not a valid IP address or hostname"
        )));
    }

    if config.server.port == 0 {
        errors.push(ConfigError::validation("server.port must be non-zero"));
    }

    if config.server.cookie_name.trim().is_empty() {
        errors.push(ConfigError::validation("server.cookie_name must not be empty"));
    }

    match config.storage.backend {
        StorageBackend::Sqlite if config.storage.database_path.trim().is_empty() => {
            errors.push(ConfigError::validation(
                "storage.database_path must not be empty",
            ));
        }
        StorageBackend::Redis if !config.storage.redis_url.starts_with("redis") => {
            errors.push(ConfigError::validation(format!(
                "storage.redis_url `{}` must use the redis:// or rediss:// scheme",
                config.storage.redis_url
            )));
        }
        _ => {}
    }

    if config.retrieval.top_k == 0 {
        errors.push(ConfigError::validation("retrieval.top_k must be at least 1"));
    }

    let alpha = config.retrieval.alpha;
    if !(0.0..=1.0).contains(&alpha) {
        errors.push(ConfigError::validation(format!(
            "retrieval.alpha must be between 0 and 1, got {alpha}"
        )));
    }

    if config.retrieval.text_key.trim().is_empty() {
        errors.push(ConfigError::validation(
            "retrieval.text_key must not be empty",
        ));
    }

    if config.pinecone.api_key.is_some()
        && config.pinecone.index_name.is_none()
        && config.pinecone.index_host.is_none()
    {
        errors.push(ConfigError::validation(
            "pinecone.index_name or pinecone.index_host is required when pinecone.api_key is set",
        ));
    }

    for (key, url) in [
        ("ollama.base_url", &config.ollama.base_url),
        ("pinecone.controller_url", &config.pinecone.controller_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::validation(format!(
                "{key} `{url}` must start with http:// or https://"
            )));
        }
    }

    for (key, secs) in [
        ("ollama.timeout_secs", config.ollama.timeout_secs),
        ("pinecone.timeout_secs", config.pinecone.timeout_secs),
    ] {
        if secs == 0 {
            errors.push(ConfigError::validation(format!("{key} must be positive")));
        }
    }

    if config.rag.model_attempts == 0 {
        errors.push(ConfigError::validation(
            "rag.model_attempts must be at least 1",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&HrDeskConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_failure() {
        let mut config = HrDeskConfig::default();
        config.retrieval.top_k = 0;
        config.retrieval.alpha = 1.5;
        config.rag.model_attempts = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn api_key_without_index_is_rejected() {
        let mut config = HrDeskConfig::default();
        config.pinecone.api_key = Some("pc-key".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("pinecone.index_name"));

        config.pinecone.index_host = Some("hr-policies-abc.svc.pinecone.io".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn redis_backend_checks_url_scheme() {
        let mut config = HrDeskConfig::default();
        config.storage.backend = StorageBackend::Redis;
        config.storage.redis_url = "localhost:6379".into();
        assert!(validate_config(&config).is_err());
    }
}
