// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./hrdesk.toml` > `~/.config/hrdesk/hrdesk.toml` > `/etc/hrdesk/hrdesk.toml`
//! with environment variable overrides via `HRDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HrDeskConfig;

/// System-wide config file location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/hrdesk/hrdesk.toml";

/// Local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "hrdesk.toml";

/// Sections recognized by the env var mapper, in match order.
const ENV_SECTIONS: &[&str] = &[
    "agent", "server", "storage", "retrieval", "pinecone", "ollama", "rag",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/hrdesk/hrdesk.toml` (system-wide)
/// 3. `~/.config/hrdesk/hrdesk.toml` (user XDG config)
/// 4. `./hrdesk.toml` (local directory)
/// 5. `HRDESK_*` environment variables
pub fn load_config() -> Result<HrDeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<HrDeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HrDeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HrDeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HrDeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HrDeskConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/hrdesk/hrdesk.toml`, when a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hrdesk").join("hrdesk.toml"))
}

/// Create the environment variable provider.
///
/// Uses `Env::map()` with explicit section prefixes rather than `Env::split("_")`,
/// because keys themselves contain underscores: `HRDESK_PINECONE_API_KEY` must
/// map to `pinecone.api_key`, not `pinecone.api.key`.
fn env_provider() -> Env {
    Env::prefixed("HRDESK_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env var name to its dotted config path.
///
/// Figment keeps the original case of the variable name, so matching is done
/// on the lowercased form.
pub(crate) fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}
