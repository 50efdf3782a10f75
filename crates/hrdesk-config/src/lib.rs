// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for HR Desk.
//!
//! Strict TOML parsing (`deny_unknown_fields`), an XDG file hierarchy,
//! `HRDESK_*` environment overrides, and miette diagnostics with typo hints.
//!
//! # Usage
//!
//! ```no_run
//! use hrdesk_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{HrDeskConfig, StorageBackend};

/// Load from the XDG hierarchy plus env vars, then validate.
pub fn load_and_validate() -> Result<HrDeskConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => validation::validate_config(&config).map(|()| config),
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load from a TOML string (no files, no env vars), then validate.
pub fn load_and_validate_str(toml_content: &str) -> Result<HrDeskConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => validation::validate_config(&config).map(|()| config),
        Err(err) => {
            let sources = [("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Reads whichever config files exist, for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG_FILE))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG_FILE.into());

    [
        Some(local),
        loader::user_config_path(),
        Some(loader::SYSTEM_CONFIG_PATH.into()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    })
    .collect()
}
