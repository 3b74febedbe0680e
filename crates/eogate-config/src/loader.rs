// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the hierarchy `/etc/eogate/eogate.toml` < `~/.config/eogate/eogate.toml`
//! < `./eogate.toml` < the file named by `EOGATE_PROVIDERS_CFG_FILE`.
//! Provider lists from every layer are concatenated, and a provider declared
//! again in a higher layer replaces the lower one. `EOGATE_LOG_LEVEL`
//! overrides the log level.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::EogateConfig;

/// Environment variable naming an extra providers file.
pub const PROVIDERS_FILE_ENV: &str = "EOGATE_PROVIDERS_CFG_FILE";

/// Prefix of per-provider override variables (`EOGATE__PEPS__PRIORITY=3`).
pub const OVERRIDE_ENV_PREFIX: &str = "EOGATE__";

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<EogateConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<EogateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EogateConfig::default()))
        .admerge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<EogateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EogateConfig::default()))
        .admerge(Toml::file(path))
        .merge(log_level_env())
        .extract()
}

/// Build the Figment used for config loading (exposed for diagnostic use).
///
/// Layers are joined with `admerge`, so `providers` arrays concatenate in
/// layer order instead of replacing each other.
pub fn build_figment() -> Figment {
    layer_files()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(EogateConfig::default())),
            |figment, path| figment.admerge(Toml::file(path)),
        )
        .merge(log_level_env())
}

/// Files of the standard hierarchy, lowest precedence first.
///
/// Missing files are kept: figment reads them as empty layers.
pub fn layer_files() -> Vec<PathBuf> {
    let mut files = vec![PathBuf::from("/etc/eogate/eogate.toml")];
    files.extend(user_config_path());
    files.push(PathBuf::from("eogate.toml"));

    if let Ok(path) = std::env::var(PROVIDERS_FILE_ENV) {
        tracing::debug!(path = path.as_str(), "loading providers file from environment");
        files.push(PathBuf::from(path));
    }
    files
}

/// Load one file of the hierarchy on its own, without env overrides.
pub fn load_layer(path: &Path) -> Result<EogateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EogateConfig::default()))
        .admerge(Toml::file(path))
        .extract()
}

/// Path of the per-user configuration file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("eogate/eogate.toml"))
}

fn log_level_env() -> Env {
    Env::raw()
        .only(&["EOGATE_LOG_LEVEL"])
        .map(|_| "log_level".into())
}

/// Collect `EOGATE__<PROVIDER>__<FIELD>[__<SUBFIELD>...]` variables into a
/// provider → partial-record mapping.
///
/// Keys are lowercased; values are parsed by figment (numbers and booleans
/// keep their type).
pub fn overrides_from_env() -> Result<BTreeMap<String, serde_json::Value>, figment::Error> {
    Figment::from(Env::prefixed(OVERRIDE_ENV_PREFIX).split("__")).extract()
}

/// Read a provider → partial-record mapping from a TOML overrides file.
pub fn overrides_from_path(
    path: &Path,
) -> Result<BTreeMap<String, serde_json::Value>, figment::Error> {
    tracing::info!(path = %path.display(), "loading user configuration");
    Figment::from(Toml::file(path)).extract()
}
