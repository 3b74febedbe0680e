// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider configuration for the Eogate provider gateway.
//!
//! Provides the provider record model, TOML loading through a Figment
//! hierarchy, structural validation with miette diagnostics, and the user
//! override layer (overrides file and `EOGATE__*` environment variables).
//!
//! The plugin manager consumes the resulting [`ProvidersConfig`] as an
//! in-memory mapping; nothing here is needed once it is built.
//!
//! # Usage
//!
//! ```no_run
//! use eogate_config::load_providers;
//!
//! let providers = load_providers().expect("config errors");
//! println!("{} providers configured", providers.len());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod merge;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use merge::{merge_providers, override_from_mapping};
pub use model::{EogateConfig, PluginConfig, ProviderConfig, ProvidersConfig};

/// Load configuration from the file hierarchy and validate it.
///
/// Provider names must be unique within each file. A provider declared in
/// several files is kept once, with the record of the highest layer.
pub fn load_and_validate() -> Result<EogateConfig, Vec<ConfigError>> {
    let config = loader::load_config().map_err(diagnostic::figment_to_config_errors)?;
    let mut errors = validation::validate_config(&config).err().unwrap_or_default();

    for path in loader::layer_files() {
        let origin = path.display().to_string();
        match loader::load_layer(&path) {
            Ok(layer) => {
                if let Err(mut duplicates) =
                    validation::validate_unique_names(&layer.providers, &origin)
                {
                    errors.append(&mut duplicates);
                }
            }
            Err(e) => errors.extend(diagnostic::figment_to_config_errors(e)),
        }
    }

    if errors.is_empty() {
        Ok(config)
    } else {
        Err(errors)
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<EogateConfig, Vec<ConfigError>> {
    let config =
        loader::load_config_from_str(toml_content).map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_layer(&config, "<string>")?;
    Ok(config)
}

/// Load, validate, and apply `EOGATE__*` environment overrides.
///
/// This is the high-level entry point feeding the plugin manager.
pub fn load_providers() -> Result<ProvidersConfig, Vec<ConfigError>> {
    let config = load_and_validate()?;
    let mut providers = config.providers_config();
    apply_env_overrides(&mut providers)?;
    Ok(providers)
}

/// Apply `EOGATE__*` environment overrides to a provider mapping.
///
/// Returns the names of providers whose override was skipped.
pub fn apply_env_overrides(
    providers: &mut ProvidersConfig,
) -> Result<Vec<String>, Vec<ConfigError>> {
    let mapping = loader::overrides_from_env().map_err(diagnostic::figment_to_config_errors)?;
    Ok(merge::override_from_mapping(providers, mapping))
}
