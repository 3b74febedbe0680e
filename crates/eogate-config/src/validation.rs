// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural validation of provider records.
//!
//! Checks the rules serde attributes cannot express: every provider is named
//! and implements at least one plugin, an `api` plugin is exclusive and plugin
//! types are non-empty. Provider names must be unique within one file; across
//! the layers of the hierarchy a later record replaces an earlier one.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{EogateConfig, ProviderConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Returns `Ok(())` if all validations pass, or every collected error
/// (does not fail fast). Repeated provider names are accepted here; see
/// [`validate_layer`] for a single file.
pub fn validate_config(config: &EogateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log_level `{}` must be one of {}",
                config.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for provider in &config.providers {
        if let Err(mut provider_errors) = validate_provider(provider) {
            errors.append(&mut provider_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a configuration read from one file, named by `origin`.
///
/// On top of [`validate_config`], provider names must be unique.
pub fn validate_layer(config: &EogateConfig, origin: &str) -> Result<(), Vec<ConfigError>> {
    let mut errors = validate_config(config).err().unwrap_or_default();
    if let Err(mut duplicates) = validate_unique_names(&config.providers, origin) {
        errors.append(&mut duplicates);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Report provider names declared more than once in `providers`.
pub fn validate_unique_names(
    providers: &[ProviderConfig],
    origin: &str,
) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut seen_names = HashSet::new();
    for (i, provider) in providers.iter().enumerate() {
        if !provider.name.is_empty() && !seen_names.insert(provider.name.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate provider name `{}` in providers[{i}] of {origin}",
                    provider.name
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a single provider record.
pub fn validate_provider(provider: &ProviderConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let label = if provider.name.trim().is_empty() {
        "<unnamed>".to_string()
    } else {
        provider.name.clone()
    };
    let mut invalid = |message: String| {
        errors.push(ConfigError::InvalidProvider {
            provider: label.clone(),
            message,
        })
    };

    if provider.name.trim().is_empty() {
        invalid("provider config must have a name".to_string());
    }

    if provider.plugins().next().is_none() {
        invalid("a provider must implement at least one plugin".to_string());
    }

    if provider.api.is_some()
        && (provider.search.is_some() || provider.download.is_some() || provider.auth.is_some())
    {
        invalid(
            "a provider implementing an api plugin must not implement any other type of plugin"
                .to_string(),
        );
    }

    for (topic, plugin) in provider.plugins() {
        if plugin.type_name.trim().is_empty() {
            invalid(format!("{topic} plugin config must specify the plugin type"));
        }
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
    use crate::model::PluginConfig;
    use eogate_core::Topic;

    fn searchable(name: &str) -> ProviderConfig {
        ProviderConfig::new(name)
            .with_product("S2_MSI_L1C")
            .with_plugin(Topic::Search, PluginConfig::new("QueryStringSearch"))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&EogateConfig::default()).is_ok());
    }

    #[test]
    fn well_formed_provider_validates() {
        assert!(validate_provider(&searchable("peps")).is_ok());
    }

    #[test]
    fn provider_without_plugin_fails() {
        let errors = validate_provider(&ProviderConfig::new("empty")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("at least one plugin"));
    }

    #[test]
    fn api_with_search_fails() {
        let provider = searchable("mixed").with_plugin(Topic::Api, PluginConfig::new("UsgsApi"));
        let errors = validate_provider(&provider).unwrap_err();
        assert!(errors[0].to_string().contains("must not implement any other"));
    }

    #[test]
    fn unnamed_provider_and_empty_type_collect_all_errors() {
        let provider = ProviderConfig::new("").with_plugin(Topic::Search, PluginConfig::new(""));
        let errors = validate_provider(&provider).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.to_string().contains("<unnamed>")));
    }

    #[test]
    fn duplicate_names_are_reported_per_layer() {
        let config = EogateConfig {
            providers: vec![searchable("peps"), searchable("usgs"), searchable("peps")],
            ..EogateConfig::default()
        };
        assert!(validate_config(&config).is_ok());

        let errors = validate_layer(&config, "eogate.toml").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(
            errors[0]
                .to_string()
                .contains("duplicate provider name `peps` in providers[2] of eogate.toml")
        );
    }

    #[test]
    fn layer_validation_collects_all_errors() {
        let config = EogateConfig {
            log_level: "loud".into(),
            providers: vec![searchable("peps"), searchable("peps")],
        };
        assert_eq!(validate_layer(&config, "<string>").unwrap_err().len(), 2);
    }

    #[test]
    fn bad_log_level_is_reported() {
        let config = EogateConfig {
            log_level: "verbose".into(),
            ..EogateConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
