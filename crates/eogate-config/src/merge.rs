// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merging provider configurations and applying user overrides.
//!
//! Two distinct operations live here:
//! - [`merge_providers`] combines whole provider records (bundled plugin
//!   sources, extra config files). The incoming record replaces the existing
//!   one with the same name.
//! - [`override_from_mapping`] overlays partial records (user override file,
//!   `EOGATE__*` environment variables) field by field.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{info, warn};

use crate::diagnostic::ConfigError;
use crate::model::{ProviderConfig, ProvidersConfig};
use crate::validation::validate_provider;

/// Merge `incoming` into `base`, provider by provider.
///
/// A provider present in both is replaced wholesale by the incoming record
/// and keeps its registration slot; new providers are appended in the order
/// they appear in `incoming`.
pub fn merge_providers(base: &mut ProvidersConfig, incoming: ProvidersConfig) {
    for (name, provider) in incoming {
        if base.insert(name.clone(), provider).is_some() {
            info!(provider = name.as_str(), "provider configuration replaced");
        }
    }
}

/// Recursively overlay `src` onto `dst`.
///
/// Objects merge key by key; any other value replaces the destination.
/// `null` values in `src` are ignored.
pub fn merge_json(dst: &mut Value, src: Value) {
    match (dst, src) {
        (_, Value::Null) => {}
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (key, value) in src_map {
                match dst_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        if !value.is_null() {
                            dst_map.insert(key, value);
                        }
                    }
                }
            }
        }
        (dst, src) => *dst = src,
    }
}

impl ProviderConfig {
    /// Overlay a partial provider record onto this one.
    ///
    /// `name` is never changed. Plugin slots are merged key by key; a slot
    /// absent from this record is created from the override, which must then
    /// name its plugin `type`.
    pub fn update(&mut self, overrides: &serde_json::Map<String, Value>) -> Result<(), ConfigError> {
        let to_err = |e: serde_json::Error| ConfigError::Override {
            provider: self.name.clone(),
            message: e.to_string(),
        };

        let mut current = serde_json::to_value(&*self).map_err(to_err)?;
        let mut patch = overrides.clone();
        patch.remove("name");
        merge_json(&mut current, Value::Object(patch));

        let mut updated: ProviderConfig = serde_json::from_value(current).map_err(to_err)?;
        updated.name = self.name.clone();
        *self = updated;
        Ok(())
    }
}

/// Apply a provider → partial-record mapping onto `config`.
///
/// Known providers are updated in place. An unknown provider is created from
/// its mapping when that mapping forms a valid provider record; otherwise it
/// is skipped with a warning. Returns the names of skipped providers.
pub fn override_from_mapping(
    config: &mut ProvidersConfig,
    mapping: BTreeMap<String, Value>,
) -> Vec<String> {
    let mut skipped = Vec::new();

    for (provider, new_conf) in mapping {
        let Value::Object(new_conf) = new_conf else {
            warn!(provider = provider.as_str(), "override skipped: not a mapping");
            skipped.push(provider);
            continue;
        };

        if let Some(existing) = config.get_mut(&provider) {
            if let Err(err) = existing.update(&new_conf) {
                warn!(provider = provider.as_str(), error = %err, "override skipped");
                skipped.push(provider);
            }
            continue;
        }

        info!(
            provider = provider.as_str(),
            "unknown provider found in user conf, trying to use provided configuration"
        );
        match new_provider_from_mapping(&provider, new_conf) {
            Ok(provider_config) => {
                config.insert(provider, provider_config);
            }
            Err(err) => {
                warn!(
                    provider = provider.as_str(),
                    error = %err,
                    "provider skipped: could not be loaded from user configuration"
                );
                skipped.push(provider);
            }
        }
    }

    skipped
}

fn new_provider_from_mapping(
    name: &str,
    mut mapping: serde_json::Map<String, Value>,
) -> Result<ProviderConfig, ConfigError> {
    mapping
        .entry("name")
        .or_insert_with(|| Value::String(name.to_string()));
    let provider: ProviderConfig =
        serde_json::from_value(Value::Object(mapping)).map_err(|e| ConfigError::Override {
            provider: name.to_string(),
            message: e.to_string(),
        })?;
    validate_provider(&provider).map_err(|errors| ConfigError::Override {
        provider: name.to_string(),
        message: errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
    })?;
    Ok(provider)
}
