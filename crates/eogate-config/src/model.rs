// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Eogate provider gateway.
//!
//! Provider records use `#[serde(deny_unknown_fields)]` so typos in capability
//! slot names are rejected at load time. Plugin records keep
//! implementation-specific keys in a flattened `options` map.

use std::collections::BTreeMap;

use eogate_core::Topic;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Provider configurations keyed by provider name, in registration order.
///
/// Registration order is the tie-break for providers of equal priority, so
/// this must stay an insertion-ordered map.
pub type ProvidersConfig = IndexMap<String, ProviderConfig>;

/// Top-level Eogate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EogateConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Provider records, in registration order.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl Default for EogateConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            providers: Vec::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl EogateConfig {
    /// Index the provider list by name.
    ///
    /// A later record with an already seen name replaces the earlier one in
    /// its original slot.
    pub fn providers_config(&self) -> ProvidersConfig {
        providers_from_list(self.providers.clone())
    }
}

/// Build a [`ProvidersConfig`] from a list of provider records.
pub fn providers_from_list(providers: Vec<ProviderConfig>) -> ProvidersConfig {
    let mut map = ProvidersConfig::with_capacity(providers.len());
    for provider in providers {
        if let Some(previous) = map.insert(provider.name.clone(), provider) {
            tracing::debug!(provider = previous.name.as_str(), "provider record replaced");
        }
    }
    map
}

/// Configuration of one data provider.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Unique provider name.
    #[serde(default)]
    pub name: String,

    /// Selection priority; higher is preferred. Unset means 0 once the
    /// plugin manager normalizes the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    /// Optional group name; selecting the group selects all its providers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    /// Product types served by the provider, with product-specific parameters.
    #[serde(default)]
    pub products: BTreeMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<PluginConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<PluginConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<PluginConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<PluginConfig>,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_product(mut self, product_type: impl Into<String>) -> Self {
        self.products
            .insert(product_type.into(), serde_json::Value::Object(Default::default()));
        self
    }

    /// Set the plugin configuration for a capability slot.
    ///
    /// `Topic::Crunch` has no provider slot and is ignored.
    pub fn with_plugin(mut self, topic: Topic, plugin: PluginConfig) -> Self {
        if let Some(slot) = self.slot_mut(topic) {
            *slot = Some(plugin);
        }
        self
    }

    /// Effective priority (0 when unset).
    pub fn priority(&self) -> i64 {
        self.priority.unwrap_or(0)
    }

    pub fn has_products(&self) -> bool {
        !self.products.is_empty()
    }

    /// True when `provider` names this provider or its group.
    pub fn matches(&self, provider: &str) -> bool {
        self.name == provider || self.group.as_deref() == Some(provider)
    }

    /// Plugin configuration for a capability slot, if configured.
    pub fn plugin(&self, topic: Topic) -> Option<&PluginConfig> {
        match topic {
            Topic::Search => self.search.as_ref(),
            Topic::Api => self.api.as_ref(),
            Topic::Download => self.download.as_ref(),
            Topic::Auth => self.auth.as_ref(),
            Topic::Crunch => None,
        }
    }

    /// All configured capability slots.
    pub fn plugins(&self) -> impl Iterator<Item = (Topic, &PluginConfig)> {
        [Topic::Search, Topic::Api, Topic::Download, Topic::Auth]
            .into_iter()
            .filter_map(|topic| self.plugin(topic).map(|conf| (topic, conf)))
    }

    fn slot_mut(&mut self, topic: Topic) -> Option<&mut Option<PluginConfig>> {
        match topic {
            Topic::Search => Some(&mut self.search),
            Topic::Api => Some(&mut self.api),
            Topic::Download => Some(&mut self.download),
            Topic::Auth => Some(&mut self.auth),
            Topic::Crunch => None,
        }
    }

    /// Copy provider-level fields onto the capability slots.
    ///
    /// Search and api plugins receive the provider's products and priority,
    /// download and auth plugins its priority. Idempotent; mutates the record
    /// in place, so the stored config always carries the effective values.
    pub fn materialize(&mut self) {
        let priority = self.priority();
        for slot in [&mut self.search, &mut self.api] {
            if let Some(conf) = slot {
                conf.products = self.products.clone();
                conf.priority = priority;
            }
        }
        for slot in [&mut self.download, &mut self.auth] {
            if let Some(conf) = slot {
                conf.priority = priority;
            }
        }
    }
}

/// Configuration of a single plugin slot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PluginConfig {
    /// Registered implementation type to instantiate.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Provider priority, copied in by [`ProviderConfig::materialize`].
    #[serde(default)]
    pub priority: i64,

    /// Provider products, copied in by [`ProviderConfig::materialize`].
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub products: BTreeMap<String, serde_json::Value>,

    /// Implementation-specific options (endpoints, pagination, mappings...).
    #[serde(flatten)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl PluginConfig {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.get(key)
    }

    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProviderConfig {
        ProviderConfig::new("peps")
            .with_priority(2)
            .with_product("S2_MSI_L1C")
            .with_plugin(Topic::Search, PluginConfig::new("QueryStringSearch"))
            .with_plugin(Topic::Download, PluginConfig::new("HTTPDownload"))
            .with_plugin(Topic::Auth, PluginConfig::new("GenericAuth"))
    }

    #[test]
    fn materialize_copies_priority_and_products() {
        let mut provider = sample();
        provider.materialize();

        let search = provider.search.as_ref().unwrap();
        assert_eq!(search.priority, 2);
        assert!(search.products.contains_key("S2_MSI_L1C"));

        let download = provider.download.as_ref().unwrap();
        assert_eq!(download.priority, 2);
        assert!(download.products.is_empty());
        assert_eq!(provider.auth.as_ref().unwrap().priority, 2);
    }

    #[test]
    fn materialize_is_idempotent() {
        let mut provider = sample();
        provider.materialize();
        let once = provider.clone();
        provider.materialize();
        assert_eq!(provider, once);
    }

    #[test]
    fn unset_priority_reads_as_zero() {
        let provider = ProviderConfig::new("x");
        assert_eq!(provider.priority(), 0);
        assert!(provider.priority.is_none());
    }

    #[test]
    fn matches_name_or_group() {
        let provider = ProviderConfig::new("creodias_s3").with_group("creodias");
        assert!(provider.matches("creodias_s3"));
        assert!(provider.matches("creodias"));
        assert!(!provider.matches("peps"));
    }

    #[test]
    fn plugins_lists_configured_slots_only() {
        let topics: Vec<Topic> = sample().plugins().map(|(t, _)| t).collect();
        assert_eq!(topics, vec![Topic::Search, Topic::Download, Topic::Auth]);
        assert!(sample().plugin(Topic::Crunch).is_none());
    }

    #[test]
    fn crunch_slot_is_ignored() {
        let provider = ProviderConfig::new("x").with_plugin(Topic::Crunch, PluginConfig::new("Dedup"));
        assert_eq!(provider.plugins().count(), 0);
    }

    #[test]
    fn plugin_options_are_flattened() {
        let json = serde_json::json!({
            "type": "StacSearch",
            "api_endpoint": "https://example.test/search",
            "pagination": { "max_items_per_page": 500 }
        });
        let conf: PluginConfig = serde_json::from_value(json).unwrap();
        assert_eq!(conf.type_name, "StacSearch");
        assert_eq!(conf.option_str("api_endpoint"), Some("https://example.test/search"));
        assert!(conf.option("pagination").is_some());
        assert_eq!(conf.priority, 0);
    }

    #[test]
    fn providers_from_list_keeps_first_slot_on_duplicate() {
        let providers = providers_from_list(vec![
            ProviderConfig::new("a").with_priority(1),
            ProviderConfig::new("b"),
            ProviderConfig::new("a").with_priority(7),
        ]);
        let names: Vec<&str> = providers.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(providers["a"].priority(), 7);
    }
}
