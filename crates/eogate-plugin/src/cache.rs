// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin cache: at most one built instance per (provider, topic).

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use eogate_config::PluginConfig;
use eogate_core::{EogateError, Topic};
use tracing::debug;

use crate::instance::BuiltPlugin;
use crate::registry::PluginRegistry;

type CacheKey = (String, Topic);

/// Memoized plugin instances keyed by provider name and topic.
///
/// Lookup and insertion for one key happen under that key's shard lock, so
/// concurrent first-time requests for the same key construct one instance.
/// Factories run while the shard lock is held and must not call back into
/// the cache.
#[derive(Default)]
pub struct PluginCache {
    entries: DashMap<CacheKey, BuiltPlugin>,
}

impl PluginCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached instance for (provider, topic), building it on first use.
    ///
    /// A cache hit has no side effect: `config` is ignored.
    pub fn get_or_build(
        &self,
        registry: &PluginRegistry,
        provider: &str,
        topic: Topic,
        config: &PluginConfig,
    ) -> Result<BuiltPlugin, EogateError> {
        if let Some(hit) = self.get(provider, topic) {
            return Ok(hit);
        }

        match self.entries.entry((provider.to_string(), topic)) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let factory = registry.factory(topic, &config.type_name)?;
                let plugin = factory.create(provider, config)?;
                if plugin.topic() != topic {
                    return Err(EogateError::PluginConstruction {
                        provider: provider.to_string(),
                        topic,
                        message: format!(
                            "factory `{}` produced a {} plugin",
                            config.type_name,
                            plugin.topic()
                        ),
                    });
                }
                debug!(
                    provider,
                    topic = %topic,
                    type_name = config.type_name.as_str(),
                    "built plugin"
                );
                entry.insert(plugin.clone());
                Ok(plugin)
            }
        }
    }

    pub fn get(&self, provider: &str, topic: Topic) -> Option<BuiltPlugin> {
        self.entries
            .get(&(provider.to_string(), topic))
            .map(|entry| entry.value().clone())
    }

    /// Update the priority of every cached instance of `provider` in place.
    ///
    /// Returns the number of instances updated.
    pub fn set_priority(&self, provider: &str, priority: i64) -> usize {
        let mut updated = 0;
        for entry in self.entries.iter() {
            if entry.key().0 == provider {
                entry.value().as_plugin().set_priority(priority);
                updated += 1;
            }
        }
        updated
    }

    /// Cached (provider, topic) keys, sorted.
    pub fn keys(&self) -> Vec<(String, Topic)> {
        let mut keys: Vec<CacheKey> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eogate_test_utils::{MockDownload, MockSearch};

    fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register_search("StacSearch", |provider, config| {
            Ok(MockSearch::new(provider, config))
        });
        registry.register_download("HTTPDownload", |provider, config| {
            Ok(MockDownload::new(provider, config))
        });
        registry
    }

    #[test]
    fn second_lookup_returns_same_instance() {
        let registry = registry();
        let cache = PluginCache::new();
        let config = PluginConfig::new("StacSearch");

        let first = cache.get_or_build(&registry, "a", Topic::Search, &config).unwrap();
        let second = cache.get_or_build(&registry, "a", Topic::Search, &config).unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn hit_ignores_new_config() {
        let registry = registry();
        let cache = PluginCache::new();
        let first = cache
            .get_or_build(&registry, "a", Topic::Search, &PluginConfig::new("StacSearch"))
            .unwrap();
        let again = cache
            .get_or_build(&registry, "a", Topic::Search, &PluginConfig::new("Unregistered"))
            .unwrap();
        assert!(first.ptr_eq(&again));
    }

    #[test]
    fn unknown_type_leaves_no_entry() {
        let registry = registry();
        let cache = PluginCache::new();
        let err = cache
            .get_or_build(&registry, "a", Topic::Search, &PluginConfig::new("Nope"))
            .unwrap_err();
        assert!(matches!(err, EogateError::UnknownPluginType { .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn set_priority_touches_only_matching_provider() {
        let registry = registry();
        let cache = PluginCache::new();
        cache
            .get_or_build(&registry, "a", Topic::Search, &PluginConfig::new("StacSearch"))
            .unwrap();
        cache
            .get_or_build(&registry, "a", Topic::Download, &PluginConfig::new("HTTPDownload"))
            .unwrap();
        cache
            .get_or_build(&registry, "b", Topic::Search, &PluginConfig::new("StacSearch"))
            .unwrap();

        assert_eq!(cache.set_priority("a", 9), 2);
        assert_eq!(cache.get("a", Topic::Search).unwrap().as_plugin().priority(), 9);
        assert_eq!(cache.get("a", Topic::Download).unwrap().as_plugin().priority(), 9);
        assert_eq!(cache.get("b", Topic::Search).unwrap().as_plugin().priority(), 0);
        assert_eq!(
            cache.keys(),
            vec![
                ("a".to_string(), Topic::Search),
                ("a".to_string(), Topic::Download),
                ("b".to_string(), Topic::Search),
            ]
        );

        cache.clear();
        assert!(cache.get("a", Topic::Search).is_none());
    }
}
