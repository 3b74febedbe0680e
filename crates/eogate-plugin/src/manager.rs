// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manager: resolves, builds and caches provider plugins.
//!
//! The manager owns the provider store, the product-type index derived from
//! it and the plugin cache. It is meant to be shared (`Arc<PluginManager>`)
//! by every request handler of a process.
//!
//! Locking: the store and index sit behind one `RwLock`. Resolutions take it
//! shared and populate the cache while holding it, so a cache entry can never
//! be built from a configuration that [`PluginManager::rebuild`] is replacing.
//! `rebuild` and [`PluginManager::set_priority`] take it exclusively.

use std::cmp::Reverse;
use std::sync::Arc;

use eogate_config::{PluginConfig, ProviderConfig, ProvidersConfig};
use eogate_core::{AuthPlugin, CrunchPlugin, EogateError, Product, Topic};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::cache::PluginCache;
use crate::index::ProductTypeIndex;
use crate::instance::{BuiltPlugin, DownloadCapable, SearchCapable};
use crate::registry::PluginRegistry;
use crate::source::PluginSource;
use crate::store::ProviderStore;

struct ManagerState {
    store: ProviderStore,
    index: ProductTypeIndex,
}

impl ManagerState {
    /// Normalize `providers` and index them. `skipped` carries the providers
    /// dropped by earlier builds.
    fn build(providers: ProvidersConfig, skipped: Vec<String>) -> Self {
        let mut store = ProviderStore::new(providers).with_skipped(skipped);
        store.normalize();
        let index = ProductTypeIndex::build(&store);
        Self { store, index }
    }

    fn provider(&self, name: &str) -> Result<&ProviderConfig, EogateError> {
        self.store
            .get(name)
            .ok_or_else(|| EogateError::unsupported(Some(name), None))
    }
}

/// Resolves plugins for providers and keeps one instance per (provider, topic).
pub struct PluginManager {
    registry: PluginRegistry,
    state: RwLock<ManagerState>,
    cache: PluginCache,
    skipped_plugins: Vec<String>,
}

impl PluginManager {
    /// Build a manager from a provider mapping and a populated registry.
    pub fn new(providers: ProvidersConfig, registry: PluginRegistry) -> Self {
        Self::from_parts(providers, registry, Vec::new())
    }

    pub fn builder() -> PluginManagerBuilder {
        PluginManagerBuilder::default()
    }

    fn from_parts(
        providers: ProvidersConfig,
        registry: PluginRegistry,
        skipped_plugins: Vec<String>,
    ) -> Self {
        let state = ManagerState::build(providers, Vec::new());
        info!(
            providers = state.store.len(),
            product_types = state.index.len(),
            factories = registry.len(),
            "plugin manager ready"
        );
        Self {
            registry,
            state: RwLock::new(state),
            cache: PluginCache::new(),
            skipped_plugins,
        }
    }

    /// Rebuild the store and index, dropping every cached instance.
    ///
    /// With `None` the current mapping is re-normalized. Resolutions started
    /// after this returns never see an instance built before it.
    pub fn rebuild(&self, providers: Option<ProvidersConfig>) {
        let mut state = self.state.write();
        let previous = std::mem::take(&mut state.store);
        let skipped = previous.skipped().to_vec();
        let providers = providers.unwrap_or_else(|| previous.into_config());
        *state = ManagerState::build(providers, skipped);
        self.cache.clear();
        info!(
            providers = state.store.len(),
            product_types = state.index.len(),
            "plugin manager rebuilt"
        );
    }

    /// Search-capable plugins for a product type and/or provider, best first.
    ///
    /// `provider` matches a provider name or group. An unknown or unserved
    /// product type falls back to the generic entry. Plugins are built lazily
    /// as the returned iterator is consumed.
    pub fn search_plugins(
        &self,
        product_type: Option<&str>,
        provider: Option<&str>,
    ) -> Result<SearchPlugins<'_>, EogateError> {
        let product_type = product_type.filter(|pt| !pt.is_empty());
        let provider = provider.filter(|p| !p.is_empty());
        let state = self.state.read();

        let mut candidates: Vec<&ProviderConfig> = match product_type {
            Some(pt) => {
                let names = match state.index.get(pt) {
                    Some(names) if !names.is_empty() => names,
                    _ => {
                        info!(product_type = pt, "unsupported product type, using generic settings");
                        state.index.generic()
                    }
                };
                names.iter().filter_map(|name| state.store.get(name)).collect()
            }
            None => state.store.iter().collect(),
        };

        if let Some(provider) = provider {
            candidates.retain(|config| config.matches(provider));
        }
        if candidates.is_empty() {
            return Err(EogateError::unsupported(provider, product_type));
        }

        candidates.sort_by_key(|config| Reverse(config.priority()));
        let names: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
        debug!(
            product_type = product_type.unwrap_or_default(),
            provider = provider.unwrap_or_default(),
            candidates = ?names,
            "resolved search candidates"
        );

        Ok(SearchPlugins {
            manager: self,
            providers: names.into_iter(),
        })
    }

    fn search_plugin_for(&self, name: &str) -> Result<SearchCapable, EogateError> {
        let state = self.state.read();
        let config = state.provider(name)?;
        let (topic, plugin) = if let Some(search) = &config.search {
            (Topic::Search, search)
        } else if let Some(api) = &config.api {
            (Topic::Api, api)
        } else {
            return Err(EogateError::Misconfigured(format!(
                "No search plugin configured for {name}."
            )));
        };

        match self.cache.get_or_build(&self.registry, name, topic, plugin)? {
            BuiltPlugin::Search(p) => Ok(SearchCapable::Search(p)),
            BuiltPlugin::Api(p) => Ok(SearchCapable::Api(p)),
            other => Err(unexpected_variant(name, topic, &other)),
        }
    }

    /// The plugin able to download `product`, from its provider's
    /// `download` slot or else its `api` slot.
    pub fn download_plugin(&self, product: &Product) -> Result<DownloadCapable, EogateError> {
        let name = product.provider.as_str();
        let state = self.state.read();
        let config = state.provider(name)?;
        let (topic, plugin) = if let Some(download) = &config.download {
            (Topic::Download, download)
        } else if let Some(api) = &config.api {
            (Topic::Api, api)
        } else {
            return Err(EogateError::Misconfigured(format!(
                "No download plugin configured for provider {name}."
            )));
        };

        match self.cache.get_or_build(&self.registry, name, topic, plugin)? {
            BuiltPlugin::Download(p) => Ok(DownloadCapable::Download(p)),
            BuiltPlugin::Api(p) => Ok(DownloadCapable::Api(p)),
            other => Err(unexpected_variant(name, topic, &other)),
        }
    }

    /// The authentication plugin of `provider`, if it has one.
    ///
    /// Providers served by an api plugin normally have none: those plugins
    /// authenticate themselves.
    pub fn auth_plugin(&self, provider: &str) -> Result<Option<Arc<dyn AuthPlugin>>, EogateError> {
        let state = self.state.read();
        let Some(auth) = &state.provider(provider)?.auth else {
            return Ok(None);
        };

        match self.cache.get_or_build(&self.registry, provider, Topic::Auth, auth)? {
            BuiltPlugin::Auth(p) => Ok(Some(p)),
            other => Err(unexpected_variant(provider, Topic::Auth, &other)),
        }
    }

    /// A fresh crunch plugin of the given type. Never cached.
    pub fn crunch_plugin(
        &self,
        type_name: &str,
        options: &serde_json::Value,
    ) -> Result<Box<dyn CrunchPlugin>, EogateError> {
        let factory = self.registry.crunch_factory(type_name)?;
        debug!(type_name, "building crunch plugin");
        factory.create(options)
    }

    /// Change a provider's priority.
    ///
    /// Index lists are re-sorted and cached instances of the provider are
    /// updated in place; their identity is kept.
    pub fn set_priority(&self, provider: &str, priority: i64) {
        let mut state = self.state.write();
        if !state.store.set_priority(provider, priority) {
            warn!(provider, priority, "cannot set priority of unknown provider");
            return;
        }
        let ManagerState { store, index } = &mut *state;
        index.sort(store);
        let updated = self.cache.set_priority(provider, priority);
        info!(provider, priority, cached_instances = updated, "provider priority updated");
    }

    /// Re-sort every index list with the providers' current priorities.
    pub fn sort_providers(&self) {
        let mut state = self.state.write();
        let ManagerState { store, index } = &mut *state;
        index.sort(store);
    }

    /// Provider names in registration order.
    pub fn providers(&self) -> Vec<String> {
        self.state.read().store.names().map(str::to_string).collect()
    }

    /// A snapshot of a provider's normalized configuration.
    pub fn provider_config(&self, name: &str) -> Option<ProviderConfig> {
        self.state.read().store.get(name).cloned()
    }

    /// The plugin configuration a provider uses for `topic`, if any.
    pub fn plugin_config(&self, name: &str, topic: Topic) -> Option<PluginConfig> {
        self.state.read().store.get(name)?.plugin(topic).cloned()
    }

    /// Indexed product types, sorted; includes the generic entry.
    pub fn product_types(&self) -> Vec<String> {
        self.state
            .read()
            .index
            .product_types()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Providers indexed under `product_type`, best first, without fallback.
    pub fn providers_for(&self, product_type: &str) -> Vec<String> {
        self.state
            .read()
            .index
            .get(product_type)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    /// Providers dropped during normalization.
    pub fn skipped_providers(&self) -> Vec<String> {
        self.state.read().store.skipped().to_vec()
    }

    /// Registration sources that could not be loaded.
    pub fn skipped_plugins(&self) -> &[String] {
        &self.skipped_plugins
    }

    pub fn cached_plugin_count(&self) -> usize {
        self.cache.len()
    }

    /// (provider, topic) pairs with a built instance, sorted.
    pub fn cached_plugins(&self) -> Vec<(String, Topic)> {
        self.cache.keys()
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }
}

impl std::fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("PluginManager")
            .field("providers", &state.store.len())
            .field("product_types", &state.index.len())
            .field("cached", &self.cache.keys())
            .field("skipped_plugins", &self.skipped_plugins)
            .finish()
    }
}

fn unexpected_variant(provider: &str, topic: Topic, built: &BuiltPlugin) -> EogateError {
    EogateError::Internal(format!(
        "cache entry for {provider}/{topic} holds a {} plugin",
        built.topic()
    ))
}

/// Lazily resolved search plugins, in selection order.
///
/// Each step takes the manager's shared lock and builds the plugin on first
/// use. A provider removed by a concurrent rebuild yields an
/// [`EogateError::UnsupportedProvider`] item.
pub struct SearchPlugins<'a> {
    manager: &'a PluginManager,
    providers: std::vec::IntoIter<String>,
}

impl SearchPlugins<'_> {
    /// Names of the providers not yet resolved.
    pub fn remaining(&self) -> &[String] {
        self.providers.as_slice()
    }
}

impl Iterator for SearchPlugins<'_> {
    type Item = Result<SearchCapable, EogateError>;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.providers.next()?;
        Some(self.manager.search_plugin_for(&name))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.providers.size_hint()
    }
}

impl ExactSizeIterator for SearchPlugins<'_> {}

impl std::fmt::Debug for SearchPlugins<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchPlugins")
            .field("remaining", &self.remaining())
            .finish()
    }
}

/// Assembles a [`PluginManager`] from providers, a registry and sources.
#[derive(Default)]
pub struct PluginManagerBuilder {
    providers: ProvidersConfig,
    registry: PluginRegistry,
    sources: Vec<Box<dyn PluginSource>>,
}

impl PluginManagerBuilder {
    /// Base provider mapping. Records bundled by sources are merged over it.
    pub fn providers(mut self, providers: ProvidersConfig) -> Self {
        self.providers = providers;
        self
    }

    pub fn registry(mut self, registry: PluginRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Add a registration source. Sources are applied in insertion order.
    pub fn source(mut self, source: impl PluginSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Apply every source, then build the store and index.
    ///
    /// A source failing with [`EogateError::Unavailable`] is skipped and
    /// reported by [`PluginManager::skipped_plugins`]; any other failure
    /// is returned.
    pub fn build(self) -> Result<PluginManager, EogateError> {
        let Self {
            providers,
            mut registry,
            sources,
        } = self;
        let mut store = ProviderStore::new(providers);
        let mut skipped = Vec::new();

        for source in &sources {
            match source.register(&mut registry) {
                Ok(()) => {
                    debug!(source = source.name(), "plugin source registered");
                }
                Err(EogateError::Unavailable { name, reason }) => {
                    warn!(
                        source = source.name(),
                        plugin = name.as_str(),
                        reason = reason.as_str(),
                        "plugin source unavailable, skipping"
                    );
                    skipped.push(source.name().to_string());
                    continue;
                }
                Err(e) => return Err(e),
            }
            if let Some(bundled) = source.providers() {
                debug!(
                    source = source.name(),
                    providers = bundled.len(),
                    "merging bundled providers"
                );
                store.merge(bundled);
            }
        }

        Ok(PluginManager::from_parts(store.into_config(), registry, skipped))
    }
}

impl std::fmt::Debug for PluginManagerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sources: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("PluginManagerBuilder")
            .field("providers", &self.providers.len())
            .field("registry", &self.registry)
            .field("sources", &sources)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eogate_config::model::providers_from_list;
    use eogate_test_utils::{MockAuth, MockSearch};

    fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register_search("StacSearch", |provider, config| {
            Ok(MockSearch::new(provider, config))
        });
        registry.register_auth("HeaderAuth", |provider, config| {
            Ok(MockAuth::new(provider, config))
        });
        registry
    }

    fn provider(name: &str, priority: i64, products: &[&str]) -> ProviderConfig {
        let mut config = ProviderConfig::new(name)
            .with_priority(priority)
            .with_plugin(Topic::Search, PluginConfig::new("StacSearch"));
        for product in products {
            config = config.with_product(*product);
        }
        config
    }

    fn names(manager: &PluginManager, product_type: Option<&str>, provider: Option<&str>) -> Vec<String> {
        manager
            .search_plugins(product_type, provider)
            .unwrap()
            .map(|p| p.unwrap().provider().to_string())
            .collect()
    }

    #[test]
    fn manager_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PluginManager>();
    }

    #[test]
    fn empty_filters_mean_none() {
        let manager = PluginManager::new(
            providers_from_list(vec![
                provider("a", 1, &["optical"]),
                provider("b", 2, &["radar"]),
                provider("c", 3, &["optical"]),
            ]),
            registry(),
        );
        assert_eq!(names(&manager, Some(""), None), vec!["c", "b", "a"]);
        assert_eq!(names(&manager, Some("optical"), Some("")), vec!["c", "a"]);
        assert_eq!(names(&manager, Some(""), Some("")), vec!["c", "b", "a"]);
    }

    #[test]
    fn provider_filter_matches_group() {
        let manager = PluginManager::new(
            providers_from_list(vec![
                provider("a", 1, &["optical"]).with_group("nasa"),
                provider("b", 2, &["optical"]),
                provider("c", 3, &["optical"]).with_group("nasa"),
            ]),
            registry(),
        );
        assert_eq!(names(&manager, Some("optical"), Some("nasa")), vec!["c", "a"]);
        assert_eq!(names(&manager, None, Some("b")), vec!["b"]);
    }

    #[test]
    fn unsupported_messages_depend_on_product_type() {
        let manager = PluginManager::new(
            providers_from_list(vec![provider("a", 1, &["optical"])]),
            registry(),
        );
        let err = manager.search_plugins(Some("optical"), Some("zz")).unwrap_err();
        assert_eq!(err.to_string(), "zz is not (yet) supported for optical");
        let err = manager.search_plugins(None, Some("zz")).unwrap_err();
        assert_eq!(err.to_string(), "zz is not (yet) supported");
    }

    #[test]
    fn auth_is_optional() {
        let manager = PluginManager::new(
            providers_from_list(vec![
                provider("a", 1, &["optical"]),
                provider("b", 1, &["optical"])
                    .with_plugin(Topic::Auth, PluginConfig::new("HeaderAuth")),
            ]),
            registry(),
        );
        assert!(manager.auth_plugin("a").unwrap().is_none());

        let first = manager.auth_plugin("b").unwrap().unwrap();
        let second = manager.auth_plugin("b").unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.provider(), "b");

        assert!(matches!(
            manager.auth_plugin("ghost"),
            Err(EogateError::UnsupportedProvider { .. })
        ));
    }

    #[test]
    fn set_priority_on_unknown_provider_is_a_no_op() {
        let manager = PluginManager::new(
            providers_from_list(vec![provider("a", 1, &["optical"])]),
            registry(),
        );
        manager.set_priority("ghost", 5);
        assert_eq!(manager.providers(), vec!["a"]);
        assert_eq!(manager.provider_config("a").unwrap().priority, Some(1));
    }

    #[test]
    fn introspection_reports_normalized_state() {
        let manager = PluginManager::new(
            providers_from_list(vec![
                provider("a", 1, &["optical"]),
                ProviderConfig::new("bare").with_plugin(Topic::Search, PluginConfig::new("StacSearch")),
                provider("b", 4, &["optical", "radar"]),
            ]),
            registry(),
        );
        assert_eq!(manager.providers(), vec!["a", "b"]);
        assert_eq!(manager.skipped_providers(), vec!["bare"]);
        assert_eq!(
            manager.product_types(),
            vec!["GENERIC_PRODUCT_TYPE", "optical", "radar"]
        );
        assert_eq!(manager.providers_for("optical"), vec!["b", "a"]);
        assert!(manager.providers_for("sar").is_empty());
        assert_eq!(
            manager.plugin_config("b", Topic::Search).unwrap().priority,
            4
        );
        assert!(manager.plugin_config("b", Topic::Download).is_none());
        assert_eq!(manager.cached_plugin_count(), 0);
        assert!(manager.skipped_plugins().is_empty());
    }

    #[test]
    fn rebuild_keeps_skipped_history() {
        let manager = PluginManager::new(
            providers_from_list(vec![
                provider("a", 1, &["optical"]),
                ProviderConfig::new("bare").with_plugin(Topic::Search, PluginConfig::new("StacSearch")),
            ]),
            registry(),
        );
        manager.rebuild(Some(providers_from_list(vec![
            ProviderConfig::new("empty").with_plugin(Topic::Search, PluginConfig::new("StacSearch")),
            provider("c", 1, &["radar"]),
        ])));
        assert_eq!(manager.providers(), vec!["c"]);
        assert_eq!(manager.skipped_providers(), vec!["bare", "empty"]);

        manager.rebuild(None);
        assert_eq!(manager.providers(), vec!["c"]);
        assert_eq!(manager.skipped_providers(), vec!["bare", "empty"]);
    }

    #[test]
    fn iterator_reports_remaining_providers() {
        let manager = PluginManager::new(
            providers_from_list(vec![provider("a", 1, &["optical"]), provider("b", 2, &["optical"])]),
            registry(),
        );
        let mut plugins = manager.search_plugins(Some("optical"), None).unwrap();
        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins.remaining(), ["b", "a"]);
        plugins.next().unwrap().unwrap();
        assert_eq!(plugins.remaining(), ["a"]);
    }

    #[test]
    fn sort_providers_is_idempotent() {
        let manager = PluginManager::new(
            providers_from_list(vec![
                provider("a", 1, &["optical"]),
                provider("b", 2, &["optical"]),
                provider("c", 1, &["optical"]),
            ]),
            registry(),
        );
        manager.sort_providers();
        manager.sort_providers();
        assert_eq!(manager.providers_for("optical"), vec!["b", "a", "c"]);
    }
}
