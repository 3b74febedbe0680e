// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider fixtures and registries of the mock plugin types.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use eogate_config::{PluginConfig, ProviderConfig};
use eogate_core::{EogateError, Topic};
use eogate_plugin::PluginRegistry;

use crate::mock_plugins::{MockApi, MockAuth, MockCrunch, MockDownload, MockSearch};

/// Search type names backed by [`MockSearch`].
pub const SEARCH_TYPES: [&str; 2] = ["QueryStringSearch", "StacSearch"];
/// Download type names backed by [`MockDownload`].
pub const DOWNLOAD_TYPES: [&str; 2] = ["AwsDownload", "HTTPDownload"];
/// Api type name backed by [`MockApi`].
pub const API_TYPE: &str = "UsgsApi";
/// Auth type names backed by [`MockAuth`].
pub const AUTH_TYPES: [&str; 2] = ["GenericAuth", "HeaderAuth"];
/// Crunch type names backed by [`MockCrunch`].
pub const CRUNCH_TYPES: [&str; 2] = ["FilterLatestByName", "FilterOverlap"];
/// A search type whose factory always fails.
pub const BROKEN_SEARCH_TYPE: &str = "BrokenSearch";

/// Counts plugin constructions across every mock factory of a registry.
#[derive(Debug, Clone, Default)]
pub struct BuildCounter(Arc<AtomicUsize>);

impl BuildCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A registry with every mock type registered.
pub fn mock_registry() -> PluginRegistry {
    counting_registry(&BuildCounter::new())
}

/// A registry with every mock type registered, counting constructions
/// of provider-bound plugins in `counter`.
pub fn counting_registry(counter: &BuildCounter) -> PluginRegistry {
    let mut registry = PluginRegistry::new();

    for type_name in SEARCH_TYPES {
        let counter = counter.clone();
        registry.register_search(type_name, move |provider, config| {
            counter.bump();
            Ok(MockSearch::new(provider, config))
        });
    }
    for type_name in DOWNLOAD_TYPES {
        let counter = counter.clone();
        registry.register_download(type_name, move |provider, config| {
            counter.bump();
            Ok(MockDownload::new(provider, config))
        });
    }
    let api_counter = counter.clone();
    registry.register_api(API_TYPE, move |provider, config| {
        api_counter.bump();
        Ok(MockApi::new(provider, config))
    });
    for type_name in AUTH_TYPES {
        let counter = counter.clone();
        registry.register_auth(type_name, move |provider, config| {
            counter.bump();
            Ok(MockAuth::new(provider, config))
        });
    }
    for type_name in CRUNCH_TYPES {
        registry.register_crunch(type_name, move |options| Ok(MockCrunch::new(type_name, options)));
    }
    registry.register_search(BROKEN_SEARCH_TYPE, |provider, _config| {
        Err::<MockSearch, _>(EogateError::PluginConstruction {
            provider: provider.to_string(),
            topic: Topic::Search,
            message: "endpoint is not configured".to_string(),
        })
    });

    registry
}

fn with_products(mut config: ProviderConfig, priority: Option<i64>, products: &[&str]) -> ProviderConfig {
    config.priority = priority;
    for product in products {
        config = config.with_product(*product);
    }
    config
}

/// A provider searched through `StacSearch`.
pub fn search_provider(name: &str, priority: Option<i64>, products: &[&str]) -> ProviderConfig {
    with_products(
        ProviderConfig::new(name).with_plugin(Topic::Search, PluginConfig::new("StacSearch")),
        priority,
        products,
    )
}

/// A provider with search, download and auth plugins.
pub fn full_provider(name: &str, priority: Option<i64>, products: &[&str]) -> ProviderConfig {
    search_provider(name, priority, products)
        .with_plugin(Topic::Download, PluginConfig::new("HTTPDownload"))
        .with_plugin(Topic::Auth, PluginConfig::new("GenericAuth"))
}

/// A provider served by a single api plugin.
pub fn api_provider(name: &str, priority: Option<i64>, products: &[&str]) -> ProviderConfig {
    with_products(
        ProviderConfig::new(name).with_plugin(Topic::Api, PluginConfig::new(API_TYPE)),
        priority,
        products,
    )
}
