// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry mapping (topic, type name) to factories.
//!
//! Provider configurations name the implementation to use for each topic by
//! type name. The registry resolves that name to a factory that binds a
//! [`PluginConfig`] to a new plugin instance. Registration happens before the
//! plugin manager is built; the registry is read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use eogate_config::PluginConfig;
use eogate_config::diagnostic::suggest_key;
use eogate_core::{
    ApiPlugin, AuthPlugin, CrunchPlugin, DownloadPlugin, EogateError, SearchPlugin, Topic,
};
use tracing::debug;

use crate::instance::BuiltPlugin;

/// Factory trait for creating provider-bound plugin instances.
pub trait PluginFactory: Send + Sync {
    /// The topic this factory produces plugins for.
    fn topic(&self) -> Topic;

    /// The type name provider configurations use to select this factory.
    fn type_name(&self) -> &str;

    /// Create a new instance bound to `provider` and its plugin configuration.
    fn create(&self, provider: &str, config: &PluginConfig) -> Result<BuiltPlugin, EogateError>;
}

/// Factory trait for per-query crunch plugins.
pub trait CrunchFactory: Send + Sync {
    fn type_name(&self) -> &str;

    fn create(&self, options: &serde_json::Value) -> Result<Box<dyn CrunchPlugin>, EogateError>;
}

type BuildFn = dyn Fn(&str, &PluginConfig) -> Result<BuiltPlugin, EogateError> + Send + Sync;

/// Closure-backed [`PluginFactory`] used by the typed `register_*` helpers.
struct FnFactory {
    topic: Topic,
    type_name: String,
    build: Box<BuildFn>,
}

impl PluginFactory for FnFactory {
    fn topic(&self) -> Topic {
        self.topic
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn create(&self, provider: &str, config: &PluginConfig) -> Result<BuiltPlugin, EogateError> {
        (self.build)(provider, config)
    }
}

type CrunchBuildFn =
    dyn Fn(&serde_json::Value) -> Result<Box<dyn CrunchPlugin>, EogateError> + Send + Sync;

struct FnCrunchFactory {
    type_name: String,
    build: Box<CrunchBuildFn>,
}

impl CrunchFactory for FnCrunchFactory {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn create(&self, options: &serde_json::Value) -> Result<Box<dyn CrunchPlugin>, EogateError> {
        (self.build)(options)
    }
}

/// Registry of plugin factories, keyed by topic and type name.
#[derive(Default)]
pub struct PluginRegistry {
    factories: HashMap<(Topic, String), Arc<dyn PluginFactory>>,
    crunchers: HashMap<String, Arc<dyn CrunchFactory>>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider-bound plugin factory.
    ///
    /// A factory registered under an existing (topic, type name) replaces it.
    /// Crunch plugins go through [`register_crunch_factory`](Self::register_crunch_factory).
    pub fn register(&mut self, factory: Arc<dyn PluginFactory>) -> Result<(), EogateError> {
        let topic = factory.topic();
        if topic == Topic::Crunch {
            return Err(EogateError::Internal(format!(
                "crunch type `{}` must be registered as a crunch factory",
                factory.type_name()
            )));
        }
        let type_name = factory.type_name().to_string();
        debug!(topic = %topic, type_name = type_name.as_str(), "registering plugin factory");
        self.factories.insert((topic, type_name), factory);
        Ok(())
    }

    /// Register a crunch plugin factory.
    pub fn register_crunch_factory(&mut self, factory: Arc<dyn CrunchFactory>) {
        let type_name = factory.type_name().to_string();
        debug!(type_name = type_name.as_str(), "registering crunch factory");
        self.crunchers.insert(type_name, factory);
    }

    fn register_fn<F>(&mut self, topic: Topic, type_name: &str, build: F)
    where
        F: Fn(&str, &PluginConfig) -> Result<BuiltPlugin, EogateError> + Send + Sync + 'static,
    {
        debug!(topic = %topic, type_name, "registering plugin factory");
        self.factories.insert(
            (topic, type_name.to_string()),
            Arc::new(FnFactory {
                topic,
                type_name: type_name.to_string(),
                build: Box::new(build),
            }),
        );
    }

    /// Register a search plugin constructor.
    pub fn register_search<P, F>(&mut self, type_name: &str, build: F)
    where
        P: SearchPlugin,
        F: Fn(&str, &PluginConfig) -> Result<P, EogateError> + Send + Sync + 'static,
    {
        self.register_fn(Topic::Search, type_name, move |provider, config| {
            Ok(BuiltPlugin::Search(Arc::new(build(provider, config)?)))
        });
    }

    /// Register an api (search + download) plugin constructor.
    pub fn register_api<P, F>(&mut self, type_name: &str, build: F)
    where
        P: ApiPlugin,
        F: Fn(&str, &PluginConfig) -> Result<P, EogateError> + Send + Sync + 'static,
    {
        self.register_fn(Topic::Api, type_name, move |provider, config| {
            Ok(BuiltPlugin::Api(Arc::new(build(provider, config)?)))
        });
    }

    /// Register a download plugin constructor.
    pub fn register_download<P, F>(&mut self, type_name: &str, build: F)
    where
        P: DownloadPlugin,
        F: Fn(&str, &PluginConfig) -> Result<P, EogateError> + Send + Sync + 'static,
    {
        self.register_fn(Topic::Download, type_name, move |provider, config| {
            Ok(BuiltPlugin::Download(Arc::new(build(provider, config)?)))
        });
    }

    /// Register an authentication plugin constructor.
    pub fn register_auth<P, F>(&mut self, type_name: &str, build: F)
    where
        P: AuthPlugin,
        F: Fn(&str, &PluginConfig) -> Result<P, EogateError> + Send + Sync + 'static,
    {
        self.register_fn(Topic::Auth, type_name, move |provider, config| {
            Ok(BuiltPlugin::Auth(Arc::new(build(provider, config)?)))
        });
    }

    /// Register a crunch plugin constructor.
    pub fn register_crunch<C, F>(&mut self, type_name: &str, build: F)
    where
        C: CrunchPlugin + 'static,
        F: Fn(&serde_json::Value) -> Result<C, EogateError> + Send + Sync + 'static,
    {
        self.register_crunch_factory(Arc::new(FnCrunchFactory {
            type_name: type_name.to_string(),
            build: Box::new(move |options| Ok(Box::new(build(options)?) as Box<dyn CrunchPlugin>)),
        }));
    }

    /// Look up the factory for a topic and type name.
    ///
    /// Fails with [`EogateError::UnknownPluginType`], suggesting a close
    /// registered name when there is one.
    pub fn factory(&self, topic: Topic, type_name: &str) -> Result<&Arc<dyn PluginFactory>, EogateError> {
        self.factories
            .get(&(topic, type_name.to_string()))
            .ok_or_else(|| self.unknown(topic, type_name))
    }

    /// Look up the factory for a crunch type name.
    pub fn crunch_factory(&self, type_name: &str) -> Result<&Arc<dyn CrunchFactory>, EogateError> {
        self.crunchers
            .get(type_name)
            .ok_or_else(|| self.unknown(Topic::Crunch, type_name))
    }

    fn unknown(&self, topic: Topic, type_name: &str) -> EogateError {
        let known = self.type_names(topic);
        EogateError::UnknownPluginType {
            topic,
            type_name: type_name.to_string(),
            suggestion: suggest_key(type_name, &known),
        }
    }

    pub fn contains(&self, topic: Topic, type_name: &str) -> bool {
        match topic {
            Topic::Crunch => self.crunchers.contains_key(type_name),
            _ => self.factories.contains_key(&(topic, type_name.to_string())),
        }
    }

    /// Registered type names for a topic, sorted.
    pub fn type_names(&self, topic: Topic) -> Vec<&str> {
        let mut names: Vec<&str> = match topic {
            Topic::Crunch => self.crunchers.keys().map(String::as_str).collect(),
            _ => self
                .factories
                .keys()
                .filter(|(t, _)| *t == topic)
                .map(|(_, name)| name.as_str())
                .collect(),
        };
        names.sort_unstable();
        names
    }

    /// Returns the number of registered factories, crunch factories included.
    pub fn len(&self) -> usize {
        self.factories.len() + self.crunchers.len()
    }

    /// Returns true if no factories are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty() && self.crunchers.is_empty()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<String> = self
            .factories
            .keys()
            .map(|(topic, name)| format!("{topic}/{name}"))
            .chain(self.crunchers.keys().map(|name| format!("crunch/{name}")))
            .collect();
        keys.sort_unstable();
        f.debug_struct("PluginRegistry").field("factories", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eogate_test_utils::{MockCrunch, MockSearch};

    fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register_search("StacSearch", |provider, config| {
            Ok(MockSearch::new(provider, config))
        });
        registry.register_search("QueryStringSearch", |provider, config| {
            Ok(MockSearch::new(provider, config))
        });
        registry.register_crunch("FilterLatestByName", |options| Ok(MockCrunch::new("FilterLatestByName", options)));
        registry
    }

    #[test]
    fn factory_lookup_by_topic_and_name() {
        let registry = registry();
        let factory = registry.factory(Topic::Search, "StacSearch").unwrap();
        assert_eq!(factory.topic(), Topic::Search);
        assert_eq!(factory.type_name(), "StacSearch");

        let built = factory.create("earth_search", &PluginConfig::new("StacSearch")).unwrap();
        assert_eq!(built.topic(), Topic::Search);
        assert_eq!(built.as_plugin().provider(), "earth_search");
    }

    #[test]
    fn same_name_under_other_topic_is_unknown() {
        let registry = registry();
        let Err(err) = registry.factory(Topic::Download, "StacSearch") else {
            panic!("search type must not resolve as a download factory");
        };
        assert!(matches!(
            err,
            EogateError::UnknownPluginType { topic: Topic::Download, .. }
        ));
    }

    #[test]
    fn unknown_type_suggests_close_name() {
        let registry = registry();
        match registry.factory(Topic::Search, "StacSerch") {
            Err(EogateError::UnknownPluginType { suggestion, .. }) => {
                assert_eq!(suggestion.as_deref(), Some("StacSearch"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("misspelled type must not resolve"),
        }
    }

    #[test]
    fn crunch_types_live_apart() {
        let registry = registry();
        assert!(registry.contains(Topic::Crunch, "FilterLatestByName"));
        assert!(!registry.contains(Topic::Search, "FilterLatestByName"));
        assert!(registry.crunch_factory("FilterOverlap").is_err());
        assert_eq!(registry.type_names(Topic::Crunch), vec!["FilterLatestByName"]);
    }

    #[test]
    fn type_names_sorted_and_len() {
        let registry = registry();
        assert_eq!(
            registry.type_names(Topic::Search),
            vec!["QueryStringSearch", "StacSearch"]
        );
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert!(PluginRegistry::new().is_empty());
    }
}
