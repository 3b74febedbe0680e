// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A configurable registration source.

use eogate_config::ProvidersConfig;
use eogate_config::model::providers_from_list;
use eogate_core::EogateError;
use eogate_plugin::{PluginRegistry, PluginSource};

use crate::fixtures::search_provider;
use crate::mock_plugins::MockSearch;

/// A source registering one search type, `<name>Search`, and optionally
/// bundling providers or failing.
#[derive(Debug, Clone)]
pub struct MockSource {
    name: String,
    providers: Option<ProvidersConfig>,
    unavailable: Option<String>,
    broken: Option<String>,
}

impl MockSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            providers: None,
            unavailable: None,
            broken: None,
        }
    }

    /// The search type name this source registers.
    pub fn search_type(&self) -> String {
        format!("{}Search", self.name)
    }

    pub fn with_providers(mut self, providers: ProvidersConfig) -> Self {
        self.providers = Some(providers);
        self
    }

    /// Bundle one provider per name, searched through this source's type.
    pub fn with_provider(mut self, name: &str, priority: i64, products: &[&str]) -> Self {
        let mut provider = search_provider(name, Some(priority), products);
        if let Some(search) = provider.search.as_mut() {
            search.type_name = self.search_type();
        }
        let mut providers = self.providers.take().unwrap_or_default();
        providers.extend(providers_from_list(vec![provider]));
        self.providers = Some(providers);
        self
    }

    /// Fail registration with [`EogateError::Unavailable`].
    pub fn unavailable(mut self, reason: &str) -> Self {
        self.unavailable = Some(reason.to_string());
        self
    }

    /// Fail registration with an internal error.
    pub fn broken(mut self, message: &str) -> Self {
        self.broken = Some(message.to_string());
        self
    }
}

impl PluginSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn register(&self, registry: &mut PluginRegistry) -> Result<(), EogateError> {
        if let Some(reason) = &self.unavailable {
            return Err(EogateError::Unavailable {
                name: self.search_type(),
                reason: reason.clone(),
            });
        }
        if let Some(message) = &self.broken {
            return Err(EogateError::Internal(message.clone()));
        }
        registry.register_search(&self.search_type(), |provider, config| {
            Ok(MockSearch::new(provider, config))
        });
        Ok(())
    }

    fn providers(&self) -> Option<ProvidersConfig> {
        self.providers.clone()
    }
}
