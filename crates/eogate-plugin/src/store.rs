// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider configuration store.
//!
//! Holds the authoritative provider mapping in registration order and
//! applies the structural normalization the index relies on.

use eogate_config::{ProviderConfig, ProvidersConfig, merge_providers};
use tracing::info;

/// The provider → configuration mapping owned by a plugin manager.
#[derive(Debug, Clone, Default)]
pub struct ProviderStore {
    providers: ProvidersConfig,
    skipped: Vec<String>,
}

impl ProviderStore {
    pub fn new(providers: ProvidersConfig) -> Self {
        Self {
            providers,
            skipped: Vec::new(),
        }
    }

    /// Carry over the providers skipped by an earlier store.
    pub fn with_skipped(mut self, skipped: Vec<String>) -> Self {
        self.skipped = skipped;
        self
    }

    /// Merge externally supplied records; last writer wins per provider.
    pub fn merge(&mut self, incoming: ProvidersConfig) {
        merge_providers(&mut self.providers, incoming);
    }

    /// Drop providers without products and resolve defaults in place.
    ///
    /// Unset priorities become 0 and every record is materialized so its
    /// plugin slots carry the provider priority and products. Returns the
    /// names dropped by this pass.
    pub fn normalize(&mut self) -> Vec<String> {
        let mut dropped = Vec::new();
        self.providers.retain(|name, provider| {
            if !provider.has_products() {
                info!(
                    provider = name.as_str(),
                    "provider has no product configured and will be skipped"
                );
                dropped.push(name.clone());
                return false;
            }
            if provider.priority.is_none() {
                provider.priority = Some(0);
            }
            provider.materialize();
            true
        });
        for name in &dropped {
            if !self.skipped.contains(name) {
                self.skipped.push(name.clone());
            }
        }
        dropped
    }

    /// Set a provider's priority and re-materialize its plugin slots.
    ///
    /// Returns false when the provider is unknown.
    pub fn set_priority(&mut self, provider: &str, priority: i64) -> bool {
        match self.providers.get_mut(provider) {
            Some(config) => {
                config.priority = Some(priority);
                config.materialize();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, provider: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider)
    }

    /// Effective priority of a provider (0 for unknown providers).
    pub fn priority_of(&self, provider: &str) -> i64 {
        self.providers.get(provider).map_or(0, ProviderConfig::priority)
    }

    /// Providers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Providers dropped by normalization since this store was created.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn into_config(self) -> ProvidersConfig {
        self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
