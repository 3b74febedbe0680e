// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Product-type index: product type → providers in selection order.
//!
//! Lists hold provider names and are ordered by descending priority. The
//! sort is stable, so providers of equal priority keep their registration
//! order; this is the tie-break every caller observes.

use std::cmp::Reverse;
use std::collections::HashMap;

use eogate_core::GENERIC_PRODUCT_TYPE;

use crate::store::ProviderStore;

#[derive(Debug, Clone, Default)]
pub struct ProductTypeIndex {
    entries: HashMap<String, Vec<String>>,
}

impl ProductTypeIndex {
    /// Build the index from a normalized store.
    ///
    /// The generic fallback entry always exists, empty if no provider
    /// declares it.
    pub fn build(store: &ProviderStore) -> Self {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        entries.insert(GENERIC_PRODUCT_TYPE.to_string(), Vec::new());

        for provider in store.iter() {
            for product_type in provider.products.keys() {
                entries
                    .entry(product_type.clone())
                    .or_default()
                    .push(provider.name.clone());
            }
        }

        let mut index = Self { entries };
        index.sort(store);
        index
    }

    /// Stable-sort every list by the providers' current priority, highest first.
    pub fn sort(&mut self, store: &ProviderStore) {
        for providers in self.entries.values_mut() {
            providers.sort_by_key(|name| Reverse(store.priority_of(name)));
        }
    }

    /// Providers serving `product_type`, in selection order.
    pub fn get(&self, product_type: &str) -> Option<&[String]> {
        self.entries.get(product_type).map(Vec::as_slice)
    }

    /// Providers of the generic fallback entry.
    pub fn generic(&self) -> &[String] {
        self.get(GENERIC_PRODUCT_TYPE).unwrap_or_default()
    }

    /// Indexed product types, sorted.
    pub fn product_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
