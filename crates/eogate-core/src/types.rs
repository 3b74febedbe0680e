// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the capability traits and the plugin manager.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Catch-all product type used when a requested product type has no
/// direct provider mapping.
pub const GENERIC_PRODUCT_TYPE: &str = "GENERIC_PRODUCT_TYPE";

/// A functional role a plugin fulfills for a provider.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Search,
    Download,
    Auth,
    Crunch,
    Api,
}

/// A product returned by a search plugin, tagged with the provider it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Name of the provider the product originates from.
    pub provider: String,
    /// Provider-side identifier of the product.
    pub id: String,
    /// Product type the product belongs to, when known.
    #[serde(default)]
    pub product_type: Option<String>,
    /// Free-form product properties.
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    pub fn new(provider: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            id: id.into(),
            product_type: None,
            properties: serde_json::Map::new(),
        }
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }
}

/// Parameters handed to a search plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub product_type: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    pub items_per_page: Option<u32>,
    /// Provider-agnostic query parameters (geometry, dates, cloud cover...).
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub products: Vec<Product>,
    /// Total number of matching products, if the provider reports it.
    pub total: Option<u64>,
}

/// Credentials produced by an authentication plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Headers to attach to provider requests.
    pub headers: BTreeMap<String, String>,
    /// Query parameters to attach to provider requests (signed URLs, tokens).
    pub query: BTreeMap<String, String>,
}

/// Priority of a built plugin, updatable in place through a shared reference.
///
/// Plugins are cached behind `Arc`, so the only field the manager rewrites
/// after construction lives in an atomic.
#[derive(Debug, Default)]
pub struct PriorityCell(AtomicI64);

impl PriorityCell {
    pub fn new(priority: i64) -> Self {
        Self(AtomicI64::new(priority))
    }

    pub fn get(&self) -> i64 {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, priority: i64) {
        self.0.store(priority, Ordering::Release);
    }
}
