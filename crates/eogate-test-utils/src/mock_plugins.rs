// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plugins for deterministic testing.
//!
//! Each mock keeps the provider name and plugin configuration it was built
//! with, and answers queries from that configuration alone. A
//! `build_delay_ms` option makes construction slow, which widens race
//! windows in concurrency tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use eogate_config::PluginConfig;
use eogate_core::{
    AuthPlugin, Credentials, CrunchPlugin, DownloadPlugin, EogateError, Plugin, PriorityCell,
    Product, SearchPage, SearchParams, SearchPlugin, Topic,
};
use tracing::debug;

fn simulate_build(provider: &str, config: &PluginConfig) {
    if let Some(ms) = config.option("build_delay_ms").and_then(|v| v.as_u64()) {
        std::thread::sleep(Duration::from_millis(ms));
    }
    debug!(provider, type_name = config.type_name.as_str(), "mock plugin built");
}

/// Products a mock provider answers with: one per matching product type.
fn mock_products(provider: &str, config: &PluginConfig, params: &SearchParams) -> SearchPage {
    let page = params.page.unwrap_or(1);
    let products: Vec<Product> = config
        .products
        .keys()
        .filter(|pt| params.product_type.as_ref().is_none_or(|wanted| wanted == *pt))
        .map(|pt| {
            Product::new(provider, format!("{provider}-{pt}-{page}")).with_product_type(pt.clone())
        })
        .collect();
    let total = Some(products.len() as u64);
    SearchPage { products, total }
}

/// A mock search plugin.
#[derive(Debug)]
pub struct MockSearch {
    provider: String,
    config: PluginConfig,
    priority: PriorityCell,
}

impl MockSearch {
    pub fn new(provider: &str, config: &PluginConfig) -> Self {
        simulate_build(provider, config);
        Self {
            provider: provider.to_string(),
            priority: PriorityCell::new(config.priority),
            config: config.clone(),
        }
    }

    /// The configuration this instance was built with.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }
}

impl Plugin for MockSearch {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn topic(&self) -> Topic {
        Topic::Search
    }

    fn priority(&self) -> i64 {
        self.priority.get()
    }

    fn set_priority(&self, priority: i64) {
        self.priority.set(priority);
    }
}

#[async_trait]
impl SearchPlugin for MockSearch {
    async fn query(
        &self,
        params: &SearchParams,
        _auth: Option<&Credentials>,
    ) -> Result<SearchPage, EogateError> {
        Ok(mock_products(&self.provider, &self.config, params))
    }
}

/// A mock download plugin that only computes the target path.
#[derive(Debug)]
pub struct MockDownload {
    provider: String,
    priority: PriorityCell,
}

impl MockDownload {
    pub fn new(provider: &str, config: &PluginConfig) -> Self {
        simulate_build(provider, config);
        Self {
            provider: provider.to_string(),
            priority: PriorityCell::new(config.priority),
        }
    }
}

impl Plugin for MockDownload {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn topic(&self) -> Topic {
        Topic::Download
    }

    fn priority(&self) -> i64 {
        self.priority.get()
    }

    fn set_priority(&self, priority: i64) {
        self.priority.set(priority);
    }
}

#[async_trait]
impl DownloadPlugin for MockDownload {
    async fn download(
        &self,
        product: &Product,
        _auth: Option<&Credentials>,
        output_dir: &Path,
    ) -> Result<PathBuf, EogateError> {
        if product.provider != self.provider {
            return Err(EogateError::Plugin {
                message: format!(
                    "{} cannot download a product of {}",
                    self.provider, product.provider
                ),
                source: None,
            });
        }
        Ok(output_dir.join(&product.id))
    }
}

/// A mock api plugin: searches and downloads on its own.
#[derive(Debug)]
pub struct MockApi {
    provider: String,
    config: PluginConfig,
    priority: PriorityCell,
}

impl MockApi {
    pub fn new(provider: &str, config: &PluginConfig) -> Self {
        simulate_build(provider, config);
        Self {
            provider: provider.to_string(),
            priority: PriorityCell::new(config.priority),
            config: config.clone(),
        }
    }
}

impl Plugin for MockApi {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn topic(&self) -> Topic {
        Topic::Api
    }

    fn priority(&self) -> i64 {
        self.priority.get()
    }

    fn set_priority(&self, priority: i64) {
        self.priority.set(priority);
    }
}

#[async_trait]
impl SearchPlugin for MockApi {
    async fn query(
        &self,
        params: &SearchParams,
        _auth: Option<&Credentials>,
    ) -> Result<SearchPage, EogateError> {
        Ok(mock_products(&self.provider, &self.config, params))
    }
}

#[async_trait]
impl DownloadPlugin for MockApi {
    async fn download(
        &self,
        product: &Product,
        _auth: Option<&Credentials>,
        output_dir: &Path,
    ) -> Result<PathBuf, EogateError> {
        Ok(output_dir.join(&self.provider).join(&product.id))
    }
}

/// A mock authentication plugin returning a bearer header.
///
/// The token comes from the `token` option, `mock-token` by default.
#[derive(Debug)]
pub struct MockAuth {
    provider: String,
    token: String,
    priority: PriorityCell,
}

impl MockAuth {
    pub fn new(provider: &str, config: &PluginConfig) -> Self {
        simulate_build(provider, config);
        Self {
            provider: provider.to_string(),
            token: config.option_str("token").unwrap_or("mock-token").to_string(),
            priority: PriorityCell::new(config.priority),
        }
    }
}

impl Plugin for MockAuth {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn topic(&self) -> Topic {
        Topic::Auth
    }

    fn priority(&self) -> i64 {
        self.priority.get()
    }

    fn set_priority(&self, priority: i64) {
        self.priority.set(priority);
    }
}

#[async_trait]
impl AuthPlugin for MockAuth {
    async fn authenticate(&self) -> Result<Credentials, EogateError> {
        let mut credentials = Credentials::default();
        credentials
            .headers
            .insert("Authorization".to_string(), format!("Bearer {}", self.token));
        Ok(credentials)
    }
}

/// A mock crunch plugin keeping at most `limit` products (all by default).
#[derive(Debug)]
pub struct MockCrunch {
    name: String,
    limit: Option<usize>,
}

impl MockCrunch {
    pub fn new(name: &str, options: &serde_json::Value) -> Self {
        Self {
            name: name.to_string(),
            limit: options
                .get("limit")
                .and_then(|v| v.as_u64())
                .map(|limit| limit as usize),
        }
    }
}

impl CrunchPlugin for MockCrunch {
    fn name(&self) -> &str {
        &self.name
    }

    fn crunch(&self, mut products: Vec<Product>) -> Result<Vec<Product>, EogateError> {
        if let Some(limit) = self.limit {
            products.truncate(limit);
        }
        Ok(products)
    }
}
