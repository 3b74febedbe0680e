// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin resolution and caching for the Eogate provider gateway.
//!
//! Providers name, per topic, the plugin implementation serving them. The
//! [`PluginRegistry`] maps those type names to factories, the
//! [`PluginManager`] indexes providers by product type and hands out plugin
//! instances, building each (provider, topic) pair at most once.
//!
//! # Components
//!
//! - [`PluginRegistry`] - (topic, type name) → factory table
//! - [`PluginSource`] - a bundle of factories and provider records
//! - [`ProviderStore`] - normalized provider configurations
//! - [`ProductTypeIndex`] - product type → providers, best first
//! - [`PluginCache`] - memoized plugin instances
//! - [`PluginManager`] - the resolution surface

pub mod cache;
pub mod index;
pub mod instance;
pub mod manager;
pub mod registry;
pub mod source;
pub mod store;

pub use cache::PluginCache;
pub use index::ProductTypeIndex;
pub use instance::{BuiltPlugin, DownloadCapable, SearchCapable};
pub use manager::{PluginManager, PluginManagerBuilder, SearchPlugins};
pub use registry::{CrunchFactory, PluginFactory, PluginRegistry};
pub use source::PluginSource;
pub use store::ProviderStore;
