// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed handles to built plugin instances.

use std::sync::Arc;

use eogate_core::{ApiPlugin, AuthPlugin, DownloadPlugin, Plugin, SearchPlugin, Topic};

/// A plugin instance as produced by a factory and stored in the cache.
#[derive(Clone)]
pub enum BuiltPlugin {
    Search(Arc<dyn SearchPlugin>),
    Api(Arc<dyn ApiPlugin>),
    Download(Arc<dyn DownloadPlugin>),
    Auth(Arc<dyn AuthPlugin>),
}

impl BuiltPlugin {
    /// The topic this variant serves.
    pub fn topic(&self) -> Topic {
        match self {
            BuiltPlugin::Search(_) => Topic::Search,
            BuiltPlugin::Api(_) => Topic::Api,
            BuiltPlugin::Download(_) => Topic::Download,
            BuiltPlugin::Auth(_) => Topic::Auth,
        }
    }

    pub fn as_plugin(&self) -> &dyn Plugin {
        match self {
            BuiltPlugin::Search(p) => p.as_ref(),
            BuiltPlugin::Api(p) => p.as_ref(),
            BuiltPlugin::Download(p) => p.as_ref(),
            BuiltPlugin::Auth(p) => p.as_ref(),
        }
    }

    /// True when both handles point at the same instance.
    pub fn ptr_eq(&self, other: &BuiltPlugin) -> bool {
        std::ptr::addr_eq(self.as_plugin(), other.as_plugin())
    }
}

impl std::fmt::Debug for BuiltPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plugin = self.as_plugin();
        f.debug_struct("BuiltPlugin")
            .field("topic", &self.topic())
            .field("provider", &plugin.provider())
            .field("priority", &plugin.priority())
            .finish()
    }
}

/// A plugin able to search: either a dedicated search plugin or an api plugin.
#[derive(Clone)]
pub enum SearchCapable {
    Search(Arc<dyn SearchPlugin>),
    Api(Arc<dyn ApiPlugin>),
}

impl SearchCapable {
    /// The search contract of this plugin, whichever variant it is.
    pub fn search(&self) -> Arc<dyn SearchPlugin> {
        match self {
            SearchCapable::Search(p) => Arc::clone(p),
            SearchCapable::Api(p) => Arc::clone(p) as Arc<dyn SearchPlugin>,
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            SearchCapable::Search(p) => p.provider(),
            SearchCapable::Api(p) => p.provider(),
        }
    }

    pub fn priority(&self) -> i64 {
        match self {
            SearchCapable::Search(p) => p.priority(),
            SearchCapable::Api(p) => p.priority(),
        }
    }

    pub fn topic(&self) -> Topic {
        match self {
            SearchCapable::Search(_) => Topic::Search,
            SearchCapable::Api(_) => Topic::Api,
        }
    }

    /// True when both handles point at the same instance.
    pub fn ptr_eq(&self, other: &SearchCapable) -> bool {
        Arc::ptr_eq(&self.search(), &other.search())
    }
}

impl std::fmt::Debug for SearchCapable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCapable")
            .field("topic", &self.topic())
            .field("provider", &self.provider())
            .field("priority", &self.priority())
            .finish()
    }
}

/// A plugin able to download: either a dedicated download plugin or an api plugin.
#[derive(Clone)]
pub enum DownloadCapable {
    Download(Arc<dyn DownloadPlugin>),
    Api(Arc<dyn ApiPlugin>),
}

impl DownloadCapable {
    /// The download contract of this plugin, whichever variant it is.
    pub fn download(&self) -> Arc<dyn DownloadPlugin> {
        match self {
            DownloadCapable::Download(p) => Arc::clone(p),
            DownloadCapable::Api(p) => Arc::clone(p) as Arc<dyn DownloadPlugin>,
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            DownloadCapable::Download(p) => p.provider(),
            DownloadCapable::Api(p) => p.provider(),
        }
    }

    pub fn priority(&self) -> i64 {
        match self {
            DownloadCapable::Download(p) => p.priority(),
            DownloadCapable::Api(p) => p.priority(),
        }
    }

    pub fn topic(&self) -> Topic {
        match self {
            DownloadCapable::Download(_) => Topic::Download,
            DownloadCapable::Api(_) => Topic::Api,
        }
    }
}

impl std::fmt::Debug for DownloadCapable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadCapable")
            .field("topic", &self.topic())
            .field("provider", &self.provider())
            .field("priority", &self.priority())
            .finish()
    }
}
