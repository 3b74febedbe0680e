// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Eogate provider gateway.

use thiserror::Error;

use crate::types::Topic;

/// The primary error type returned by plugin resolution and capability traits.
#[derive(Debug, Error)]
pub enum EogateError {
    /// No provider configuration matches the requested provider and/or product type.
    #[error("{}", unsupported_message(provider.as_deref(), product_type.as_deref()))]
    UnsupportedProvider {
        provider: Option<String>,
        product_type: Option<String>,
    },

    /// A provider lacks a capability it needs (no search/api, no download/api).
    #[error("misconfigured provider: {0}")]
    Misconfigured(String),

    /// A configuration names a plugin type that is not registered for the topic.
    #[error("unknown {topic} plugin type `{type_name}`{}", suggestion_hint(suggestion.as_deref()))]
    UnknownPluginType {
        topic: Topic,
        type_name: String,
        suggestion: Option<String>,
    },

    /// A registered factory refused to build a plugin from its configuration.
    #[error("failed to build {topic} plugin for {provider}: {message}")]
    PluginConstruction {
        provider: String,
        topic: Topic,
        message: String,
    },

    /// A registration source cannot be used in this build (missing optional feature, etc.).
    #[error("plugin source {name} unavailable: {reason}")]
    Unavailable { name: String, reason: String },

    /// Configuration errors (invalid provider record, bad override value).
    #[error("configuration error: {0}")]
    Config(String),

    /// Errors raised by plugin implementations while performing I/O.
    #[error("plugin error: {message}")]
    Plugin {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EogateError {
    /// Shorthand for an unsupported provider/product type pair.
    pub fn unsupported(provider: Option<&str>, product_type: Option<&str>) -> Self {
        EogateError::UnsupportedProvider {
            provider: provider.map(str::to_string),
            product_type: product_type.map(str::to_string),
        }
    }
}

fn unsupported_message(provider: Option<&str>, product_type: Option<&str>) -> String {
    let provider = provider.unwrap_or("None");
    match product_type {
        Some(product_type) => format!("{provider} is not (yet) supported for {product_type}"),
        None => format!("{provider} is not (yet) supported"),
    }
}

fn suggestion_hint(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean `{s}`?)"),
        None => String::new(),
    }
}
