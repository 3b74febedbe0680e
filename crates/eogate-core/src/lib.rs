// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Eogate provider gateway.
//!
//! This crate provides the capability traits plugin implementations satisfy,
//! the shared error type, and the value types exchanged between the plugin
//! manager and the plugins it builds.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::EogateError;
pub use types::{
    Credentials, GENERIC_PRODUCT_TYPE, PriorityCell, Product, SearchPage, SearchParams, Topic,
};

// Re-export all capability traits at crate root.
pub use traits::{ApiPlugin, AuthPlugin, CrunchPlugin, DownloadPlugin, Plugin, SearchPlugin};
