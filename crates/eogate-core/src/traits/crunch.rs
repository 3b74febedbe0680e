// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crunch (post-processing filter) contract.

use crate::error::EogateError;
use crate::types::Product;

/// A per-query filter over search results (dedup, date or geometry filters).
///
/// Crunch plugins are not tied to a provider and are built fresh for every
/// request, so they do not implement [`Plugin`](crate::traits::Plugin).
pub trait CrunchPlugin: Send + Sync {
    /// Name of the registered type this instance was built from.
    fn name(&self) -> &str;

    fn crunch(&self, products: Vec<Product>) -> Result<Vec<Product>, EogateError>;
}
