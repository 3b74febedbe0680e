// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration sources: bundles of plugin factories and provider records.
//!
//! A source stands for a plugin package compiled into the binary. It
//! registers its factories and may ship provider configurations of its own,
//! which are merged into the store before the first index build.

use eogate_config::ProvidersConfig;
use eogate_core::EogateError;

use crate::registry::PluginRegistry;

/// A bundle of plugin factories, optionally with bundled provider records.
pub trait PluginSource: Send + Sync {
    /// Name used in logs and in the skipped-plugins list.
    fn name(&self) -> &str;

    /// Register this source's factories.
    ///
    /// Returning [`EogateError::Unavailable`] skips the source (recorded by
    /// the manager); any other error aborts manager construction.
    fn register(&self, registry: &mut PluginRegistry) -> Result<(), EogateError>;

    /// Provider records shipped with this source.
    fn providers(&self) -> Option<ProvidersConfig> {
        None
    }
}
