// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that all provider-bound plugins implement.

use crate::types::Topic;

/// Identity and priority shared by every search, download, auth and api plugin.
///
/// Instances are built once per (provider, topic) and shared behind `Arc`.
/// `set_priority` is the only mutation the plugin manager performs on a
/// built instance.
pub trait Plugin: Send + Sync + 'static {
    /// Name of the provider this instance was built for.
    fn provider(&self) -> &str;

    /// The capability this instance was built to serve.
    fn topic(&self) -> Topic;

    /// Current priority of the provider, as last propagated by the manager.
    fn priority(&self) -> i64;

    fn set_priority(&self, priority: i64);
}
