// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability contracts for the Eogate plugin topics.
//!
//! Every provider-bound plugin extends the [`Plugin`] base trait. Search,
//! download and auth contracts use `#[async_trait]` for dynamic dispatch;
//! crunch plugins are synchronous result filters.

pub mod api;
pub mod auth;
pub mod crunch;
pub mod download;
pub mod plugin;
pub mod search;

pub use api::ApiPlugin;
pub use auth::AuthPlugin;
pub use crunch::CrunchPlugin;
pub use download::DownloadPlugin;
pub use plugin::Plugin;
pub use search::SearchPlugin;
