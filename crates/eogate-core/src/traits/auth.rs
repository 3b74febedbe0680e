// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication capability contract.

use async_trait::async_trait;

use crate::error::EogateError;
use crate::traits::plugin::Plugin;
use crate::types::Credentials;

/// A plugin that obtains credentials for a provider.
///
/// Providers served by an [`ApiPlugin`](crate::traits::ApiPlugin) usually
/// authenticate on their own and configure no auth plugin.
#[async_trait]
pub trait AuthPlugin: Plugin {
    async fn authenticate(&self) -> Result<Credentials, EogateError>;
}
