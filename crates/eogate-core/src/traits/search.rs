// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search capability contract.

use async_trait::async_trait;

use crate::error::EogateError;
use crate::traits::plugin::Plugin;
use crate::types::{Credentials, SearchPage, SearchParams};

/// A plugin able to query a provider catalogue.
#[async_trait]
pub trait SearchPlugin: Plugin {
    /// Runs one paged query against the provider.
    async fn query(
        &self,
        params: &SearchParams,
        auth: Option<&Credentials>,
    ) -> Result<SearchPage, EogateError>;
}
