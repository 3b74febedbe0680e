// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Download capability contract.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::EogateError;
use crate::traits::plugin::Plugin;
use crate::types::{Credentials, Product};

/// A plugin able to fetch a product's data to local storage.
#[async_trait]
pub trait DownloadPlugin: Plugin {
    /// Downloads `product` below `output_dir` and returns the local path.
    async fn download(
        &self,
        product: &Product,
        auth: Option<&Credentials>,
        output_dir: &Path,
    ) -> Result<PathBuf, EogateError>;
}
