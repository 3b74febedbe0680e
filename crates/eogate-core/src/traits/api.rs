// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Combined search + download contract for providers wrapped by a client library.

use crate::traits::download::DownloadPlugin;
use crate::traits::search::SearchPlugin;

/// A plugin that serves both search and download for its provider.
///
/// The same instance is returned for search and download resolution, so a
/// provider configured with only `api` shares one object across both paths.
pub trait ApiPlugin: SearchPlugin + DownloadPlugin {}

impl<T> ApiPlugin for T where T: SearchPlugin + DownloadPlugin {}
