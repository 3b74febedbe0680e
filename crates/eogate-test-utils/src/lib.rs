// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Eogate integration tests.
//!
//! Provides mock plugins, registries that count plugin constructions and
//! provider fixtures, so resolution and caching can be tested without any
//! provider endpoint.
//!
//! # Components
//!
//! - [`MockSearch`], [`MockDownload`], [`MockApi`], [`MockAuth`], [`MockCrunch`] - mock plugins
//! - [`mock_registry`] / [`counting_registry`] - registries of the mock types
//! - [`MockSource`] - a configurable registration source
//! - [`fixtures`] - provider configuration builders

pub mod fixtures;
pub mod mock_plugins;
pub mod mock_source;

pub use fixtures::{BuildCounter, counting_registry, mock_registry};
pub use mock_plugins::{MockApi, MockAuth, MockCrunch, MockDownload, MockSearch};
pub use mock_source::MockSource;
