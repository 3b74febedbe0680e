// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text reports over a plugin manager's resolved state.

use std::cmp::Reverse;
use std::fmt::Write;

use eogate_config::ProviderConfig;
use eogate_core::{EogateError, GENERIC_PRODUCT_TYPE};
use eogate_plugin::PluginManager;

fn provider_line(rank: usize, config: &ProviderConfig) -> String {
    let topics: Vec<String> = config.plugins().map(|(topic, _)| topic.to_string()).collect();
    let mut line = format!(
        "{rank:>3}. {:<24} priority={:<4} plugins={}",
        config.name,
        config.priority(),
        topics.join(",")
    );
    if let Some(group) = &config.group {
        let _ = write!(line, " group={group}");
    }
    line
}

/// Providers in the order searches would try them.
///
/// With a product type, only the providers indexed under it, or the generic
/// fallback providers when it has none.
pub fn providers_report(manager: &PluginManager, product_type: Option<&str>) -> String {
    let mut out = String::new();
    let names = match product_type {
        Some(pt) => {
            let names = manager.providers_for(pt);
            if names.is_empty() {
                let _ = writeln!(out, "{pt}: no provider, using {GENERIC_PRODUCT_TYPE}");
                manager.providers_for(GENERIC_PRODUCT_TYPE)
            } else {
                names
            }
        }
        None => manager.providers(),
    };

    let mut configs: Vec<ProviderConfig> = names
        .iter()
        .filter_map(|name| manager.provider_config(name))
        .collect();
    configs.sort_by_key(|config| Reverse(config.priority()));

    if configs.is_empty() {
        out.push_str("no provider available\n");
    }
    for (rank, config) in configs.iter().enumerate() {
        let _ = writeln!(out, "{}", provider_line(rank + 1, config));
    }
    out
}

/// Every indexed product type with its providers, best first.
pub fn product_types_report(manager: &PluginManager) -> String {
    let mut out = String::new();
    for product_type in manager.product_types() {
        let providers = manager.providers_for(&product_type);
        let listed = if providers.is_empty() {
            "-".to_string()
        } else {
            providers.join(", ")
        };
        let _ = writeln!(out, "{product_type}: {listed}");
    }
    out
}

/// A provider's normalized configuration as TOML.
pub fn show_provider(manager: &PluginManager, name: &str) -> Result<String, EogateError> {
    let config = manager
        .provider_config(name)
        .ok_or_else(|| EogateError::unsupported(Some(name), None))?;
    toml::to_string_pretty(&config)
        .map_err(|e| EogateError::Internal(format!("cannot render {name} as TOML: {e}")))
}

/// Summary of what was loaded and what was left out.
pub fn check_report(manager: &PluginManager, skipped_overrides: &[String]) -> String {
    let mut out = String::new();
    let providers = manager.providers();
    let product_types = manager.product_types();
    let _ = writeln!(
        out,
        "{} providers, {} product types",
        providers.len(),
        product_types.len()
    );

    let skipped = manager.skipped_providers();
    if !skipped.is_empty() {
        let _ = writeln!(out, "skipped (no product): {}", skipped.join(", "));
    }
    if !skipped_overrides.is_empty() {
        let _ = writeln!(out, "skipped overrides: {}", skipped_overrides.join(", "));
    }
    if manager.providers_for(GENERIC_PRODUCT_TYPE).is_empty() {
        let _ = writeln!(out, "warning: no provider serves {GENERIC_PRODUCT_TYPE}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use eogate_config::model::providers_from_list;
    use eogate_test_utils::fixtures::{api_provider, full_provider, search_provider};
    use eogate_test_utils::mock_registry;

    fn manager() -> PluginManager {
        PluginManager::new(
            providers_from_list(vec![
                full_provider("peps", Some(1), &["S2_MSI_L1C", GENERIC_PRODUCT_TYPE]),
                api_provider("usgs", Some(3), &["LANDSAT_C2L1"]).with_group("nasa"),
                search_provider("empty", None, &[]),
            ]),
            mock_registry(),
        )
    }

    #[test]
    fn providers_listed_by_priority() {
        let report = providers_report(&manager(), None);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("usgs"));
        assert!(lines[0].contains("plugins=api"));
        assert!(lines[0].ends_with("group=nasa"));
        assert!(lines[1].contains("plugins=search,download,auth"));
    }

    #[test]
    fn unknown_product_type_reports_fallback() {
        let report = providers_report(&manager(), Some("SAR"));
        assert!(report.starts_with("SAR: no provider, using GENERIC_PRODUCT_TYPE"));
        assert!(report.contains("peps"));
        assert!(!report.contains("usgs"));
    }

    #[test]
    fn product_types_list_providers() {
        let report = product_types_report(&manager());
        assert!(report.contains("LANDSAT_C2L1: usgs\n"));
        assert!(report.contains("GENERIC_PRODUCT_TYPE: peps\n"));
    }

    #[test]
    fn show_renders_toml() {
        let manager = manager();
        let rendered = show_provider(&manager, "peps").unwrap();
        assert!(rendered.contains("name = \"peps\""));
        assert!(rendered.contains("[search]"));
        assert!(show_provider(&manager, "empty").is_err());
    }

    #[test]
    fn check_mentions_skipped_providers() {
        let report = check_report(&manager(), &["ghost".to_string()]);
        assert!(report.starts_with("2 providers, 3 product types"));
        assert!(report.contains("skipped (no product): empty"));
        assert!(report.contains("skipped overrides: ghost"));
        assert!(!report.contains("warning"));
    }
}
