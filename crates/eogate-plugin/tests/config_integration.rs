// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin managers built from TOML provider configuration.

use std::collections::BTreeMap;

use eogate_config::{load_and_validate_str, override_from_mapping};
use eogate_core::{Product, Topic};
use eogate_plugin::PluginManager;
use eogate_test_utils::mock_registry;
use serde_json::json;

const PROVIDERS_TOML: &str = r#"
[[providers]]
name = "peps"
priority = 1

[providers.products.S2_MSI_L1C]
productType = "S2MSI1C"

[providers.search]
type = "QueryStringSearch"
api_endpoint = "https://peps.example/search.json"

[providers.download]
type = "HTTPDownload"

[providers.auth]
type = "HeaderAuth"
token = "from-file"

[[providers]]
name = "usgs"
group = "nasa"
priority = 1

[providers.products.S2_MSI_L1C]
[providers.products.LANDSAT_C2L1]

[providers.api]
type = "UsgsApi"

[[providers]]
name = "draft"

[providers.search]
type = "StacSearch"
"#;

fn manager() -> PluginManager {
    let config = load_and_validate_str(PROVIDERS_TOML).expect("fixture should validate");
    PluginManager::new(config.providers_config(), mock_registry())
}

#[test]
fn file_order_breaks_priority_ties() {
    let manager = manager();
    let names: Vec<String> = manager
        .search_plugins(Some("S2_MSI_L1C"), None)
        .unwrap()
        .map(|p| p.unwrap().provider().to_string())
        .collect();
    assert_eq!(names, vec!["peps", "usgs"]);
    assert_eq!(manager.skipped_providers(), vec!["draft"]);
}

#[test]
fn plugin_options_reach_the_instance() {
    let manager = manager();
    let search = manager.plugin_config("peps", Topic::Search).unwrap();
    assert_eq!(
        search.option_str("api_endpoint"),
        Some("https://peps.example/search.json")
    );
    assert!(search.products.contains_key("S2_MSI_L1C"));
    assert!(manager.auth_plugin("peps").unwrap().is_some());
    assert_eq!(
        manager.download_plugin(&Product::new("usgs", "LC08")).unwrap().topic(),
        Topic::Api
    );
}

#[test]
fn overrides_then_rebuild_change_selection() {
    let manager = manager();
    let mut providers = load_and_validate_str(PROVIDERS_TOML)
        .unwrap()
        .providers_config();
    let mut overrides = BTreeMap::new();
    overrides.insert("usgs".to_string(), json!({ "priority": 3 }));
    overrides.insert("draft".to_string(), json!({ "products": { "S2_MSI_L1C": {} } }));
    let skipped = override_from_mapping(&mut providers, overrides);
    assert!(skipped.is_empty());

    manager.rebuild(Some(providers));
    assert_eq!(manager.providers_for("S2_MSI_L1C"), vec!["usgs", "peps", "draft"]);
    let group: Vec<String> = manager
        .search_plugins(None, Some("nasa"))
        .unwrap()
        .map(|p| p.unwrap().provider().to_string())
        .collect();
    assert_eq!(group, vec!["usgs"]);
}
