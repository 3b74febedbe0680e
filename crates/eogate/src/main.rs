// SPDX-FileCopyrightText: 2026 Eogate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Eogate - operator CLI for the provider gateway.
//!
//! Loads the provider configuration the way the gateway does, builds the
//! product-type index and reports how searches would be routed.

mod report;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eogate_config::diagnostic::figment_to_config_errors;
use eogate_config::loader::overrides_from_path;
use eogate_config::validation::validate_layer;
use eogate_config::{
    ConfigError, EogateConfig, ProvidersConfig, apply_env_overrides, override_from_mapping,
    render_errors,
};
use eogate_plugin::{PluginManager, PluginRegistry};

/// Eogate - inspect provider configuration and plugin resolution order.
#[derive(Parser, Debug)]
#[command(name = "eogate", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// TOML file of per-provider overrides, applied after `EOGATE__*` variables.
    #[arg(long, global = true)]
    overrides: Option<PathBuf>,

    /// Change a provider's priority before reporting (repeatable).
    #[arg(long = "priority", value_name = "PROVIDER=N", value_parser = parse_priority, global = true)]
    priorities: Vec<(String, i64)>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List providers in resolution order.
    Providers {
        /// Only providers serving this product type.
        #[arg(long)]
        product_type: Option<String>,
    },
    /// List product types and the providers serving them.
    ProductTypes,
    /// Print a provider's normalized configuration.
    Show {
        provider: String,
    },
    /// Load and validate the configuration, then summarize it.
    Check,
}

fn parse_priority(value: &str) -> Result<(String, i64), String> {
    let (provider, priority) = value
        .split_once('=')
        .ok_or_else(|| format!("expected PROVIDER=N, got `{value}`"))?;
    if provider.is_empty() {
        return Err(format!("missing provider name in `{value}`"));
    }
    let priority = priority
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid priority in `{value}`: {e}"))?;
    Ok((provider.to_string(), priority))
}

fn load_config(path: Option<&Path>) -> Result<EogateConfig, Vec<ConfigError>> {
    match path {
        Some(path) => {
            let config =
                eogate_config::load_config_from_path(path).map_err(figment_to_config_errors)?;
            validate_layer(&config, &path.display().to_string())?;
            Ok(config)
        }
        None => eogate_config::load_and_validate(),
    }
}

/// Apply environment overrides, then the overrides file if any.
///
/// Returns the providers whose override was skipped.
fn apply_overrides(
    providers: &mut ProvidersConfig,
    overrides: Option<&Path>,
) -> Result<Vec<String>, Vec<ConfigError>> {
    let mut skipped = apply_env_overrides(providers)?;
    if let Some(path) = overrides {
        let mapping = overrides_from_path(path).map_err(figment_to_config_errors)?;
        skipped.extend(override_from_mapping(providers, mapping));
    }
    Ok(skipped)
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("eogate={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_level);

    let mut providers = config.providers_config();
    let skipped_overrides = match apply_overrides(&mut providers, cli.overrides.as_deref()) {
        Ok(skipped) => skipped,
        Err(errors) => {
            render_errors(&errors);
            std::process::exit(1);
        }
    };

    // No plugin implementation is compiled into the CLI: reports only read
    // the store and index, which never build plugins.
    let manager = PluginManager::new(providers, PluginRegistry::new());
    for (provider, priority) in &cli.priorities {
        manager.set_priority(provider, *priority);
    }

    match cli.command {
        Some(Commands::Providers { product_type }) => {
            print!("{}", report::providers_report(&manager, product_type.as_deref()));
        }
        Some(Commands::ProductTypes) => {
            print!("{}", report::product_types_report(&manager));
        }
        Some(Commands::Show { provider }) => match report::show_provider(&manager, &provider) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("eogate: {e}");
                std::process::exit(1);
            }
        },
        Some(Commands::Check) => {
            print!("{}", report::check_report(&manager, &skipped_overrides));
        }
        None => {
            println!("eogate: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn priority_arguments_parse() {
        assert_eq!(parse_priority("peps=3"), Ok(("peps".to_string(), 3)));
        assert_eq!(parse_priority("usgs=-2"), Ok(("usgs".to_string(), -2)));
        assert!(parse_priority("peps").is_err());
        assert!(parse_priority("=3").is_err());
        assert!(parse_priority("peps=high").is_err());
    }

    #[test]
    fn global_flags_reach_subcommands() {
        let cli = Cli::try_parse_from([
            "eogate",
            "providers",
            "--product-type",
            "S2_MSI_L1C",
            "--priority",
            "peps=4",
            "--priority",
            "usgs=1",
        ])
        .unwrap();
        assert_eq!(
            cli.priorities,
            vec![("peps".to_string(), 4), ("usgs".to_string(), 1)]
        );
        assert!(matches!(
            cli.command,
            Some(Commands::Providers { product_type: Some(ref pt) }) if pt == "S2_MSI_L1C"
        ));
    }

    #[test]
    fn config_file_is_loaded_and_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("providers.toml");
        std::fs::write(
            &path,
            r#"
log_level = "debug"

[[providers]]
name = "peps"

[providers.products.S2_MSI_L1C]

[providers.search]
type = "QueryStringSearch"
"#,
        )
        .unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.providers.len(), 1);

        std::fs::write(&path, "log_level = \"loud\"\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn overrides_file_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.toml");
        std::fs::write(&path, "[peps]\npriority = 9\n\n[ghost]\npriority = 1\n").unwrap();

        let config = eogate_config::load_and_validate_str(
            r#"
[[providers]]
name = "peps"

[providers.products.S2_MSI_L1C]

[providers.search]
type = "QueryStringSearch"
"#,
        )
        .unwrap();
        let mut providers = config.providers_config();
        let skipped = apply_overrides(&mut providers, Some(&path)).unwrap();
        assert_eq!(providers["peps"].priority, Some(9));
        assert!(skipped.contains(&"ghost".to_string()));
    }
}
