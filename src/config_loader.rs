use crate::config::{NatMode, TopologyConfig};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<TopologyConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file '{}'", config_path.display()))?;

    let config: TopologyConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", config_path.display()))?;

    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub environment: Option<String>,
    pub disable_nat: bool,
}

/// Apply CLI overrides to a configuration and validate the result
pub fn apply_overrides(config: &mut TopologyConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(environment) = &overrides.environment {
        info!("Environment overridden from command line: {}", environment);
        config.general.environment = environment.clone();
    }

    if overrides.disable_nat {
        info!("NAT gateways disabled from command line");
        config.network.nat = NatMode::Disabled;
    }

    config.validate()?;

    Ok(())
}

/// Load the configuration file if one is given, otherwise start from the
/// default layout, then apply overrides
pub fn resolve_config(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<TopologyConfig> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => TopologyConfig::default(),
    };

    apply_overrides(&mut config, overrides)?;

    Ok(config)
}
