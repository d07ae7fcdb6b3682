//! Output orchestration.
//!
//! This module coordinates the flow from a resolved configuration to the
//! rendered document: build the topology, re-verify it, then serialize it in
//! the requested format.

use crate::config::TopologyConfig;
use crate::provision::{plan, render};
use crate::topology::{build_with, NetworkTopology};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Entity graph as YAML
    Yaml,
    /// Entity graph as JSON
    Json,
    /// Declarative resource template (JSON)
    Template,
}

/// Build and verify the topology described by `config`
pub fn generate_topology(config: &TopologyConfig) -> Result<NetworkTopology> {
    let topology = build_with(config).wrap_err_with(|| {
        format!(
            "Failed to build topology for environment '{}'",
            config.general.environment
        )
    })?;

    topology.verify().wrap_err("Built topology failed verification")?;

    Ok(topology)
}

/// Build the topology and render it as `format`
pub fn generate(config: &TopologyConfig, format: OutputFormat) -> Result<String> {
    let topology = generate_topology(config)?;

    let document = match format {
        OutputFormat::Yaml => serde_yaml::to_string(&topology)?,
        OutputFormat::Json => serde_json::to_string_pretty(&topology)?,
        OutputFormat::Template => {
            let plan = plan(&topology, &config.general.name)?;
            info!("Rendering template with {} resources", plan.records.len());
            serde_json::to_string_pretty(&render(&plan))?
        }
    };

    Ok(document)
}

/// Write the rendered document to `output`, or to stdout when no path is given
pub fn write_output(document: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .wrap_err_with(|| format!("Failed to create output directory '{}'", parent.display()))?;
            }
            fs::write(path, document)
                .wrap_err_with(|| format!("Failed to write output file '{}'", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            if !document.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_yaml_roundtrips() {
        let config = TopologyConfig::for_environment("prod");
        let yaml = generate(&config, OutputFormat::Yaml).unwrap();

        let parsed: NetworkTopology = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, generate_topology(&config).unwrap());
    }

    #[test]
    fn test_generate_template() {
        let config = TopologyConfig::for_environment("prod");
        let text = generate(&config, OutputFormat::Template).unwrap();

        let template: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(template["Description"], "basic-vpc (prod)");
        assert!(template["Resources"]["IgwProdAttachment"].is_object());
    }

    #[test]
    fn test_generate_invalid_environment() {
        let config = TopologyConfig::for_environment("bad name");
        let err = generate(&config, OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("Failed to build topology"));
    }

    #[test]
    fn test_write_output_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("topology.yaml");

        write_output("environment: prod\n", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "environment: prod\n");
    }
}
