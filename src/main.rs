use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use tiervpc::config_loader::{self, CliOverrides};
use tiervpc::orchestrator::{self, OutputFormat};

/// Generate a multi-tier network topology for one environment
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Environment label embedded in every resource identity
    #[arg(short, long)]
    environment: Option<String>,

    /// Path to a topology configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output document format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,

    /// Build the reduced layout without NAT gateways
    #[arg(long)]
    no_nat: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("Starting tiervpc topology generation");

    let overrides = CliOverrides {
        environment: args.environment.clone(),
        disable_nat: args.no_nat,
    };
    let config = config_loader::resolve_config(args.config.as_deref(), &overrides)?;

    info!("Environment: {}", config.general.environment);
    info!("Output format: {:?}", args.format);

    let document = orchestrator::generate(&config, args.format)?;
    orchestrator::write_output(&document, args.output.as_deref())?;

    info!("Topology generation completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["tiervpc", "--environment", "prod"]);

        assert_eq!(args.environment.as_deref(), Some("prod"));
        assert_eq!(args.config, None);
        assert_eq!(args.format, OutputFormat::Yaml);
        assert!(!args.no_nat);
        assert!(!args.verbose);
    }

    #[test]
    fn test_full_args() {
        let args = Args::parse_from([
            "tiervpc",
            "-e", "stage",
            "-c", "topology.yaml",
            "-o", "out/template.json",
            "--format", "template",
            "--no-nat",
            "-v",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("topology.yaml")));
        assert_eq!(args.output, Some(PathBuf::from("out/template.json")));
        assert_eq!(args.format, OutputFormat::Template);
        assert!(args.no_nat);
        assert!(args.verbose);
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(Args::try_parse_from(["tiervpc", "-e", "prod", "--format", "xml"]).is_err());
    }
}
