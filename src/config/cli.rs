//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! simbench validate benchmark.json
//! simbench validate benchmark.json --detailed
//! simbench info benchmark.json --format json
//! simbench init cars196-repro --template cars196
//! simbench components
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Simbench: Image-Similarity Benchmark Configuration
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "simbench")]
#[command(version)]
#[command(about = "Validate, inspect, and scaffold image-similarity benchmark configurations")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate a configuration file
    Validate(ValidateArgs),

    /// Display a parsed configuration
    Info(InfoArgs),

    /// Scaffold a new benchmark configuration
    Init(InitArgs),

    /// List registered component tags
    Components(ComponentsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to configuration file (JSON or YAML)
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed configuration summary
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to configuration file (JSON or YAML)
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the init command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InitArgs {
    /// Benchmark name; used as the output file stem
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Starter template (minimal, cars196)
    #[arg(short, long, default_value = "minimal")]
    pub template: TemplateArg,

    /// Output path (defaults to <NAME>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the components command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ComponentsArgs {
    /// Only list tags for one component kind
    #[arg(short, long)]
    pub kind: Option<String>,
}

/// Output format for the info command
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(format!(
                "Unknown output format: {s}. Valid formats: text, json, yaml"
            )),
        }
    }
}

/// Template selector for the init command
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TemplateArg {
    #[default]
    Minimal,
    Cars196,
}

impl std::str::FromStr for TemplateArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(TemplateArg::Minimal),
            "cars196" => Ok(TemplateArg::Cars196),
            _ => Err(format!(
                "Unknown template: {s}. Valid templates: minimal, cars196"
            )),
        }
    }
}

impl From<TemplateArg> for super::Template {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Minimal => super::Template::Minimal,
            TemplateArg::Cars196 => super::Template::Cars196,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn test_parse_validate() {
        let cli = parse(&["simbench", "validate", "benchmark.json"]).unwrap();
        match cli.command {
            Command::Validate(args) => {
                assert_eq!(args.config, PathBuf::from("benchmark.json"));
                assert!(!args.detailed);
            }
            other => panic!("Expected Validate, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_validate_detailed() {
        let cli = parse(&["simbench", "validate", "benchmark.json", "--detailed"]).unwrap();
        match cli.command {
            Command::Validate(args) => assert!(args.detailed),
            other => panic!("Expected Validate, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_info_format() {
        let cli = parse(&["simbench", "info", "benchmark.json", "--format", "json"]).unwrap();
        match cli.command {
            Command::Info(args) => assert_eq!(args.format, OutputFormat::Json),
            other => panic!("Expected Info, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_init_template() {
        let cli = parse(&["simbench", "init", "repro", "--template", "cars196"]).unwrap();
        match cli.command {
            Command::Init(args) => {
                assert_eq!(args.name, "repro");
                assert_eq!(args.template, TemplateArg::Cars196);
                assert!(args.output.is_none());
            }
            other => panic!("Expected Init, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_unknown_format_rejected() {
        assert!(parse(&["simbench", "info", "b.json", "--format", "toml"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["simbench", "--verbose", "components"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }
}
