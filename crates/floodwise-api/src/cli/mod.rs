//! CLI command definitions for the `floodwise` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod catalog;
pub mod predict;
pub mod render;
pub mod wizard;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Estimate flood risk from twenty environmental and governance factors.
#[derive(Parser)]
#[command(name = "floodwise", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of `floodwise.toml` in the data directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model artifact path (overrides config and FLOODWISE_MODEL_PATH).
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Host to bind (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port).
        #[arg(long, short)]
        port: Option<u16>,

        /// Export trace spans through OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Fill the form step by step in the terminal.
    Wizard,

    /// One-shot prediction from a template or a JSON feature file.
    Predict {
        /// Template name (e.g. Sumatera, Belanda).
        #[arg(long, short, conflicts_with = "input", required_unless_present = "input")]
        template: Option<String>,

        /// JSON file mapping all twenty feature names to scores.
        #[arg(long, short)]
        input: Option<PathBuf>,
    },

    /// List the location templates.
    Templates,

    /// Show the categories, features and their bounds.
    Schema,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_predict_requires_a_source() {
        assert!(Cli::try_parse_from(["floodwise", "predict"]).is_err());
        assert!(
            Cli::try_parse_from(["floodwise", "predict", "-t", "Sumatera", "-i", "x.json"]).is_err()
        );

        let cli = Cli::try_parse_from(["floodwise", "--json", "predict", "--template", "Belanda"])
            .unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Predict { template: Some(ref t), input: None } if t == "Belanda"
        ));
    }

    #[test]
    fn test_serve_flags_are_optional() {
        let cli = Cli::try_parse_from(["floodwise", "-vv", "serve", "--otel"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Serve { host: None, port: None, otel: true }
        ));
    }
}
