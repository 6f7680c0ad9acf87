//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// JSON output
    Json,
}

impl From<OutputFormat> for commlog_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => commlog_domain::OutputFormat::Table,
            OutputFormat::Json => commlog_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for ewp-commlog
#[derive(Parser, Debug)]
#[command(name = "ewp-commlog")]
#[command(author, version, about = "Decode and inspect EWP host communication logs")]
#[command(long_about = r#"
ewp-commlog decodes communication log records written as JSON Lines, one
tagged record per line ({"type": "EWP_OUT", ...}), into typed logs.

Unknown types, malformed records and shape mismatches are rejected and
reported; they never abort the batch.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./commlog.toml      Project-level config
3. ~/.config/ewp-commlog/config.toml   Global config

Example:
  ewp-commlog decode logs.jsonl --write canonical.jsonl
  ewp-commlog inspect logs.jsonl --filter '{"type": "HAS_EXCEPTION", "value": true}'
  ewp-commlog inspect logs.jsonl --id 42
  ewp-commlog registry
"#)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Accept records carrying fields their type does not declare
    #[arg(long, global = true)]
    pub ignore_unknown_fields: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a JSONL file and report accepted and rejected records
    Decode {
        /// JSONL file with one communication log per line
        file: PathBuf,

        /// Write accepted records, re-encoded, to this JSONL file
        #[arg(short, long, value_name = "OUT")]
        write: Option<PathBuf>,

        /// Maximum number of records decoded at the same time
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,
    },

    /// List or show decoded communication logs
    Inspect {
        /// JSONL file with one communication log per line
        file: PathBuf,

        /// Filter as JSON, e.g. '{"type": "COMMUNICATION_TYPE_IN", "values": ["EWP_OUT"]}'
        #[arg(long, value_name = "JSON", conflicts_with = "id")]
        filter: Option<String>,

        /// Number of matching logs to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Page size (1-50)
        #[arg(long)]
        limit: Option<usize>,

        /// Show a single log, with its children
        #[arg(long)]
        id: Option<i64>,
    },

    /// Print the type → shape registry
    Registry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decode() {
        let cli = Cli::parse_from([
            "ewp-commlog",
            "decode",
            "logs.jsonl",
            "--write",
            "out.jsonl",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Decode { file, write, concurrency }) => {
                assert_eq!(file, PathBuf::from("logs.jsonl"));
                assert_eq!(write, Some(PathBuf::from("out.jsonl")));
                assert_eq!(concurrency, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_inspect_with_page() {
        let cli = Cli::parse_from([
            "ewp-commlog",
            "inspect",
            "logs.jsonl",
            "--offset",
            "20",
            "--limit",
            "10",
            "--output",
            "json",
        ]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Some(Command::Inspect { offset, limit, id, .. }) => {
                assert_eq!(offset, 20);
                assert_eq!(limit, Some(10));
                assert_eq!(id, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_filter_conflicts_with_id() {
        let result = Cli::try_parse_from([
            "ewp-commlog",
            "inspect",
            "logs.jsonl",
            "--id",
            "3",
            "--filter",
            "{}",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ewp-commlog", "registry", "--no-color", "--no-config"]);
        assert!(cli.no_color);
        assert!(cli.no_config);
        assert!(matches!(cli.command, Some(Command::Registry)));
    }

    #[test]
    fn test_show_config_without_command() {
        let cli = Cli::parse_from(["ewp-commlog", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            commlog_domain::OutputFormat::from(OutputFormat::Json),
            commlog_domain::OutputFormat::Json
        );
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
