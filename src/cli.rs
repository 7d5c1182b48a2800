//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::coordinator::TerminatePolicy;

/// Conveyor - bounded queue driven by coordinated producer/consumer loops
#[derive(Parser)]
#[command(
    name = "cvy",
    about = "Drive a bounded blocking queue through scripted producer/consumer command streams",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Run the scripted producer/consumer demo
    Run {
        /// Queue capacity (overrides config)
        #[arg(long)]
        capacity: Option<i64>,

        /// Number of values to push and pop (overrides config)
        #[arg(short, long)]
        items: Option<u64>,

        /// What to do with commands buffered behind the terminate sentinel
        #[arg(long)]
        policy: Option<TerminatePolicy>,

        /// Output format for the run summary
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for the run summary
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_overrides() {
        let cli = Cli::try_parse_from(["cvy", "run", "--capacity", "2", "--items", "4", "--policy", "drain"]).unwrap();

        match cli.command {
            Some(Command::Run {
                capacity,
                items,
                policy,
                format,
            }) => {
                assert_eq!(capacity, Some(2));
                assert_eq!(items, Some(4));
                assert_eq!(policy, Some(TerminatePolicy::DrainPending));
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_parse_no_subcommand() {
        let cli = Cli::try_parse_from(["cvy", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("table".parse::<OutputFormat>().is_err());
    }
}
