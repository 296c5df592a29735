//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for colloquy
#[derive(Parser, Debug)]
#[command(name = "colloquy")]
#[command(author, version, about = "Permission checks and AI reply scheduling for group conversations")]
#[command(long_about = r#"
colloquy evaluates a conversation snapshot (a JSON scenario file) with the
permission engine and the AI response orchestrator.

A scenario file holds:
  { "users": [...], "personas": [...], "conversation": {...}, "messages": [...] }

Configuration files are loaded from (in priority order):
1. COLLOQUY_* environment variables (e.g. COLLOQUY_ORCHESTRATOR__THRESHOLD=0.4)
2. --config <path>     Explicit config file
3. ./colloquy.toml     Project-level config
4. ~/.config/colloquy/config.toml   Global config

Example:
  colloquy permissions --scenario demo.json --user alice --persona alice-p
  colloquy triggers --scenario demo.json --message m-3
  colloquy simulate --scenario demo.json --user alice --message m-3 -v
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the merged permission result for a user on the scenario conversation
    Permissions {
        /// Scenario file (JSON)
        #[arg(short, long, value_name = "FILE")]
        scenario: PathBuf,

        /// Acting user id
        #[arg(short, long, value_name = "ID")]
        user: String,

        /// Persona the user acts as
        #[arg(short, long, value_name = "ID")]
        persona: Option<String>,
    },

    /// Print the response triggers for one scenario message
    Triggers {
        /// Scenario file (JSON)
        #[arg(short, long, value_name = "FILE")]
        scenario: PathBuf,

        /// Message to analyze
        #[arg(short, long, value_name = "ID")]
        message: String,
    },

    /// Post a message as a user and run the scheduled replies to completion
    Simulate {
        /// Scenario file (JSON)
        #[arg(short, long, value_name = "FILE")]
        scenario: PathBuf,

        /// Posting user id
        #[arg(short, long, value_name = "ID")]
        user: String,

        /// Message being posted
        #[arg(short, long, value_name = "ID")]
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_permissions() {
        let cli = Cli::parse_from([
            "colloquy",
            "permissions",
            "--scenario",
            "demo.json",
            "--user",
            "alice",
            "--persona",
            "alice-p",
            "-vv",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Permissions { user, persona, .. }) => {
                assert_eq!(user, "alice");
                assert_eq!(persona.as_deref(), Some("alice-p"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_show_config_needs_no_subcommand() {
        let cli = Cli::parse_from(["colloquy", "--show-config", "--no-config"]);
        assert!(cli.show_config);
        assert!(cli.no_config);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_simulate_requires_message() {
        let result = Cli::try_parse_from(["colloquy", "simulate", "-s", "demo.json", "-u", "alice"]);
        assert!(result.is_err());
    }
}
