//! Command-line interface for the Soul Trip Tours website.
//!
//! This module provides the CLI structure for the `soultrip` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, DbCommand, ServeCommand, SettingsCommand};

/// soultrip - Soul Trip Tours & Travels website
///
/// Serves the public tour pages and the admin back office, and maintains
/// the database and website settings.
#[derive(Debug, Parser)]
#[command(name = "soultrip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the website
    Serve(ServeCommand),

    /// Manage the database
    #[command(subcommand)]
    Db(DbCommand),

    /// View or change website settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Db(DbCommand::Init),
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "soultrip");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(3, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["soultrip", "serve", "--host", "127.0.0.1", "-p", "8080"])
            .unwrap();
        match cli.command {
            Command::Serve(serve) => {
                assert_eq!(serve.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(serve.port, Some(8080));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_db_status_json() {
        let cli = Cli::try_parse_from(["soultrip", "db", "status", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Db(DbCommand::Status { json: true })
        ));
    }

    #[test]
    fn test_parse_settings_set() {
        let cli =
            Cli::try_parse_from(["soultrip", "settings", "set", "site_name", "Soul Trip"]).unwrap();
        match cli.command {
            Command::Settings(SettingsCommand::Set { key, value }) => {
                assert_eq!(key, "site_name");
                assert_eq!(value, "Soul Trip");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_settings_list_category() {
        let cli = Cli::try_parse_from(["soultrip", "settings", "list", "--category", "contact"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Settings(SettingsCommand::List { category: Some(_), json: false })
        ));
    }

    #[test]
    fn test_parse_config_validate_file() {
        let cli = Cli::try_parse_from(["soultrip", "config", "validate", "/tmp/site.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["soultrip", "-c", "/custom/config.toml", "-vv", "db", "seed"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 2);
    }
}
