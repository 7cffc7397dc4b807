//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments of `serve`.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to bind, overriding the configuration
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overriding the configuration
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Database maintenance commands.
#[derive(Debug, Subcommand)]
pub enum DbCommand {
    /// Create or upgrade the schema
    Init,

    /// Insert sample tours and about page content into empty tables
    Seed,

    /// Show row counts per table
    Status {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Website settings commands.
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// List settings
    List {
        /// Only show one category, e.g. `identity`
        #[arg(long)]
        category: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print one setting's value
    Get {
        /// Setting key, e.g. `site_name`
        key: String,
    },

    /// Change one setting
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },

    /// Restore every default setting
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Configuration file to validate (defaults to the standard path)
        file: Option<PathBuf>,
    },
}
