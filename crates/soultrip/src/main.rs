//! `soultrip` - Soul Trip Tours & Travels website
//!
//! This binary serves the website and provides maintenance commands for the
//! database, the website settings and the configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::Value;

use soultrip::cli::{Cli, Command, ConfigCommand, DbCommand, ServeCommand, SettingsCommand};
use soultrip::{init_logging, Config, Storage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(config, serve_cmd).await,
        Command::Db(db_cmd) => handle_db(&config, &db_cmd),
        Command::Settings(settings_cmd) => handle_settings(&config, settings_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_file(cli.config), config_cmd),
    }
}

fn config_file(custom: Option<std::path::PathBuf>) -> std::path::PathBuf {
    custom.unwrap_or_else(Config::default_config_path)
}

async fn handle_serve(mut config: Config, cmd: ServeCommand) -> anyhow::Result<()> {
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    config.validate()?;
    soultrip::web::serve(&config).await?;
    Ok(())
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let path = config.database_path();
    Storage::open(&path).with_context(|| format!("failed to open database {}", path.display()))
}

fn handle_db(config: &Config, cmd: &DbCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    match cmd {
        DbCommand::Init => {
            println!(
                "Database ready at {} (schema version {})",
                storage.path().display(),
                storage.schema_version()?
            );
        }
        DbCommand::Seed => {
            let report = storage.seed_sample_data()?;
            if report.total() == 0 {
                println!("Database already has content; nothing added.");
            } else {
                println!("Sample data added:");
                println!("  Tours:        {}", report.tours);
                println!("  Sections:     {}", report.sections);
                println!("  Team members: {}", report.team);
                println!("  Statistics:   {}", report.stats);
                println!("  Values:       {}", report.values);
            }
        }
        DbCommand::Status { json } => {
            let counts = storage.table_counts()?;
            if *json {
                let tables: serde_json::Map<String, Value> = counts
                    .iter()
                    .map(|(table, count)| ((*table).to_string(), Value::from(*count)))
                    .collect();
                let status = serde_json::json!({
                    "path": storage.path(),
                    "schema_version": storage.schema_version()?,
                    "size_bytes": storage.size_bytes(),
                    "tables": tables,
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("Database Status");
                println!("===============");
                println!();
                println!("  Path:           {}", storage.path().display());
                println!("  Schema version: {}", storage.schema_version()?);
                println!("  Size:           {} bytes", storage.size_bytes());
                println!();
                for (table, count) in counts {
                    println!("  {table:<20} {count}");
                }
            }
        }
    }
    Ok(())
}

fn handle_settings(config: &Config, cmd: SettingsCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    match cmd {
        SettingsCommand::List { category, json } => {
            let settings = match category.as_deref() {
                Some(category) => storage.settings_by_category(category)?,
                None => storage.all_settings()?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                let mut current = "";
                for setting in &settings {
                    if setting.category != current {
                        println!("[{}]", setting.category);
                        current = &setting.category;
                    }
                    println!(
                        "  {:<28} {}",
                        setting.key,
                        setting.value.as_deref().unwrap_or("")
                    );
                }
            }
        }
        SettingsCommand::Get { key } => match storage.get_setting(&key)? {
            Some(setting) => println!("{}", setting.value.unwrap_or_default()),
            None => bail!("unknown setting: {key}"),
        },
        SettingsCommand::Set { key, value } => {
            if !storage.update_setting(&key, &value)? {
                bail!("unknown setting: {key}");
            }
            println!("Updated {key}.");
        }
        SettingsCommand::Reset { yes } => {
            if yes {
                let written = storage.reset_settings()?;
                println!("Restored {written} default settings.");
            } else {
                println!("This will restore every default website setting.");
                println!("Use --yes to confirm.");
            }
        }
    }
    Ok(())
}

/// Configuration as JSON with passwords masked.
fn redacted_json(config: &Config) -> anyhow::Result<Value> {
    let mut value = serde_json::to_value(config)?;
    for pointer in ["/admin/password", "/mail/password"] {
        if let Some(secret) = value.pointer_mut(pointer) {
            if !secret.is_null() {
                *secret = Value::from("<redacted>");
            }
        }
    }
    Ok(value)
}

fn handle_config(
    config: &Config,
    config_path: std::path::PathBuf,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&redacted_json(config)?)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Address:            {}:{}", config.server.host, config.server.port);
                println!("  Public directory:   {}", config.server.public_dir.display());
                println!("  CORS:               {}", config.server.cors);
                println!();
                println!("[Database]");
                println!("  Path:               {}", config.database_path().display());
                println!();
                println!("[Admin]");
                println!("  Username:           {}", config.admin.username);
                println!("  Session (hours):    {}", config.admin.session_ttl_hours);
                println!("  Secure cookies:     {}", config.admin.secure_cookies);
                println!();
                println!("[Limits]");
                println!("  Upload bytes:       {}", config.uploads.max_bytes);
                println!("  Settings cache (s): {}", config.cache.settings_ttl_secs);
                println!(
                    "  Requests:           {} per {}s",
                    config.rate_limit.requests, config.rate_limit.per_secs
                );
                println!(
                    "  Settings writes:    {} per {}s",
                    config.rate_limit.settings_requests, config.rate_limit.settings_per_secs
                );
                println!();
                println!("[Mail]");
                println!(
                    "  Relay:              {}",
                    config.mail.host.as_deref().unwrap_or("(log only)")
                );
                println!("  From:               {}", config.mail.from);
            }
        }
        ConfigCommand::Path => {
            println!("{}", config_path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or(config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
