//! Configuration commands (`spot config ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use spotdeck::RenderConfig;

/// Supported `spot config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write the default configuration as JSON.
    Init(ConfigInitArgs),
    /// Validate a configuration file.
    Check(ConfigCheckArgs),
}

/// Arguments for `spot config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output config path.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

/// Arguments for `spot config check`.
#[derive(Args, Debug)]
pub struct ConfigCheckArgs {
    /// Config file to validate.
    pub config: PathBuf,
}

/// Execute a config command.
pub fn handle(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init(args) => {
            RenderConfig::default()
                .save(&args.output)
                .with_context(|| format!("failed to write {}", args.output.display()))?;
            println!("Wrote default config to {}", args.output.display());
            Ok(())
        }
        ConfigCommand::Check(args) => {
            let config = RenderConfig::load(&args.config)
                .with_context(|| format!("invalid config {}", args.config.display()))?;
            println!(
                "Config {} is valid ({} symbols per card, {} px cards)",
                args.config.display(),
                config.symbols_per_card,
                config.card_size
            );
            Ok(())
        }
    }
}
