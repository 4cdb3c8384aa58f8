//! Command-line interface wiring for the `spot` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod config;
pub mod deck;
pub mod layout;
pub mod overrides;
pub mod render;
pub mod utils;

/// Parsed CLI entrypoint for the `spot` binary.
#[derive(Parser, Debug)]
#[command(name = "spot", version, about = "Spot-the-match card deck toolkit")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// High-level command families made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Deck(deck::DeckCommand),
    /// Compute card layouts and print them as JSON.
    Layout(layout::LayoutArgs),
    #[command(subcommand)]
    Overrides(overrides::OverridesCommand),
    /// Render every card of a deck to PNG.
    Render(render::RenderArgs),
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Deck(cmd) => deck::handle(cmd),
        Command::Layout(args) => layout::handle(args),
        Command::Overrides(cmd) => overrides::handle(cmd),
        Command::Render(args) => render::handle(args),
        Command::Config(cmd) => config::handle(cmd),
    }
}
