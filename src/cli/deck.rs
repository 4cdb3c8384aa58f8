//! Deck lifecycle commands (`spot deck ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use spotdeck::{RenderConfig, is_prime_power};

use crate::cli::utils::{card_index, load_deck};

/// Supported `spot deck` subcommands.
#[derive(Subcommand, Debug)]
pub enum DeckCommand {
    /// Generate a deck and write it as JSON lines.
    Generate(DeckGenerateArgs),
    /// Show deck metadata summary.
    Info(DeckPathArgs),
    /// Check that every pair of cards shares exactly one symbol.
    Verify(DeckPathArgs),
    /// Print the SHA-256 digest of the deck's cards.
    Hash(DeckPathArgs),
    /// List card contents.
    Show(DeckShowArgs),
}

/// Arguments for `spot deck generate`.
#[derive(Args, Debug)]
pub struct DeckGenerateArgs {
    /// Symbols per card.
    #[arg(short = 'n', long = "symbols", default_value_t = 4)]
    pub symbols: usize,
    /// Output deck path (JSONL).
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Skip the pairwise-intersection check.
    #[arg(long = "no-verify")]
    pub no_verify: bool,
    /// JSON config file; its `validate_design` applies unless `--no-verify` is set.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

/// Arguments for commands that only need a deck path.
#[derive(Args, Debug)]
pub struct DeckPathArgs {
    /// Deck file to inspect.
    pub deck: PathBuf,
}

/// Arguments for `spot deck show`.
#[derive(Args, Debug)]
pub struct DeckShowArgs {
    /// Deck file to read.
    pub deck: PathBuf,
    /// 1-based card index; all cards when omitted.
    #[arg(short = 'i', long = "index")]
    pub index: Option<usize>,
}

/// Execute a deck command.
pub fn handle(command: DeckCommand) -> Result<()> {
    match command {
        DeckCommand::Generate(args) => generate(args),
        DeckCommand::Info(args) => info(args),
        DeckCommand::Verify(args) => verify(args),
        DeckCommand::Hash(args) => hash(args),
        DeckCommand::Show(args) => show(args),
    }
}

fn generate(args: DeckGenerateArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    config.symbols_per_card = args.symbols;
    if args.no_verify {
        config.validate_design = false;
    }
    let deck = config.generate_deck().with_context(|| {
        format!("failed to generate a deck with {} symbols per card", args.symbols)
    })?;
    deck.save(&args.output)
        .with_context(|| format!("failed to write deck file {}", args.output.display()))?;
    println!(
        "Generated {} cards over {} symbols into {}",
        deck.len(),
        deck.total_symbols(),
        args.output.display()
    );
    Ok(())
}

fn info(args: DeckPathArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    let order = deck.symbols_per_card().saturating_sub(1);
    println!("Deck: {}", args.deck.display());
    println!("Cards: {}", deck.len());
    println!("Symbols per card: {}", deck.symbols_per_card());
    println!("Total symbols: {}", deck.total_symbols());
    println!(
        "Plane order: {} ({})",
        order,
        if is_prime_power(order) {
            "prime power"
        } else {
            "no plane of this order is known"
        }
    );
    println!("Verified at generation: {}", deck.header.verified);
    println!("Created: {}", deck.header.created_at);
    Ok(())
}

fn verify(args: DeckPathArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    deck.verify()
        .with_context(|| format!("deck {} is degenerate", args.deck.display()))?;
    let missing = deck.missing_symbols();
    if !missing.is_empty() {
        anyhow::bail!("symbols {:?} appear on no card", missing);
    }
    println!(
        "Deck {} is valid: {} cards, every pair shares exactly one symbol",
        args.deck.display(),
        deck.len()
    );
    Ok(())
}

fn hash(args: DeckPathArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    println!("{}", deck.digest());
    Ok(())
}

fn show(args: DeckShowArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    let indices: Vec<usize> = match args.index {
        Some(one_based) => vec![card_index(one_based, &deck)?],
        None => (0..deck.len()).collect(),
    };
    for idx in indices {
        let symbols: Vec<String> = deck.cards()[idx]
            .symbols()
            .iter()
            .map(|s| s.to_string())
            .collect();
        println!("Card {:>4} | {}", idx + 1, symbols.join(" "));
    }
    Ok(())
}
