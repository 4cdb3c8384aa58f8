//! Manual placement store commands (`spot overrides ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use spotdeck::{DeckRenderer, LayoutOverrideStore, SymbolOverride};

use crate::cli::common::LayoutOptions;
use crate::cli::utils::{card_index, load_deck, load_store};

/// Supported `spot overrides` subcommands.
#[derive(Subcommand, Debug)]
pub enum OverridesCommand {
    /// Create a store for a deck, optionally seeded from an automatic layout.
    Init(OverridesInitArgs),
    /// Set the position and size of one symbol.
    Set(OverridesSetArgs),
    /// Remove the override for one symbol.
    Unset(OverridesUnsetArgs),
    /// Drop every override and re-key the store to the deck.
    Clear(OverridesClearArgs),
}

/// Arguments for `spot overrides init`.
#[derive(Args, Debug)]
pub struct OverridesInitArgs {
    /// Deck the store belongs to.
    pub deck: PathBuf,
    /// Output store path (JSON).
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Record the automatic layout of every card as the starting overrides.
    #[arg(long)]
    pub capture: bool,
    #[command(flatten)]
    pub options: LayoutOptions,
}

/// Arguments for `spot overrides set`.
#[derive(Args, Debug)]
pub struct OverridesSetArgs {
    /// Store file to modify.
    pub store: PathBuf,
    /// Deck the store belongs to.
    #[arg(long)]
    pub deck: PathBuf,
    /// 1-based card index.
    #[arg(long)]
    pub card: usize,
    /// 1-based symbol position on the card.
    #[arg(long)]
    pub position: usize,
    #[arg(long)]
    pub x: f64,
    #[arg(long)]
    pub y: f64,
    /// Symbol edge length in pixels.
    #[arg(long)]
    pub size: u32,
}

/// Arguments for `spot overrides unset`.
#[derive(Args, Debug)]
pub struct OverridesUnsetArgs {
    /// Store file to modify.
    pub store: PathBuf,
    /// Deck the store belongs to.
    #[arg(long)]
    pub deck: PathBuf,
    /// 1-based card index.
    #[arg(long)]
    pub card: usize,
    /// 1-based symbol position on the card.
    #[arg(long)]
    pub position: usize,
}

/// Arguments for `spot overrides clear`.
#[derive(Args, Debug)]
pub struct OverridesClearArgs {
    /// Store file to reset.
    pub store: PathBuf,
    /// Deck to key the store to (may be a regenerated deck).
    #[arg(long)]
    pub deck: PathBuf,
}

/// Execute an overrides command.
pub fn handle(command: OverridesCommand) -> Result<()> {
    match command {
        OverridesCommand::Init(args) => init(args),
        OverridesCommand::Set(args) => set(args),
        OverridesCommand::Unset(args) => unset(args),
        OverridesCommand::Clear(args) => clear(args),
    }
}

fn init(args: OverridesInitArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    let mut store = LayoutOverrideStore::for_deck(&deck);
    if args.capture {
        let config = args.options.resolve(deck.symbols_per_card())?;
        let renderer = DeckRenderer::from_config(&config)?;
        for (idx, outcome) in renderer.layout_deck(&deck, None)?.iter().enumerate() {
            store.capture(idx, &deck.cards()[idx], &outcome.layout);
        }
    }
    store
        .save(&args.output)
        .with_context(|| format!("failed to write overrides {}", args.output.display()))?;
    println!(
        "Created override store {} with {} entries",
        args.output.display(),
        store.len()
    );
    Ok(())
}

fn set(args: OverridesSetArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    let mut store = load_store(&args.store, &deck)?;
    let card = card_index(args.card, &deck)?;
    let symbols = deck.symbols_per_card();
    if args.position == 0 || args.position > symbols {
        anyhow::bail!("symbol position {} out of range 1..={}", args.position, symbols);
    }
    if !args.x.is_finite() || !args.y.is_finite() {
        anyhow::bail!("override position ({}, {}) must be finite", args.x, args.y);
    }
    store.set(
        card,
        args.position - 1,
        SymbolOverride {
            x: args.x,
            y: args.y,
            size: args.size,
        },
    );
    store
        .save(&args.store)
        .with_context(|| format!("failed to write overrides {}", args.store.display()))?;
    println!(
        "Card {} position {} -> ({}, {}) size {}",
        args.card, args.position, args.x, args.y, args.size
    );
    Ok(())
}

fn unset(args: OverridesUnsetArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    let mut store = load_store(&args.store, &deck)?;
    let card = card_index(args.card, &deck)?;
    match store.remove(card, args.position.saturating_sub(1)) {
        Some(_) => println!("Removed override for card {} position {}", args.card, args.position),
        None => println!("No override for card {} position {}", args.card, args.position),
    }
    store
        .save(&args.store)
        .with_context(|| format!("failed to write overrides {}", args.store.display()))?;
    Ok(())
}

fn clear(args: OverridesClearArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    let mut store = LayoutOverrideStore::load(&args.store)
        .with_context(|| format!("failed to read overrides {}", args.store.display()))?;
    store.reset_for(&deck);
    store
        .save(&args.store)
        .with_context(|| format!("failed to write overrides {}", args.store.display()))?;
    println!("Cleared override store {}", args.store.display());
    Ok(())
}
