//! Rendering command (`spot render ...`).

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use spotdeck::{DeckRenderer, SymbolCatalog, write_named_images};

use crate::cli::common::LayoutOptions;
use crate::cli::utils::{load_deck, load_store};

/// Args for `spot render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Deck file to render.
    pub deck: PathBuf,
    /// Directory of symbol images (PNG/JPEG), assigned to symbols by file name order.
    #[arg(short = 's', long = "symbols")]
    pub symbols: PathBuf,
    /// Output directory for `card_<i>.png` files.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Manual override store; switches to manual layout.
    #[arg(long)]
    pub overrides: Option<PathBuf>,
    /// Fail instead of writing cards with unplaced symbols.
    #[arg(long)]
    pub strict: bool,
    #[command(flatten)]
    pub options: LayoutOptions,
}

/// Execute `spot render`.
pub fn handle(args: RenderArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    let config = args.options.resolve(deck.symbols_per_card())?;
    let renderer = DeckRenderer::from_config(&config)?;
    let store = args
        .overrides
        .as_deref()
        .map(|path| load_store(path, &deck))
        .transpose()?;

    let required = deck.total_symbols();
    let catalog = SymbolCatalog::load_dir(&args.symbols, Some(required))
        .with_context(|| format!("failed to load symbols from {}", args.symbols.display()))?;
    catalog.ensure_covers(required).with_context(|| {
        format!(
            "upload at least {} images into {}",
            required,
            args.symbols.display()
        )
    })?;

    let rendered = renderer
        .render(&deck, &catalog, store.as_ref())
        .context("failed to render deck")?;

    let unplaced = rendered.unplaced();
    for (card, symbols) in &unplaced {
        eprintln!(
            "warning: card {} is missing symbols {:?} (no room even at the minimum size)",
            card + 1,
            symbols
        );
    }
    if args.strict && !unplaced.is_empty() {
        return Err(anyhow!(
            "{} card(s) could not fit every symbol; rerun with another --seed or smaller symbols",
            unplaced.len()
        ));
    }

    let buffers = rendered.export()?;
    let written = write_named_images(&args.output, &buffers)
        .with_context(|| format!("failed to write cards to {}", args.output.display()))?;
    println!(
        "Rendered {} card image(s) to {} (seed {})",
        written.len(),
        args.output.display(),
        renderer.seed()
    );
    Ok(())
}
