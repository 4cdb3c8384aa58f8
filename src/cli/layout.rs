//! Layout inspection (`spot layout ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use spotdeck::{DeckRenderer, Placement, SymbolId};

use crate::cli::common::LayoutOptions;
use crate::cli::utils::{card_index, load_deck, load_store, write_output};

/// Args for `spot layout`.
#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Deck file to lay out.
    pub deck: PathBuf,
    /// 1-based card index; all cards when omitted.
    #[arg(short = 'i', long = "index")]
    pub index: Option<usize>,
    /// Manual override store; switches to manual layout.
    #[arg(long)]
    pub overrides: Option<PathBuf>,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output", default_value = "-")]
    pub output: PathBuf,
    #[command(flatten)]
    pub options: LayoutOptions,
}

#[derive(Serialize)]
struct CardLayoutReport {
    card: usize,
    placements: Vec<Placement>,
    unplaced: Vec<SymbolId>,
}

#[derive(Serialize)]
struct LayoutReport {
    seed: u64,
    cards: Vec<CardLayoutReport>,
}

/// Execute `spot layout`.
pub fn handle(args: LayoutArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    let config = args.options.resolve(deck.symbols_per_card())?;
    let renderer = DeckRenderer::from_config(&config)?;
    let store = args
        .overrides
        .as_deref()
        .map(|path| load_store(path, &deck))
        .transpose()?;

    let indices: Vec<usize> = match args.index {
        Some(one_based) => vec![card_index(one_based, &deck)?],
        None => (0..deck.len()).collect(),
    };

    let mut cards = Vec::with_capacity(indices.len());
    for idx in indices {
        let outcome = renderer
            .layout_card(idx, &deck.cards()[idx], store.as_ref())
            .with_context(|| format!("failed to lay out card {}", idx + 1))?;
        cards.push(CardLayoutReport {
            card: idx + 1,
            placements: outcome.layout,
            unplaced: outcome.unplaced,
        });
    }
    let report = LayoutReport {
        seed: renderer.seed(),
        cards,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    write_output(&args.output, &json)
}
