//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use spotdeck::{Deck, LayoutOverrideStore};

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Load a deck file, attaching path context to any error.
pub fn load_deck(path: &Path) -> Result<Deck> {
    Deck::load(path).with_context(|| format!("failed to read deck {}", path.display()))
}

/// Load an override store and check it belongs to `deck`.
pub fn load_store(path: &Path, deck: &Deck) -> Result<LayoutOverrideStore> {
    let store = LayoutOverrideStore::load(path)
        .with_context(|| format!("failed to read overrides {}", path.display()))?;
    store
        .ensure_matches(deck)
        .with_context(|| format!("overrides {} do not match the deck", path.display()))?;
    Ok(store)
}

/// Parse a 1-based card index into a zero-based one.
pub fn card_index(one_based: usize, deck: &Deck) -> Result<usize> {
    if one_based == 0 || one_based > deck.len() {
        anyhow::bail!("card index {} out of range 1..={}", one_based, deck.len());
    }
    Ok(one_based - 1)
}
