//! Spot-the-match deck generation and circular card rendering.
//!
//! A deck for `n` symbols per card holds `n² − n + 1` cards over as many
//! symbols, and any two cards share exactly one symbol. Each card is laid out
//! on a circular canvas (angular ring, random collision-avoiding search, or
//! caller overrides) and rendered to an RGBA image.

pub mod config;
pub mod core;
pub mod image;
pub mod pipeline;

pub use crate::config::RenderConfig;
pub use crate::core::{
    AngularLayout, BoundingBox, CanvasSpec, Card, CardOverrides, ClampMode,
    CollisionAvoidingLayout, Deck, DeckHeader, Layout, LayoutMode, LayoutOverrideStore,
    LayoutParams, LayoutRng, LayoutStrategy, ManualDefault, ManualLayout, Placement,
    PlacementOutcome, Result, SpotError, SymbolId, SymbolOverride, auto_layout, card_rng,
    is_prime_power, manual_layout, seeded_rng, total_symbols,
};
pub use crate::image::{
    NamedImage, Palette, SymbolCatalog, card_file_name, export_png_buffers, render_card,
    render_card_with, write_named_images,
};
pub use crate::pipeline::{DeckRender, DeckRenderer, RenderedCard};

/// Build and verify the deck for `n` symbols per card.
pub fn generate_deck(n: usize) -> Result<Deck> {
    Deck::generate(n)
}

/// Build the deck without checking the pairwise-intersection property.
pub fn generate_deck_unchecked(n: usize) -> Result<Deck> {
    Deck::generate_unchecked(n)
}
