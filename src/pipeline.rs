//! Deck-wide pass: lay out and render every card, index-aligned with deck order.

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::config::RenderConfig;
use crate::core::deck::{Card, Deck, SymbolId};
use crate::core::error::Result;
use crate::core::geometry::CanvasSpec;
use crate::core::layout::{Layout, LayoutMode, LayoutParams, PlacementOutcome, auto_layout};
use crate::core::manual::{LayoutOverrideStore, ManualLayout};
use crate::core::rng::card_rng;
use crate::image::{NamedImage, SymbolCatalog, export_png_buffers, render_card};

/// One rendered card and the layout that produced it.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub index: usize,
    pub image: RgbaImage,
    pub layout: Layout,
    pub unplaced: Vec<SymbolId>,
}

/// Rendered cards in deck order.
#[derive(Debug, Clone, Default)]
pub struct DeckRender {
    pub cards: Vec<RenderedCard>,
}

impl DeckRender {
    pub fn images(&self) -> Vec<RgbaImage> {
        self.cards.iter().map(|c| c.image.clone()).collect()
    }

    /// `(card_index, unplaced symbols)` for every incomplete card.
    pub fn unplaced(&self) -> Vec<(usize, Vec<SymbolId>)> {
        self.cards
            .iter()
            .filter(|c| !c.unplaced.is_empty())
            .map(|c| (c.index, c.unplaced.clone()))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.iter().all(|c| c.unplaced.is_empty())
    }

    /// Encode every card as `card_<i>.png`.
    pub fn export(&self) -> Result<Vec<NamedImage>> {
        let images: Vec<RgbaImage> = self.images();
        export_png_buffers(&images)
    }
}

/// Runs layout and rendering for a whole deck with one configuration.
#[derive(Debug, Clone)]
pub struct DeckRenderer {
    canvas: CanvasSpec,
    params: LayoutParams,
    mode: LayoutMode,
    manual: ManualLayout,
    seed: u64,
}

impl DeckRenderer {
    pub fn new(canvas: CanvasSpec, params: LayoutParams, mode: LayoutMode, seed: u64) -> Self {
        Self {
            canvas,
            params,
            mode,
            manual: ManualLayout::new(params, Default::default(), Default::default()),
            seed,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Result<Self> {
        config.validate()?;
        let params = config.layout_params();
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(
            Self::new(config.canvas()?, params, config.layout_mode, seed).with_manual(
                ManualLayout::new(params, config.manual_default, config.clamp_mode),
            ),
        )
    }

    pub fn with_manual(mut self, manual: ManualLayout) -> Self {
        self.manual = manual;
        self
    }

    pub fn canvas(&self) -> &CanvasSpec {
        &self.canvas
    }

    /// Seed actually used for the random layout.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Lay out one card. With a store, overrides drive a manual layout;
    /// without one, the configured automatic mode runs on the card's own stream.
    pub fn layout_card(
        &self,
        index: usize,
        card: &Card,
        overrides: Option<&LayoutOverrideStore>,
    ) -> Result<PlacementOutcome> {
        match overrides {
            Some(store) => Ok(PlacementOutcome {
                layout: self
                    .manual
                    .apply(card, &store.card_overrides(index), &self.canvas),
                unplaced: Vec::new(),
            }),
            None => {
                let mut rng = card_rng(self.seed, index);
                auto_layout(card, self.mode, &self.canvas, &self.params, &mut rng)
            }
        }
    }

    pub fn layout_deck(
        &self,
        deck: &Deck,
        overrides: Option<&LayoutOverrideStore>,
    ) -> Result<Vec<PlacementOutcome>> {
        if let Some(store) = overrides {
            store.ensure_matches(deck)?;
        }
        deck.cards()
            .iter()
            .enumerate()
            .map(|(index, card)| self.layout_card(index, card, overrides))
            .collect()
    }

    /// Lay out and render every card. Cards with unplaced symbols are still
    /// rendered; inspect [`DeckRender::unplaced`] to decide what to do.
    pub fn render(
        &self,
        deck: &Deck,
        catalog: &SymbolCatalog,
        overrides: Option<&LayoutOverrideStore>,
    ) -> Result<DeckRender> {
        catalog.ensure_covers(deck.total_symbols())?;
        let outcomes = self.layout_deck(deck, overrides)?;
        info!(
            cards = deck.len(),
            seed = self.seed,
            manual = overrides.is_some(),
            "rendering deck"
        );

        let mut cards = Vec::with_capacity(deck.len());
        for (index, (card, outcome)) in deck.cards().iter().zip(outcomes).enumerate() {
            let image = render_card(card, catalog, &outcome.layout, &self.canvas)?;
            if !outcome.unplaced.is_empty() {
                warn!(card = index + 1, unplaced = ?outcome.unplaced, "card is incomplete");
            }
            debug!(card = index + 1, placed = outcome.layout.len(), "rendered card");
            cards.push(RenderedCard {
                index,
                image,
                layout: outcome.layout,
                unplaced: outcome.unplaced,
            });
        }
        Ok(DeckRender { cards })
    }
}
