//! Caller-driven placement: per-symbol `(x, y, size)` overrides, clamped so the
//! symbol stays in the playing area.
//!
//! Two clamps are available. [`ClampMode::Axis`] keeps each axis of the
//! symbol's box inside `[c − R, c + R]` independently; near the diagonals a
//! corner can still cross the circular border. [`ClampMode::Circular`] pulls
//! the centre towards the canvas centre until every corner is inside the
//! circle.

use std::collections::BTreeMap;
use std::f64::consts::SQRT_2;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::deck::{Card, Deck};
use crate::core::error::{Result, SpotError};
use crate::core::geometry::{CanvasSpec, Placement};
use crate::core::layout::{AngularLayout, Layout, LayoutParams};

/// Requested centre and edge length for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolOverride {
    pub x: f64,
    pub y: f64,
    pub size: u32,
}

impl SymbolOverride {
    /// Both coordinates are real numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Overrides for one card, keyed by symbol position on the card.
pub type CardOverrides = BTreeMap<usize, SymbolOverride>;

/// How an override is pulled back into the playing area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampMode {
    /// Independent per-axis clamp (approximate circular containment).
    #[default]
    Axis,
    /// Radial clamp that keeps all four corners inside the circle.
    Circular,
}

/// Where symbols without an override are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualDefault {
    /// The slot the angular ring would use.
    #[default]
    Angular,
    /// The canvas centre.
    Center,
}

/// Maps overrides onto in-bounds placements.
#[derive(Debug, Clone, Copy)]
pub struct ManualLayout {
    pub params: LayoutParams,
    pub defaults: ManualDefault,
    pub clamp: ClampMode,
}

impl ManualLayout {
    pub fn new(params: LayoutParams, defaults: ManualDefault, clamp: ClampMode) -> Self {
        Self {
            params,
            defaults,
            clamp,
        }
    }

    /// One placement per card symbol, in card order. Overrides at positions
    /// past the end of the card are ignored, and a non-finite override counts
    /// as missing.
    pub fn apply(&self, card: &Card, overrides: &CardOverrides, canvas: &CanvasSpec) -> Layout {
        let count = card.len();
        card.symbols()
            .iter()
            .enumerate()
            .map(|(position, &symbol)| {
                let requested = overrides
                    .get(&position)
                    .copied()
                    .filter(SymbolOverride::is_finite)
                    .unwrap_or_else(|| self.default_for(position, count, canvas));
                let (center_x, center_y, edge) = self.clamp_override(&requested, canvas);
                Placement {
                    symbol,
                    center_x,
                    center_y,
                    edge,
                }
            })
            .collect()
    }

    fn default_for(&self, position: usize, count: usize, canvas: &CanvasSpec) -> SymbolOverride {
        let size = self.params.default_symbol_size;
        let (x, y) = match self.defaults {
            ManualDefault::Angular => AngularLayout::new(&self.params).slot(canvas, position, count),
            ManualDefault::Center => canvas.center(),
        };
        SymbolOverride { x, y, size }
    }

    /// Clamp a requested override, returning `(center_x, center_y, edge)`.
    /// Non-finite coordinates land on the canvas centre.
    pub fn clamp_override(&self, requested: &SymbolOverride, canvas: &CanvasSpec) -> (f64, f64, u32) {
        let radius = canvas.inscribed_radius();
        let (cx, cy) = canvas.center();
        if !requested.is_finite() {
            let requested = SymbolOverride {
                x: cx,
                y: cy,
                size: requested.size,
            };
            return self.clamp_override(&requested, canvas);
        }
        match self.clamp {
            ClampMode::Axis => {
                let edge = requested.size.clamp(1, (2.0 * radius).floor().max(1.0) as u32);
                let half = f64::from(edge) / 2.0;
                let lo_x = cx - radius + half;
                let hi_x = cx + radius - half;
                let lo_y = cy - radius + half;
                let hi_y = cy + radius - half;
                (
                    requested.x.clamp(lo_x.min(hi_x), hi_x.max(lo_x)),
                    requested.y.clamp(lo_y.min(hi_y), hi_y.max(lo_y)),
                    edge,
                )
            }
            ClampMode::Circular => {
                let edge = requested
                    .size
                    .clamp(1, (SQRT_2 * radius).floor().max(1.0) as u32);
                let reach = (radius - f64::from(edge) / 2.0 * SQRT_2).max(0.0);
                let dx = requested.x - cx;
                let dy = requested.y - cy;
                let distance = dx.hypot(dy);
                if distance <= reach {
                    (requested.x, requested.y, edge)
                } else {
                    let scale = reach / distance;
                    (cx + dx * scale, cy + dy * scale, edge)
                }
            }
        }
    }
}

/// Clamp overrides for one card with the given options.
pub fn manual_layout(
    card: &Card,
    overrides: &CardOverrides,
    canvas: &CanvasSpec,
    options: &ManualLayout,
) -> Layout {
    options.apply(card, overrides, canvas)
}

/// Caller-owned manual positions for every card of one deck.
///
/// A store is created for a deck, keyed by `(card_index, symbol_position)`,
/// and is cleared when the deck is regenerated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutOverrideStore {
    deck_digest: String,
    #[serde(default)]
    cards: BTreeMap<usize, CardOverrides>,
}

impl LayoutOverrideStore {
    pub fn for_deck(deck: &Deck) -> Self {
        Self {
            deck_digest: deck.digest(),
            cards: BTreeMap::new(),
        }
    }

    pub fn deck_digest(&self) -> &str {
        &self.deck_digest
    }

    /// Reject a store that was created for a different deck.
    pub fn ensure_matches(&self, deck: &Deck) -> Result<()> {
        let actual = deck.digest();
        if actual != self.deck_digest {
            return Err(SpotError::DeckMismatch {
                expected: self.deck_digest.clone(),
                actual,
            });
        }
        Ok(())
    }

    pub fn set(&mut self, card: usize, position: usize, value: SymbolOverride) {
        self.cards.entry(card).or_default().insert(position, value);
    }

    pub fn get(&self, card: usize, position: usize) -> Option<&SymbolOverride> {
        self.cards.get(&card).and_then(|c| c.get(&position))
    }

    pub fn remove(&mut self, card: usize, position: usize) -> Option<SymbolOverride> {
        let overrides = self.cards.get_mut(&card)?;
        let removed = overrides.remove(&position);
        if overrides.is_empty() {
            self.cards.remove(&card);
        }
        removed
    }

    /// Overrides for one card; empty when none were set.
    pub fn card_overrides(&self, card: usize) -> CardOverrides {
        self.cards.get(&card).cloned().unwrap_or_default()
    }

    /// Record a computed layout as overrides so later passes reproduce it.
    pub fn capture(&mut self, card_index: usize, card: &Card, layout: &Layout) {
        for placement in layout {
            if let Some(position) = card.symbols().iter().position(|&s| s == placement.symbol) {
                self.set(
                    card_index,
                    position,
                    SymbolOverride {
                        x: placement.center_x,
                        y: placement.center_y,
                        size: placement.edge,
                    },
                );
            }
        }
    }

    /// Number of overridden symbols across all cards.
    pub fn len(&self) -> usize {
        self.cards.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Drop every override and re-key the store to a freshly generated deck.
    pub fn reset_for(&mut self, deck: &Deck) {
        self.clear();
        self.deck_digest = deck.digest();
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }
}
