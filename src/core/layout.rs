//! Automatic symbol placement on a circular card.
//!
//! Two strategies share one interface:
//!
//! - [`AngularLayout`] spaces symbols evenly around a ring. It never checks
//!   for collisions and, when `overlap_pct > 0`, deliberately pushes symbols
//!   past the border.
//! - [`CollisionAvoidingLayout`] samples random centres inside the inscribed
//!   circle and greedily accepts the first candidate whose square stays inside
//!   the circle and clears every symbol already placed. Symbols are handled in
//!   card order, so earlier symbols get first pick of the space. When a size
//!   tier is exhausted the symbol shrinks; symbols that fit nowhere are
//!   reported in [`PlacementOutcome::unplaced`].

use std::f64::consts::TAU;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::deck::{Card, SymbolId};
use crate::core::error::{Result, SpotError, invalid_parameter};
use crate::core::geometry::{CanvasSpec, Placement};

pub const DEFAULT_SYMBOL_SIZE: u32 = 80;
pub const MIN_SYMBOL_SIZE: u32 = 20;
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;
pub const SIZE_DECREMENT: u32 = 10;
pub const DEFAULT_OVERLAP_PCT: u32 = 20;

/// Placements for one card, in card order.
pub type Layout = Vec<Placement>;

/// Which automatic strategy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    Angular,
    #[default]
    RandomCollisionAvoiding,
}

/// Tunables for both automatic strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Edge length tried first (and the only size used by the angular ring).
    pub default_symbol_size: u32,
    /// Smallest edge length the random search will shrink to.
    pub min_symbol_size: u32,
    /// Random candidates sampled per size tier.
    pub max_placement_attempts: u32,
    /// Edge length removed between tiers.
    pub size_decrement: u32,
    /// Ring radius inflation for the angular layout, in percent.
    pub overlap_pct: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            default_symbol_size: DEFAULT_SYMBOL_SIZE,
            min_symbol_size: MIN_SYMBOL_SIZE,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            size_decrement: SIZE_DECREMENT,
            overlap_pct: DEFAULT_OVERLAP_PCT,
        }
    }
}

impl LayoutParams {
    pub fn validate(&self) -> Result<()> {
        if self.min_symbol_size == 0 {
            return Err(invalid_parameter(
                "min_symbol_size",
                self.min_symbol_size,
                "must be at least 1 px",
            ));
        }
        if self.default_symbol_size < self.min_symbol_size {
            return Err(invalid_parameter(
                "default_symbol_size",
                self.default_symbol_size,
                format!("must not be below min_symbol_size ({})", self.min_symbol_size),
            ));
        }
        if self.max_placement_attempts == 0 {
            return Err(invalid_parameter(
                "max_placement_attempts",
                self.max_placement_attempts,
                "must be at least 1",
            ));
        }
        if self.size_decrement == 0 {
            return Err(invalid_parameter(
                "size_decrement",
                self.size_decrement,
                "must be at least 1 px",
            ));
        }
        if self.overlap_pct > 100 {
            return Err(invalid_parameter(
                "overlap_pct",
                self.overlap_pct,
                "must be within 0..=100",
            ));
        }
        Ok(())
    }

    /// Edge lengths tried by the random search, largest first, ending at the floor.
    pub fn size_tiers(&self) -> Vec<u32> {
        let floor = self.min_symbol_size;
        let mut edge = self.default_symbol_size.max(floor);
        let mut tiers = vec![edge];
        while edge > floor {
            edge = edge.saturating_sub(self.size_decrement.max(1)).max(floor);
            tiers.push(edge);
        }
        tiers
    }
}

/// Result of an automatic layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub layout: Layout,
    /// Symbols that could not be placed even at the minimum size, in card order.
    pub unplaced: Vec<SymbolId>,
}

impl PlacementOutcome {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// The layout, or [`SpotError::PlacementFailure`] if any symbol is missing.
    pub fn into_complete(self, card: usize) -> Result<Layout> {
        if self.unplaced.is_empty() {
            Ok(self.layout)
        } else {
            Err(SpotError::PlacementFailure {
                card,
                unplaced: self.unplaced,
            })
        }
    }
}

/// Computes placements for the symbols of one card.
pub trait LayoutStrategy {
    fn layout(&self, card: &Card, canvas: &CanvasSpec, rng: &mut dyn RngCore)
    -> PlacementOutcome;
}

/// Even angular spacing on a ring, symbol `i` at `2π·i/n`.
#[derive(Debug, Clone, Copy)]
pub struct AngularLayout {
    pub edge: u32,
    pub overlap_pct: u32,
}

impl AngularLayout {
    pub fn new(params: &LayoutParams) -> Self {
        Self {
            edge: params.default_symbol_size,
            overlap_pct: params.overlap_pct,
        }
    }

    /// Distance from the canvas centre to each symbol centre.
    ///
    /// At 0% the symbol's outer edge touches the inscribed circle along the
    /// radial direction; larger percentages push symbols outward.
    pub fn ring_radius(&self, canvas: &CanvasSpec) -> f64 {
        let base = (canvas.inscribed_radius() - f64::from(self.edge) / 2.0).max(0.0);
        base * (1.0 + f64::from(self.overlap_pct) / 100.0)
    }

    /// Position of slot `index` out of `count`.
    pub fn slot(&self, canvas: &CanvasSpec, index: usize, count: usize) -> (f64, f64) {
        let (cx, cy) = canvas.center();
        let radius = self.ring_radius(canvas);
        let angle = TAU * index as f64 / count.max(1) as f64;
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    }
}

impl LayoutStrategy for AngularLayout {
    fn layout(
        &self,
        card: &Card,
        canvas: &CanvasSpec,
        _rng: &mut dyn RngCore,
    ) -> PlacementOutcome {
        let count = card.len();
        let layout = card
            .symbols()
            .iter()
            .enumerate()
            .map(|(i, &symbol)| {
                let (center_x, center_y) = self.slot(canvas, i, count);
                Placement {
                    symbol,
                    center_x,
                    center_y,
                    edge: self.edge,
                }
            })
            .collect();
        PlacementOutcome {
            layout,
            unplaced: Vec::new(),
        }
    }
}

/// Bounded random search with size degradation.
#[derive(Debug, Clone, Copy)]
pub struct CollisionAvoidingLayout {
    pub params: LayoutParams,
}

impl CollisionAvoidingLayout {
    pub fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    fn place_symbol(
        &self,
        symbol: SymbolId,
        canvas: &CanvasSpec,
        placed: &[Placement],
        rng: &mut dyn RngCore,
    ) -> Option<Placement> {
        let (cx, cy) = canvas.center();
        let radius = canvas.inscribed_radius();
        for edge in self.params.size_tiers() {
            for _ in 0..self.params.max_placement_attempts {
                let angle = rng.random_range(0.0..TAU);
                let distance = rng.random_range(0.0..=radius);
                let candidate = Placement {
                    symbol,
                    center_x: cx + distance * angle.cos(),
                    center_y: cy + distance * angle.sin(),
                    edge,
                };
                let bbox = candidate.bounding_box();
                if canvas.contains_box(&bbox)
                    && placed.iter().all(|p| !p.bounding_box().overlaps(&bbox))
                {
                    return Some(candidate);
                }
            }
            debug!(symbol, edge, "size tier exhausted");
        }
        None
    }
}

impl LayoutStrategy for CollisionAvoidingLayout {
    fn layout(
        &self,
        card: &Card,
        canvas: &CanvasSpec,
        rng: &mut dyn RngCore,
    ) -> PlacementOutcome {
        let mut outcome = PlacementOutcome::default();
        for &symbol in card.symbols() {
            match self.place_symbol(symbol, canvas, &outcome.layout, rng) {
                Some(placement) => outcome.layout.push(placement),
                None => {
                    warn!(symbol, "no room for symbol even at minimum size");
                    outcome.unplaced.push(symbol);
                }
            }
        }
        outcome
    }
}

/// Lay out one card with the selected automatic strategy.
pub fn auto_layout(
    card: &Card,
    mode: LayoutMode,
    canvas: &CanvasSpec,
    params: &LayoutParams,
    rng: &mut dyn RngCore,
) -> Result<PlacementOutcome> {
    params.validate()?;
    let outcome = match mode {
        LayoutMode::Angular => AngularLayout::new(params).layout(card, canvas, rng),
        LayoutMode::RandomCollisionAvoiding => {
            CollisionAvoidingLayout::new(*params).layout(card, canvas, rng)
        }
    };
    Ok(outcome)
}
