//! Render configuration with the ranges the card generator accepts.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::deck::Deck;
use crate::core::error::{Result, invalid_parameter};
use crate::core::geometry::CanvasSpec;
use crate::core::layout::{
    DEFAULT_OVERLAP_PCT, DEFAULT_SYMBOL_SIZE, LayoutMode, LayoutParams, MAX_PLACEMENT_ATTEMPTS,
    MIN_SYMBOL_SIZE, SIZE_DECREMENT,
};
use crate::core::manual::{ClampMode, ManualDefault};

pub const SYMBOLS_PER_CARD: RangeInclusive<usize> = 3..=8;
pub const CARD_SIZE: RangeInclusive<u32> = 300..=1000;
pub const BORDER_WIDTH: RangeInclusive<u32> = 0..=20;
pub const OVERLAP_PCT: RangeInclusive<u32> = 0..=100;
pub const MARGIN: u32 = 20;

/// Everything needed to generate and render a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub symbols_per_card: usize,
    pub card_size: u32,
    pub border_width: u32,
    pub margin: u32,
    pub overlap_pct: u32,
    pub default_symbol_size: u32,
    pub min_symbol_size: u32,
    pub max_placement_attempts: u32,
    pub size_decrement: u32,
    pub layout_mode: LayoutMode,
    pub manual_default: ManualDefault,
    pub clamp_mode: ClampMode,
    /// Seed for the random layout; `None` draws from the OS.
    pub seed: Option<u64>,
    /// Check the pairwise-intersection property after generating the deck.
    pub validate_design: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            symbols_per_card: 4,
            card_size: 500,
            border_width: 3,
            margin: MARGIN,
            overlap_pct: DEFAULT_OVERLAP_PCT,
            default_symbol_size: DEFAULT_SYMBOL_SIZE,
            min_symbol_size: MIN_SYMBOL_SIZE,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            size_decrement: SIZE_DECREMENT,
            layout_mode: LayoutMode::default(),
            manual_default: ManualDefault::default(),
            clamp_mode: ClampMode::default(),
            seed: None,
            validate_design: true,
        }
    }
}

impl RenderConfig {
    /// Read a JSON config; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        check_range("symbols_per_card", self.symbols_per_card, &SYMBOLS_PER_CARD)?;
        check_range("card_size", self.card_size, &CARD_SIZE)?;
        check_range("border_width", self.border_width, &BORDER_WIDTH)?;
        check_range("overlap_pct", self.overlap_pct, &OVERLAP_PCT)?;
        if self.margin != MARGIN {
            return Err(invalid_parameter(
                "margin",
                self.margin,
                format!("margin is fixed at {MARGIN} px"),
            ));
        }
        self.layout_params().validate()?;
        self.canvas()?;
        Ok(())
    }

    /// Build the deck for `symbols_per_card`, verifying it unless
    /// `validate_design` is off.
    pub fn generate_deck(&self) -> Result<Deck> {
        self.validate()?;
        if self.validate_design {
            Deck::generate(self.symbols_per_card)
        } else {
            Deck::generate_unchecked(self.symbols_per_card)
        }
    }

    pub fn canvas(&self) -> Result<CanvasSpec> {
        CanvasSpec::new(self.card_size, self.border_width, self.margin)
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            default_symbol_size: self.default_symbol_size,
            min_symbol_size: self.min_symbol_size,
            max_placement_attempts: self.max_placement_attempts,
            size_decrement: self.size_decrement,
            overlap_pct: self.overlap_pct,
        }
    }

    pub fn total_symbols(&self) -> usize {
        crate::core::deck::total_symbols(self.symbols_per_card)
    }
}

fn check_range<T>(parameter: &'static str, value: T, range: &RangeInclusive<T>) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if !range.contains(&value) {
        return Err(invalid_parameter(
            parameter,
            &value,
            format!("must be within {}..={}", range.start(), range.end()),
        ));
    }
    Ok(())
}
