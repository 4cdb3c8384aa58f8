//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use spotdeck::{ClampMode, LayoutMode, ManualDefault, RenderConfig};

/// Automatic layout strategies accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LayoutModeArg {
    Angular,
    Random,
}

impl From<LayoutModeArg> for LayoutMode {
    fn from(value: LayoutModeArg) -> LayoutMode {
        match value {
            LayoutModeArg::Angular => LayoutMode::Angular,
            LayoutModeArg::Random => LayoutMode::RandomCollisionAvoiding,
        }
    }
}

/// Clamp applied to manual overrides.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ClampModeArg {
    Axis,
    Circular,
}

impl From<ClampModeArg> for ClampMode {
    fn from(value: ClampModeArg) -> ClampMode {
        match value {
            ClampModeArg::Axis => ClampMode::Axis,
            ClampModeArg::Circular => ClampMode::Circular,
        }
    }
}

/// Fallback position for symbols without a manual override.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ManualDefaultArg {
    Angular,
    Center,
}

impl From<ManualDefaultArg> for ManualDefault {
    fn from(value: ManualDefaultArg) -> ManualDefault {
        match value {
            ManualDefaultArg::Angular => ManualDefault::Angular,
            ManualDefaultArg::Center => ManualDefault::Center,
        }
    }
}

/// Canvas and layout flags layered over an optional JSON config.
#[derive(Args, Debug, Clone)]
pub struct LayoutOptions {
    /// JSON config file; flags below override its values.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Card edge length in pixels (300..=1000).
    #[arg(long = "card-size")]
    pub card_size: Option<u32>,
    /// Border stroke width in pixels (0..=20).
    #[arg(long)]
    pub border: Option<u32>,
    /// How far angular symbols push past the border, in percent (0..=100).
    #[arg(long)]
    pub overlap: Option<u32>,
    /// Automatic layout strategy.
    #[arg(long, value_enum)]
    pub mode: Option<LayoutModeArg>,
    /// Seed for the random layout.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Clamp used for manual overrides.
    #[arg(long, value_enum)]
    pub clamp: Option<ClampModeArg>,
    /// Where symbols without an override are placed.
    #[arg(long = "manual-default", value_enum)]
    pub manual_default: Option<ManualDefaultArg>,
}

impl LayoutOptions {
    /// Merge the config file, the deck's symbol count and explicit flags.
    pub fn resolve(&self, symbols_per_card: usize) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => RenderConfig::default(),
        };
        config.symbols_per_card = symbols_per_card;
        if let Some(size) = self.card_size {
            config.card_size = size;
        }
        if let Some(border) = self.border {
            config.border_width = border;
        }
        if let Some(overlap) = self.overlap {
            config.overlap_pct = overlap;
        }
        if let Some(mode) = self.mode {
            config.layout_mode = mode.into();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(clamp) = self.clamp {
            config.clamp_mode = clamp.into();
        }
        if let Some(default) = self.manual_default {
            config.manual_default = default.into();
        }
        config.validate().context("invalid render configuration")?;
        Ok(config)
    }
}
