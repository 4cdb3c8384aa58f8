//! Core domain: deck construction, canvas geometry and symbol layout.

pub mod deck;
pub mod error;
pub mod field;
pub mod geometry;
pub mod layout;
pub mod manual;
pub mod rng;

pub use deck::{Card, Deck, DeckHeader, MIN_SYMBOLS_PER_CARD, SymbolId, total_symbols};
pub use error::{Result, SpotError};
pub use field::is_prime_power;
pub use geometry::{BoundingBox, CanvasSpec, Placement};
pub use layout::{
    AngularLayout, CollisionAvoidingLayout, Layout, LayoutMode, LayoutParams, LayoutStrategy,
    PlacementOutcome, auto_layout,
};
pub use manual::{
    CardOverrides, ClampMode, LayoutOverrideStore, ManualDefault, ManualLayout, SymbolOverride,
    manual_layout,
};
pub use rng::{LayoutRng, card_rng, seeded_rng};
