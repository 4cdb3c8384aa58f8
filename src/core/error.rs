use thiserror::Error;

use crate::core::deck::SymbolId;

/// Failures raised by deck construction, layout and rendering.
#[derive(Debug, Error)]
pub enum SpotError {
    #[error("invalid parameter '{parameter}' = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
        reason: String,
    },

    #[error("deck needs {required} symbol images but only {supplied} were supplied")]
    InsufficientSymbols { required: usize, supplied: usize },

    /// Two cards do not share exactly one symbol.
    #[error("cards {first} and {second} share {shared} symbols (expected exactly 1)")]
    DegenerateDesign {
        first: usize,
        second: usize,
        shared: usize,
    },

    #[error("card {card}: could not place symbols {unplaced:?} even at the minimum size")]
    PlacementFailure { card: usize, unplaced: Vec<SymbolId> },

    #[error("symbol {symbol} is not in the catalog (catalog holds {catalog_len} images)")]
    UnknownSymbol { symbol: SymbolId, catalog_len: usize },

    #[error("layout places symbol {symbol}, which is not on the card")]
    LayoutMismatch { symbol: SymbolId },

    #[error("override store belongs to deck {expected}, not {actual}")]
    DeckMismatch { expected: String, actual: String },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpotError>;

/// Build an [`SpotError::InvalidParameter`] from displayable parts.
pub fn invalid_parameter(
    parameter: &'static str,
    value: impl ToString,
    reason: impl ToString,
) -> SpotError {
    SpotError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
