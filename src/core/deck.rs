use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::core::error::{Result, SpotError, invalid_parameter};
use crate::core::field::Arithmetic;

const DECK_VERSION: u8 = 1;

/// Smallest supported number of symbols per card.
pub const MIN_SYMBOLS_PER_CARD: usize = 3;

/// Index of a symbol image in the caller's catalog.
pub type SymbolId = usize;

/// Number of distinct symbols (and cards) in a deck with `n` symbols per card.
pub const fn total_symbols(n: usize) -> usize {
    n * n - n + 1
}

/// An ordered list of distinct symbols. The first entry is the marker symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    symbols: Vec<SymbolId>,
}

impl Card {
    pub fn new(symbols: Vec<SymbolId>) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> &[SymbolId] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The construction-determined first symbol.
    pub fn marker(&self) -> Option<SymbolId> {
        self.symbols.first().copied()
    }

    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Symbols present on both cards, in this card's order.
    pub fn shared_with(&self, other: &Card) -> Vec<SymbolId> {
        self.symbols
            .iter()
            .copied()
            .filter(|s| other.contains(*s))
            .collect()
    }
}

/// Per-deck metadata stored as the first record of a deck file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckHeader {
    pub version: u8,
    pub created_at: DateTime<Utc>,
    pub symbols_per_card: usize,
    pub total_symbols: usize,
    /// Whether the intersection property was checked after construction.
    #[serde(default)]
    pub verified: bool,
}

impl DeckHeader {
    pub fn new(symbols_per_card: usize) -> Self {
        Self {
            version: DECK_VERSION,
            created_at: Utc::now(),
            symbols_per_card,
            total_symbols: total_symbols(symbols_per_card),
            verified: false,
        }
    }
}

/// The complete ordered list of cards. Immutable once generated.
#[derive(Debug, Clone)]
pub struct Deck {
    pub header: DeckHeader,
    cards: Vec<Card>,
}

impl Deck {
    /// Build the deck for `n` symbols per card and check that every pair of
    /// cards shares exactly one symbol.
    ///
    /// Fails with [`SpotError::InvalidParameter`] for `n < 3` and with
    /// [`SpotError::DegenerateDesign`] when no plane of order `n - 1` exists
    /// (for example `n = 7`).
    pub fn generate(n: usize) -> Result<Self> {
        let mut deck = Self::generate_unchecked(n)?;
        deck.verify()?;
        deck.header.verified = true;
        Ok(deck)
    }

    /// Build the incidence structure without checking the intersection property.
    ///
    /// The result always has `n² − n + 1` cards of `n` symbols; it only
    /// satisfies the pairwise property when `n − 1` is a prime power.
    pub fn generate_unchecked(n: usize) -> Result<Self> {
        if n < MIN_SYMBOLS_PER_CARD {
            return Err(invalid_parameter(
                "n",
                n,
                format!("symbols per card must be at least {MIN_SYMBOLS_PER_CARD}"),
            ));
        }
        let q = n - 1;
        let arith = Arithmetic::for_order(q);
        if !arith.is_field() {
            warn!(order = q, "no finite field of this order; deck will be degenerate");
        }

        let mut cards = Vec::with_capacity(total_symbols(n));

        // Lines through symbol 0.
        for i in 0..n {
            let mut symbols = Vec::with_capacity(n);
            symbols.push(0);
            symbols.extend((0..q).map(|j| i * q + j + 1));
            cards.push(Card::new(symbols));
        }

        // Slope/intercept grid: slope i is shared through symbol i + 1.
        for i in 0..q {
            for j in 0..q {
                let mut symbols = Vec::with_capacity(n);
                symbols.push(i + 1);
                symbols.extend((0..q).map(|k| n + q * k + arith.add(arith.mul(i, k), j)));
                cards.push(Card::new(symbols));
            }
        }

        debug!(n, cards = cards.len(), "generated deck");
        Ok(Self {
            header: DeckHeader::new(n),
            cards,
        })
    }

    pub fn from_parts(header: DeckHeader, cards: Vec<Card>) -> Self {
        Self { header, cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn symbols_per_card(&self) -> usize {
        self.header.symbols_per_card
    }

    pub fn total_symbols(&self) -> usize {
        self.header.total_symbols
    }

    /// Check the pairwise-intersection invariant over all card pairs.
    pub fn verify(&self) -> Result<()> {
        for (first, a) in self.cards.iter().enumerate() {
            for (offset, b) in self.cards[first + 1..].iter().enumerate() {
                let shared = a.shared_with(b).len();
                if shared != 1 {
                    return Err(SpotError::DegenerateDesign {
                        first,
                        second: first + 1 + offset,
                        shared,
                    });
                }
            }
        }
        Ok(())
    }

    /// Symbols in `0..total_symbols` that appear on no card.
    pub fn missing_symbols(&self) -> Vec<SymbolId> {
        let seen: HashSet<SymbolId> = self
            .cards
            .iter()
            .flat_map(|c| c.symbols().iter().copied())
            .collect();
        (0..self.total_symbols())
            .filter(|s| !seen.contains(s))
            .collect()
    }

    /// SHA-256 over the card contents, stable across saves.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.header.symbols_per_card.to_le_bytes());
        for card in &self.cards {
            for symbol in card.symbols() {
                hasher.update(symbol.to_le_bytes());
            }
            hasher.update(b";");
        }
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().read(true).open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();
        let header_line = lines.next().ok_or_else(|| {
            invalid_parameter("deck", path.display(), "deck file is empty")
        })??;
        let header = match serde_json::from_str(&header_line)? {
            DeckLine::Header(header) => header,
            DeckLine::Card(_) => {
                return Err(invalid_parameter(
                    "deck",
                    path.display(),
                    "expected deck header as first line",
                ));
            }
        };

        let mut cards = Vec::new();
        for (idx, raw) in lines.enumerate() {
            let raw = raw?;
            if raw.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&raw)? {
                DeckLine::Header(_) => {
                    return Err(invalid_parameter(
                        "deck",
                        path.display(),
                        format!("multiple deck headers (line {})", idx + 2),
                    ));
                }
                DeckLine::Card(card) => {
                    if card.len() != header.symbols_per_card {
                        return Err(invalid_parameter(
                            "deck",
                            path.display(),
                            format!(
                                "card at line {} has {} symbols, header says {}",
                                idx + 2,
                                card.len(),
                                header.symbols_per_card
                            ),
                        ));
                    }
                    cards.push(card);
                }
            }
        }

        let n = header.symbols_per_card;
        let expected = total_symbols(n);
        if n < MIN_SYMBOLS_PER_CARD || header.total_symbols != expected {
            return Err(invalid_parameter(
                "deck",
                path.display(),
                format!(
                    "header declares {} symbols for {} per card, expected {}",
                    header.total_symbols, n, expected
                ),
            ));
        }
        if cards.len() != expected {
            return Err(invalid_parameter(
                "deck",
                path.display(),
                format!("deck has {} cards, expected {}", cards.len(), expected),
            ));
        }

        let mut deck = Self { header, cards };
        if deck.header.verified {
            if let Err(err) = deck.verify() {
                warn!(path = %path.display(), %err, "deck marked verified fails verification");
                deck.header.verified = false;
            }
        }
        Ok(deck)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &DeckLine::Header(self.header.clone()))?;
        writer.write_all(b"\n")?;
        for card in &self.cards {
            serde_json::to_writer(&mut writer, &DeckLine::Card(card.clone()))?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum DeckLine {
    Header(DeckHeader),
    Card(Card),
}
