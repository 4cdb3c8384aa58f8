use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use tracing::debug;

use crate::core::deck::SymbolId;
use crate::core::error::{Result, SpotError};

const SYMBOL_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Symbol images indexed by [`SymbolId`]. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct SymbolCatalog {
    images: Vec<RgbaImage>,
}

impl SymbolCatalog {
    pub fn new(images: Vec<DynamicImage>) -> Self {
        Self {
            images: images.into_iter().map(|img| img.to_rgba8()).collect(),
        }
    }

    pub fn from_rgba(images: Vec<RgbaImage>) -> Self {
        Self { images }
    }

    /// Load every PNG/JPEG in `dir`, ordered by file name, keeping at most `limit`.
    pub fn load_dir(dir: &Path, limit: Option<usize>) -> Result<Self> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_symbol_file(path))
            .collect();
        paths.sort();
        if let Some(limit) = limit {
            paths.truncate(limit);
        }
        let mut images = Vec::with_capacity(paths.len());
        for path in &paths {
            debug!(path = %path.display(), "loading symbol image");
            images.push(image::open(path)?);
        }
        Ok(Self::new(images))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, symbol: SymbolId) -> Result<&RgbaImage> {
        self.images.get(symbol).ok_or(SpotError::UnknownSymbol {
            symbol,
            catalog_len: self.images.len(),
        })
    }

    /// Fail with [`SpotError::InsufficientSymbols`] if fewer than `required` images are held.
    pub fn ensure_covers(&self, required: usize) -> Result<()> {
        if self.images.len() < required {
            return Err(SpotError::InsufficientSymbols {
                required,
                supplied: self.images.len(),
            });
        }
        Ok(())
    }
}

fn is_symbol_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SYMBOL_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}
