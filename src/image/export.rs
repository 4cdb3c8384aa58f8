use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use crate::core::error::Result;

/// An encoded card ready for bundling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// `card_<i>.png` with a 1-based index.
pub fn card_file_name(index: usize) -> String {
    format!("card_{}.png", index + 1)
}

pub fn encode_png(card_img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    card_img.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Encode rendered cards in deck order, one named buffer per card.
pub fn export_png_buffers(images: &[RgbaImage]) -> Result<Vec<NamedImage>> {
    images
        .iter()
        .enumerate()
        .map(|(idx, card_img)| {
            Ok(NamedImage {
                name: card_file_name(idx),
                bytes: encode_png(card_img)?,
            })
        })
        .collect()
}

/// Write buffers into `dir`, creating it if needed. Returns the written paths.
pub fn write_named_images(dir: &Path, images: &[NamedImage]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(images.len());
    for named in images {
        let path = dir.join(&named.name);
        fs::write(&path, &named.bytes)?;
        written.push(path);
    }
    Ok(written)
}
