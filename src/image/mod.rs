//! Raster side of the pipeline: symbol catalogs, card painting and PNG export.

mod catalog;
mod export;
mod paint;

pub use catalog::SymbolCatalog;
pub use export::{
    NamedImage, card_file_name, encode_png, export_png_buffers, write_named_images,
};
pub use paint::{Palette, render_card, render_card_with};
