use image::imageops::{FilterType, overlay, resize};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;

use crate::core::deck::Card;
use crate::core::error::{Result, SpotError};
use crate::core::geometry::{CanvasSpec, Placement};
use crate::image::catalog::SymbolCatalog;

/// Colours used for the card face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub border: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: rgba(0xff, 0xff, 0xff, 0xff),
            border: rgba(0x00, 0x00, 0x00, 0xff),
        }
    }
}

/// Render a card with the default black-on-white palette.
pub fn render_card(
    card: &Card,
    catalog: &SymbolCatalog,
    layout: &[Placement],
    canvas: &CanvasSpec,
) -> Result<RgbaImage> {
    render_card_with(card, catalog, layout, canvas, &Palette::default())
}

/// Composite the layout onto an opaque canvas with a circular border.
///
/// Placements are drawn in order, so later symbols cover earlier ones, and the
/// border ring goes on top of all of them. The layout is trusted: no collision
/// checks happen here.
pub fn render_card_with(
    card: &Card,
    catalog: &SymbolCatalog,
    layout: &[Placement],
    canvas: &CanvasSpec,
    palette: &Palette,
) -> Result<RgbaImage> {
    let mut card_img = RgbaImage::from_pixel(canvas.size, canvas.size, palette.background);

    for placement in layout {
        if !card.contains(placement.symbol) {
            return Err(SpotError::LayoutMismatch {
                symbol: placement.symbol,
            });
        }
        let symbol = catalog.get(placement.symbol)?;
        if placement.edge == 0 {
            continue;
        }
        let resized = resize(symbol, placement.edge, placement.edge, FilterType::Triangle);
        let (x, y) = placement.origin();
        overlay(&mut card_img, &resized, x, y);
    }
    draw_border(&mut card_img, canvas, palette);
    Ok(card_img)
}

fn draw_border(card_img: &mut RgbaImage, canvas: &CanvasSpec, palette: &Palette) {
    if canvas.border_width == 0 {
        return;
    }
    let (cx, cy) = canvas.center();
    let center = (cx.round() as i32, cy.round() as i32);
    let outer = canvas.border_radius().round() as i32;
    let inner = canvas.inscribed_radius().round() as i32;
    // Stroke grows inward from the outer radius. The ring is cut out on a mask
    // so symbols inside the inscribed circle survive.
    let mut ring = GrayImage::new(card_img.width(), card_img.height());
    draw_filled_circle_mut(&mut ring, center, outer, Luma([0xff]));
    if inner > 0 {
        draw_filled_circle_mut(&mut ring, center, inner, Luma([0x00]));
    }
    for (x, y, mask) in ring.enumerate_pixels() {
        if mask[0] != 0 {
            card_img.put_pixel(x, y, palette.border);
        }
    }
}

fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}
