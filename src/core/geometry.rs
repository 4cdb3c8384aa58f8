//! Canvas geometry shared by the layout strategies and the renderer.

use serde::{Deserialize, Serialize};

use crate::core::deck::SymbolId;
use crate::core::error::{Result, invalid_parameter};

const CONTAINMENT_TOLERANCE: f64 = 1e-9;

/// Pixel geometry of a square card canvas with a circular border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSpec {
    pub size: u32,
    pub border_width: u32,
    /// Inset of the border circle from each canvas edge.
    pub margin: u32,
}

impl CanvasSpec {
    /// Create a canvas, rejecting geometry that leaves no playing area.
    pub fn new(size: u32, border_width: u32, margin: u32) -> Result<Self> {
        let canvas = Self {
            size,
            border_width,
            margin,
        };
        if size == 0 {
            return Err(invalid_parameter("card_size", size, "must be positive"));
        }
        if canvas.inscribed_radius() <= 0.0 {
            return Err(invalid_parameter(
                "margin",
                margin,
                format!("margin and border leave no playing area on a {size} px card"),
            ));
        }
        Ok(canvas)
    }

    pub fn center(&self) -> (f64, f64) {
        let c = f64::from(self.size) / 2.0;
        (c, c)
    }

    /// Outer radius of the border stroke.
    pub fn border_radius(&self) -> f64 {
        f64::from(self.size) / 2.0 - f64::from(self.margin)
    }

    /// Radius of the playing area, measured to the inner edge of the border.
    pub fn inscribed_radius(&self) -> f64 {
        self.border_radius() - f64::from(self.border_width)
    }

    /// Whether a point lies within the inscribed circle.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let (cx, cy) = self.center();
        (x - cx).hypot(y - cy) <= self.inscribed_radius() + CONTAINMENT_TOLERANCE
    }

    /// Whether all four corners of the box lie within the inscribed circle.
    pub fn contains_box(&self, bbox: &BoundingBox) -> bool {
        bbox.corners()
            .iter()
            .all(|&(x, y)| self.contains_point(x, y))
    }
}

/// A symbol drawn as a square of side `edge` centred on `(center_x, center_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub symbol: SymbolId,
    pub center_x: f64,
    pub center_y: f64,
    pub edge: u32,
}

impl Placement {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::centered(self.center_x, self.center_y, self.edge)
    }

    /// Top-left pixel of the symbol square.
    pub fn origin(&self) -> (i64, i64) {
        let half = f64::from(self.edge) / 2.0;
        (
            (self.center_x - half).round() as i64,
            (self.center_y - half).round() as i64,
        )
    }
}

/// Axis-aligned box in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn centered(x: f64, y: f64, edge: u32) -> Self {
        let half = f64::from(edge) / 2.0;
        Self {
            left: x - half,
            top: y - half,
            right: x + half,
            bottom: y + half,
        }
    }

    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.left, self.top),
            (self.right, self.top),
            (self.left, self.bottom),
            (self.right, self.bottom),
        ]
    }

    /// Open overlap test: boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !(self.right <= other.left
            || self.left >= other.right
            || self.bottom <= other.top
            || self.top >= other.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inscribed_radius_excludes_margin_and_border() {
        let canvas = CanvasSpec::new(500, 3, 20).unwrap();
        assert_eq!(canvas.border_radius(), 230.0);
        assert_eq!(canvas.inscribed_radius(), 227.0);
    }

    #[test]
    fn rejects_canvas_without_playing_area() {
        assert!(CanvasSpec::new(0, 0, 0).is_err());
        assert!(CanvasSpec::new(40, 0, 20).is_err());
        assert!(CanvasSpec::new(50, 5, 20).is_err());
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = BoundingBox::centered(10.0, 10.0, 10);
        let b = BoundingBox::centered(20.0, 10.0, 10);
        let c = BoundingBox::centered(19.0, 12.0, 10);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn contains_box_checks_corners() {
        let canvas = CanvasSpec::new(300, 0, 20).unwrap();
        let center = BoundingBox::centered(150.0, 150.0, 80);
        let edge = BoundingBox::centered(150.0, 40.0, 80);
        assert!(canvas.contains_box(&center));
        assert!(!canvas.contains_box(&edge));
    }
}
