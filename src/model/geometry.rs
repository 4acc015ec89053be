//! Page-space geometry.

use serde::{Deserialize, Serialize};

/// Default page size in points (A4, 210 x 297 mm).
pub const A4_PAGE_SIZE: PageSize = PageSize {
    width: 595.0,
    height: 842.0,
};

/// A page-space rectangle `[x1, y1, x2, y2]` in page units, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    /// Left edge
    pub x1: f64,
    /// Top edge
    pub y1: f64,
    /// Right edge
    pub x2: f64,
    /// Bottom edge
    pub y2: f64,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a bbox from a loosely typed coordinate list.
    ///
    /// Returns `None` unless exactly four coordinates are present.
    pub fn from_slice(coords: &[f64]) -> Option<Self> {
        match coords {
            [x1, y1, x2, y2] => Some(Self::new(*x1, *y1, *x2, *y2)),
            _ => None,
        }
    }

    /// Rectangle width.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Rectangle height.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Project this bbox to pixel space at the given zoom scale.
    pub fn to_pixel_rect(&self, zoom: f64) -> PixelRect {
        PixelRect {
            x: self.x1 * zoom,
            y: self.y1 * zoom,
            width: self.width() * zoom,
            height: self.height() * zoom,
        }
    }
}

impl From<[f64; 4]> for BBox {
    fn from(c: [f64; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<BBox> for [f64; 4] {
    fn from(b: BBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// Page dimensions `[width, height]` in page units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PageSize {
    /// Page width
    pub width: f64,
    /// Page height
    pub height: f64,
}

impl PageSize {
    /// Create a page size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Build a page size from a loosely typed list; `None` unless it has two entries.
    pub fn from_slice(dims: &[f64]) -> Option<Self> {
        match dims {
            [w, h] => Some(Self::new(*w, *h)),
            _ => None,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        A4_PAGE_SIZE
    }
}

impl From<[f64; 2]> for PageSize {
    fn from(d: [f64; 2]) -> Self {
        Self::new(d[0], d[1])
    }
}

impl From<PageSize> for [f64; 2] {
    fn from(p: PageSize) -> Self {
        [p.width, p.height]
    }
}

/// A rectangle in viewer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left offset in pixels
    pub x: f64,
    /// Top offset in pixels
    pub y: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_from_slice() {
        assert_eq!(
            BBox::from_slice(&[1.0, 2.0, 3.0, 4.0]),
            Some(BBox::new(1.0, 2.0, 3.0, 4.0))
        );
        assert_eq!(BBox::from_slice(&[1.0, 2.0, 3.0]), None);
        assert_eq!(BBox::from_slice(&[]), None);
    }

    #[test]
    fn test_bbox_serializes_as_array() {
        let bbox = BBox::new(10.0, 20.0, 100.0, 40.0);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[10.0,20.0,100.0,40.0]");

        let back: BBox = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bbox);
    }

    #[test]
    fn test_pixel_rect_scales_with_zoom() {
        let rect = BBox::new(10.0, 20.0, 100.0, 40.0).to_pixel_rect(1.5);
        assert_eq!(rect.x, 15.0);
        assert_eq!(rect.y, 30.0);
        assert_eq!(rect.width, 135.0);
        assert_eq!(rect.height, 30.0);
    }

    #[test]
    fn test_page_size_default_is_a4() {
        let size = PageSize::default();
        assert_eq!(size.width, 595.0);
        assert_eq!(size.height, 842.0);
        assert_eq!(PageSize::from_slice(&[612.0]), None);
    }
}
