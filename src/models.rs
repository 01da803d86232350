use image::GrayImage;

/// Axis-aligned bounding box in original-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Merge proximity test used while grouping contour boxes into text lines.
    ///
    /// `other` is near when its vertical range overlaps or touches this box's
    /// range and its left edge falls within width+height of this box's origin.
    /// Using the height as part of the horizontal budget lets taller text
    /// tolerate proportionally wider gaps between words.
    ///
    /// Note this is asymmetric: the left box's dimensions set the budget.
    /// Callers always visit boxes in ascending-x order, so the budget is
    /// always taken from the left box.
    pub fn is_near(&self, other: &BoundingBox) -> bool {
        if other.y > self.bottom() {
            return false;
        }
        if other.bottom() < self.y {
            return false;
        }
        other.x < self.x + self.width + self.height
    }

    /// Minimal box covering both inputs.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// A candidate text region: its location in the original image plus the
/// matching crop of the (non-dilated) edge mask.
#[derive(Debug, Clone)]
pub struct TextPiece {
    pub bbox: BoundingBox,
    pub mask: GrayImage,
}
