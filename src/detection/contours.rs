use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;

use crate::models::BoundingBox;

/// Thicken edge responses so nearby strokes of the same glyph or line join
/// into one blob. Three iterations of a 3x3 rect element, which for a binary
/// mask equals a single L-inf dilation of radius 3.
pub fn dilate_mask(mask: &GrayImage, iterations: u8) -> GrayImage {
    dilate(mask, Norm::LInf, iterations)
}

/// Bounding boxes of the external contours of a binary mask, dropping boxes
/// under `min_size` in either dimension (too small to be meaningful text).
pub fn external_boxes(mask: &GrayImage, min_size: u32) -> Vec<BoundingBox> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .filter_map(|c| bounding_box(&c.points))
        .filter(|bb| bb.width >= min_size && bb.height >= min_size)
        .collect()
}

fn bounding_box(points: &[imageproc::point::Point<i32>]) -> Option<BoundingBox> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(BoundingBox {
        x: min_x as u32,
        y: min_y as u32,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    })
}

/// Greedy single-pass merge of contour boxes into text-line boxes.
///
/// Boxes are visited in ascending-x order. Each unconsumed box scans all
/// later boxes and absorbs any that pass the proximity test, replacing itself
/// with the union; the scan continues against the enlarged box, so a whole
/// line of words chains together in one forward pass. Result order follows
/// the sorted order, with consumed slots skipped.
pub fn merge_boxes(mut boxes: Vec<BoundingBox>) -> Vec<BoundingBox> {
    boxes.sort_by_key(|bb| bb.x);
    let mut consumed = vec![false; boxes.len()];
    let mut merged = Vec::new();

    for i in 0..boxes.len() {
        if consumed[i] {
            continue;
        }
        let mut bb = boxes[i];
        for j in (i + 1)..boxes.len() {
            if consumed[j] {
                continue;
            }
            if bb.is_near(&boxes[j]) {
                bb = bb.union(&boxes[j]);
                consumed[j] = true;
            }
        }
        merged.push(bb);
    }

    merged
}
