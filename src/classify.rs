use image::{GrayImage, RgbImage};

use crate::color::Rgb;

const EDGE: u8 = 255;
const BLANK: u8 = 0;

/// Per-pixel layer assignment for one region's edge mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerLabel {
    /// Not reached by any fill; enclosed pockets like the hole of an "O".
    Unclassified,
    /// Page/app background visible around the glyphs.
    OuterBackground,
    /// The glyphs' edge-detected rim.
    OuterContour,
    /// Glyph body/fill.
    Text,
}

/// Layer labels for one region, owned by a single classification call.
/// Same extent as the cropped edge mask it was built from.
pub struct LayerMap {
    width: u32,
    height: u32,
    labels: Vec<LayerLabel>,
}

impl LayerMap {
    pub fn get(&self, x: u32, y: u32) -> LayerLabel {
        self.labels[(y * self.width + x) as usize]
    }

    fn set(&mut self, x: u32, y: u32, label: LayerLabel) {
        self.labels[(y * self.width + x) as usize] = label;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Partition a region's binary edge mask into background / contour / text
/// layers.
///
/// Three passes of border-seeded flood fill: the outermost pixel ring seeds
/// OuterBackground, which spreads through blank (0) pixels; edge (255) pixels
/// touching the background become OuterContour and spread through edge
/// pixels; blank pixels touching the contour become Text and spread through
/// blank pixels. Fills are four-connected and iterative with an explicit
/// stack, so memory stays proportional to the region area even for huge
/// low-contrast regions.
pub fn classify_layers(mask: &GrayImage) -> LayerMap {
    let (width, height) = mask.dimensions();
    let mut layers = LayerMap {
        width,
        height,
        labels: vec![LayerLabel::Unclassified; (width * height) as usize],
    };

    // The bounding box ring always counts as background, whatever the mask
    // says there; the detector's boxes hug the dilated contour so the true
    // background is at most a few pixels outside the glyph edges.
    let mut stack: Vec<(u32, u32)> = Vec::new();
    for y in 0..height {
        for x in [0, width - 1] {
            layers.set(x, y, LayerLabel::OuterBackground);
            stack.push((x, y));
        }
    }
    for x in 1..width.saturating_sub(1) {
        for y in [0, height - 1] {
            layers.set(x, y, LayerLabel::OuterBackground);
            stack.push((x, y));
        }
    }
    flood_fill(&mut layers, mask, stack, LayerLabel::OuterBackground, BLANK);

    let seeds = adjacent_seeds(
        &mut layers,
        mask,
        EDGE,
        LayerLabel::OuterBackground,
        LayerLabel::OuterContour,
    );
    flood_fill(&mut layers, mask, seeds, LayerLabel::OuterContour, EDGE);

    let seeds = adjacent_seeds(
        &mut layers,
        mask,
        BLANK,
        LayerLabel::OuterContour,
        LayerLabel::Text,
    );
    flood_fill(&mut layers, mask, seeds, LayerLabel::Text, BLANK);

    layers
}

/// Spread `label` from the seeded stack through 4-connected unlabeled pixels
/// whose mask value is `source`.
fn flood_fill(
    layers: &mut LayerMap,
    mask: &GrayImage,
    mut stack: Vec<(u32, u32)>,
    label: LayerLabel,
    source: u8,
) {
    let (width, height) = mask.dimensions();
    while let Some((x, y)) = stack.pop() {
        let visit = |nx: u32, ny: u32, layers: &mut LayerMap, stack: &mut Vec<(u32, u32)>| {
            if layers.get(nx, ny) == LayerLabel::Unclassified
                && mask.get_pixel(nx, ny)[0] == source
            {
                layers.set(nx, ny, label);
                stack.push((nx, ny));
            }
        };
        if x > 0 {
            visit(x - 1, y, layers, &mut stack);
        }
        if y > 0 {
            visit(x, y - 1, layers, &mut stack);
        }
        if x + 1 < width {
            visit(x + 1, y, layers, &mut stack);
        }
        if y + 1 < height {
            visit(x, y + 1, layers, &mut stack);
        }
    }
}

/// Collect and label every unlabeled pixel of mask value `source` that has a
/// 4-neighbor already labeled `neighbor`. These become the seed stack for the
/// next fill pass.
fn adjacent_seeds(
    layers: &mut LayerMap,
    mask: &GrayImage,
    source: u8,
    neighbor: LayerLabel,
    label: LayerLabel,
) -> Vec<(u32, u32)> {
    let (width, height) = mask.dimensions();
    let mut seeds = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if layers.get(x, y) != LayerLabel::Unclassified
                || mask.get_pixel(x, y)[0] != source
            {
                continue;
            }
            let touches = (x > 0 && layers.get(x - 1, y) == neighbor)
                || (y > 0 && layers.get(x, y - 1) == neighbor)
                || (x + 1 < width && layers.get(x + 1, y) == neighbor)
                || (y + 1 < height && layers.get(x, y + 1) == neighbor);
            if touches {
                layers.set(x, y, label);
                seeds.push((x, y));
            }
        }
    }
    seeds
}

/// Mean color of the text layer and the outer background layer in the
/// region's color crop. Returns None when either layer is empty (a fully
/// filled block or a mask with no interior): an empty layer has no defensible
/// mean, and skipping the region is the only policy that cannot invent a
/// defect.
pub fn extract_colors(layers: &LayerMap, sub: &RgbImage) -> Option<(Rgb, Rgb)> {
    let text = layer_mean(layers, sub, LayerLabel::Text)?;
    let background = layer_mean(layers, sub, LayerLabel::OuterBackground)?;
    Some((text, background))
}

fn layer_mean(layers: &LayerMap, sub: &RgbImage, label: LayerLabel) -> Option<Rgb> {
    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for y in 0..layers.height().min(sub.height()) {
        for x in 0..layers.width().min(sub.width()) {
            if layers.get(x, y) == label {
                let px = sub.get_pixel(x, y);
                sum[0] += u64::from(px[0]);
                sum[1] += u64::from(px[1]);
                sum[2] += u64::from(px[2]);
                count += 1;
            }
        }
    }
    if count == 0 {
        return None;
    }
    Some(Rgb {
        r: (sum[0] / count) as u8,
        g: (sum[1] / count) as u8,
        b: (sum[2] / count) as u8,
    })
}
