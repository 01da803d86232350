use serde::Serialize;
use std::io::Write;

use crate::color::Rgb;
use crate::models::{BoundingBox, TextPiece};

/// Physical height of the assumed reference screen (average 6" phone).
pub const SCREEN_HEIGHT_MM: f64 = 135.0;
/// Text rendered below this physical height is flagged as too small.
pub const MIN_TEXT_HEIGHT_MM: f64 = 3.0;
/// Maximum tolerated saturation x brightness product for backgrounds.
pub const MAX_SATURATION: f64 = 0.3;
/// Perceptual brightness difference bounds between text and background.
pub const MIN_CONTRAST: f64 = 0.2;
pub const MAX_CONTRAST: f64 = 0.95;

/// One detected accessibility defect, reported as a single NDJSON line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Problem {
    pub image: String,
    pub message: String,
    pub bounding_box: ProblemBox,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProblemBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl From<BoundingBox> for ProblemBox {
    fn from(bb: BoundingBox) -> Self {
        Self {
            x: bb.x,
            y: bb.y,
            w: bb.width,
            h: bb.height,
        }
    }
}

/// Write one problem record and flush, so partial output survives a crash
/// later in the batch and consumers can stream.
pub fn report_problem(out: &mut impl Write, problem: &Problem) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, problem)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Text that maps to a physical height under 3 mm on the reference screen.
pub fn check_text_height(image: &str, piece: &TextPiece, image_height: u32) -> Option<Problem> {
    let text_height_mm =
        SCREEN_HEIGHT_MM * f64::from(piece.mask.height()) / f64::from(image_height);
    if text_height_mm < MIN_TEXT_HEIGHT_MM {
        return Some(Problem {
            image: image.to_string(),
            message: format!("text height too small ({} mm)", text_height_mm),
            bounding_box: piece.bbox.into(),
        });
    }
    None
}

/// Background whose saturation x brightness product reads as loud/toxic.
pub fn check_background_saturation(
    image: &str,
    piece: &TextPiece,
    background: Rgb,
) -> Option<Problem> {
    let hsp = background.to_hsp();
    if hsp.s * hsp.p > MAX_SATURATION {
        return Some(Problem {
            image: image.to_string(),
            message: format!("background color is too saturated ({})", hsp.s),
            bounding_box: piece.bbox.into(),
        });
    }
    None
}

/// Perceptual brightness difference outside the comfortable band.
/// Too little and the text washes out; too much strains the eyes.
pub fn check_contrast(image: &str, piece: &TextPiece, text: Rgb, background: Rgb) -> Option<Problem> {
    let contrast = (background.to_hsp().p - text.to_hsp().p).abs();
    if contrast < MIN_CONTRAST {
        return Some(Problem {
            image: image.to_string(),
            message: format!(
                "contrast between text and background is too low ({})",
                contrast
            ),
            bounding_box: piece.bbox.into(),
        });
    }
    if contrast > MAX_CONTRAST {
        return Some(Problem {
            image: image.to_string(),
            message: format!(
                "contrast between text and background is too high ({})",
                contrast
            ),
            bounding_box: piece.bbox.into(),
        });
    }
    None
}
