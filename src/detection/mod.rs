pub mod contours;
pub mod edges;
pub mod ocr;

use anyhow::Result;
use image::RgbImage;
use std::path::PathBuf;

use crate::models::TextPiece;
use ocr::TextRecognizer;

/// Text region detection pipeline.
///
/// Stateless per image: edge mask, dilation, contour boxes, merge into
/// text-line regions, then the OCR likelihood filter. Thresholds match the
/// reference tool so existing fixtures keep passing.
pub struct TextDetection {
    /// Squared color distance above which a neighbor jump counts as an edge.
    pub edge_threshold: u32,
    /// 3x3 dilation iterations applied before contour extraction.
    pub dilate_iterations: u8,
    /// Contour boxes under this size in either dimension are noise.
    pub min_box_size: u32,
    pub verbose: bool,
    /// When set, intermediate masks and region crops are saved here.
    pub debug_dir: Option<PathBuf>,
}

impl TextDetection {
    pub fn new() -> Self {
        Self {
            edge_threshold: 1000,
            dilate_iterations: 3,
            min_box_size: 10,
            verbose: false,
            debug_dir: None,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_debug_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.debug_dir = dir;
        self
    }

    /// Run the full detection pipeline on an image, keeping only regions the
    /// recognizer accepts as plausible text.
    ///
    /// A recognizer failure on a region rejects that region rather than
    /// aborting: an OCR hiccup must not take down a batch run.
    pub fn find_text_pieces(
        &self,
        img: &RgbImage,
        recognizer: &dyn TextRecognizer,
    ) -> Result<Vec<TextPiece>> {
        let pieces = self.candidate_pieces(img)?;

        if self.verbose {
            println!("Running OCR filter on {} candidate regions...", pieces.len());
        }

        let mut accepted = Vec::new();
        for (i, piece) in pieces.into_iter().enumerate() {
            match recognizer.recognize(&piece.mask) {
                Ok(text) if ocr::looks_like_text(&text) => {
                    if self.verbose {
                        println!("  Region {}: accepted ({:?})", i + 1, text.trim_end());
                    }
                    accepted.push(piece);
                }
                Ok(text) => {
                    if self.verbose {
                        println!("  Region {}: rejected ({:?})", i + 1, text.trim_end());
                    }
                }
                Err(e) => {
                    if self.verbose {
                        println!("  Region {}: OCR failed, rejected ({})", i + 1, e);
                    }
                }
            }
        }

        Ok(accepted)
    }

    /// Geometric stage only: every merged region with its cropped edge mask,
    /// before the OCR likelihood filter.
    pub fn candidate_pieces(&self, img: &RgbImage) -> Result<Vec<TextPiece>> {
        if self.verbose {
            println!("Building edge mask...");
        }
        let mask = edges::edge_mask(img, self.edge_threshold);
        self.save_debug("edge_mask.png", &mask)?;

        if self.verbose {
            println!("Dilating and extracting contours...");
        }
        let dilated = contours::dilate_mask(&mask, self.dilate_iterations);
        self.save_debug("dilated.png", &dilated)?;

        let boxes = contours::external_boxes(&dilated, self.min_box_size);
        if self.verbose {
            println!("Found {} contour boxes", boxes.len());
        }

        let merged = contours::merge_boxes(boxes);
        if self.verbose {
            println!("Merged into {} regions", merged.len());
        }

        // Crop from the non-dilated mask: the classifier needs the thin
        // glyph rims, not the thickened blobs.
        let mut pieces = Vec::new();
        for (i, bbox) in merged.into_iter().enumerate() {
            let crop =
                image::imageops::crop_imm(&mask, bbox.x, bbox.y, bbox.width, bbox.height)
                    .to_image();
            self.save_debug(&format!("region_{:02}.png", i + 1), &crop)?;
            pieces.push(TextPiece { bbox, mask: crop });
        }

        Ok(pieces)
    }

    fn save_debug(&self, name: &str, img: &image::GrayImage) -> Result<()> {
        if let Some(dir) = &self.debug_dir {
            std::fs::create_dir_all(dir)?;
            img.save(dir.join(name))
                .map_err(|e| anyhow::anyhow!("Failed to save debug image {}: {}", name, e))?;
        }
        Ok(())
    }
}

impl Default for TextDetection {
    fn default() -> Self {
        Self::new()
    }
}
