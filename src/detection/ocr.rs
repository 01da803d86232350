use image::{DynamicImage, GrayImage};
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use std::path::Path;

/// Narrow capability interface over the OCR backend: one edge-mask patch in,
/// recognized text out. The pipeline only needs a "does this look like text"
/// signal, not a correct transcription, so any engine (or a test stub) fits.
pub trait TextRecognizer {
    fn recognize(&self, piece: &GrayImage) -> anyhow::Result<String>;
}

/// Recognizer backed by the ocrs engine.
pub struct OcrsRecognizer {
    engine: OcrEngine,
}

impl OcrsRecognizer {
    /// Load models from the standard ocrs cache location.
    pub fn new() -> anyhow::Result<Self> {
        let home_dir = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;

        let cache_dir = Path::new(&home_dir).join(".cache/ocrs");
        let detection_model_path = cache_dir.join("text-detection.rten");
        let recognition_model_path = cache_dir.join("text-recognition.rten");

        if !detection_model_path.exists() || !recognition_model_path.exists() {
            anyhow::bail!(
                "OCR models not found. Please run: ocrs-cli --help (or download models manually)\n\
                 Expected locations:\n  - {}\n  - {}",
                detection_model_path.display(),
                recognition_model_path.display()
            );
        }

        let detection_model = Model::load_file(&detection_model_path)?;
        let recognition_model = Model::load_file(&recognition_model_path)?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })?;

        Ok(Self { engine })
    }
}

impl TextRecognizer for OcrsRecognizer {
    fn recognize(&self, piece: &GrayImage) -> anyhow::Result<String> {
        // The engine wants RGB8 input; the mask patch is already high
        // contrast so no further preprocessing is needed.
        let img = DynamicImage::ImageLuma8(piece.clone()).to_rgb8();
        let img_source = ImageSource::from_bytes(img.as_raw(), img.dimensions())?;
        let ocr_input = self.engine.prepare_input(img_source)?;
        Ok(self.engine.get_text(&ocr_input)?)
    }
}

/// Heuristic false-positive filter over the recognizer's output: at least
/// two characters after trimming, and at least half of them ASCII letters or
/// digits. Icons, photos and noise blobs rarely pass both.
pub fn looks_like_text(text: &str) -> bool {
    let text = text.trim_end();
    let total = text.chars().count();
    if total < 2 {
        return false;
    }
    let alnum = text.chars().filter(|c| c.is_ascii_alphanumeric()).count();
    alnum * 2 >= total
}
