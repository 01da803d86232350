use image::{Rgb, RgbImage};
use textcheck::TextRecognizer;

/// Flat-colored synthetic screenshot.
pub fn screenshot(width: u32, height: u32, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, background)
}

/// Paint a solid block standing in for a rendered text line. The edge mask
/// picks up its boundary ring, the classifier sees the interior as the text
/// layer and the surroundings as background.
pub fn paint_block(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    for py in y..y + h {
        for px in x..x + w {
            img.put_pixel(px, py, color);
        }
    }
}

/// Recognizer stub: returns a fixed string, or fails when given None.
pub struct StubRecognizer {
    pub text: Option<String>,
}

impl StubRecognizer {
    pub fn saying(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { text: None }
    }
}

impl TextRecognizer for StubRecognizer {
    fn recognize(&self, _piece: &image::GrayImage) -> anyhow::Result<String> {
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => anyhow::bail!("recognizer backend unavailable"),
        }
    }
}
