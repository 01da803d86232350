pub mod checks;
pub mod classify;
pub mod color;
pub mod detection;
pub mod models;

pub use checks::{Problem, ProblemBox};
pub use classify::{LayerLabel, LayerMap, classify_layers, extract_colors};
pub use color::{Hsp, Rgb, rgb_to_hsp};
pub use detection::TextDetection;
pub use detection::ocr::{OcrsRecognizer, TextRecognizer, looks_like_text};
pub use models::{BoundingBox, TextPiece};
