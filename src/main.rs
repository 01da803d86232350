use clap::{Parser, ValueEnum};
use image::ImageReader;
use std::path::{Path, PathBuf};

use textcheck::checks;
use textcheck::detection::ocr::{OcrsRecognizer, TextRecognizer};
use textcheck::{TextDetection, TextPiece, classify_layers, extract_colors};

#[derive(Parser)]
#[command(name = "textcheck")]
#[command(about = "Flag accessibility problems in screenshot text")]
struct Cli {
    /// Paths to screenshot files to inspect
    #[arg(value_name = "IMAGES", required = true)]
    images: Vec<PathBuf>,

    /// Which checks to run; repeat to select a subset (default: all)
    #[arg(short, long, value_enum, default_value = "all")]
    checks: Vec<CheckKind>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save intermediate masks and region crops to directory
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Skip the OCR filter and treat every detected region as text
    /// (faster, for pipeline debugging)
    #[arg(long)]
    skip_ocr: bool,
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum CheckKind {
    All,
    Height,
    Saturation,
    Contrast,
}

impl Cli {
    fn wants(&self, kind: CheckKind) -> bool {
        self.checks
            .iter()
            .any(|c| *c == CheckKind::All || *c == kind)
    }
}

/// Stand-in recognizer for --skip-ocr: accepts everything.
struct AcceptAll;

impl TextRecognizer for AcceptAll {
    fn recognize(&self, _piece: &image::GrayImage) -> anyhow::Result<String> {
        Ok("ok".to_string())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let recognizer: Box<dyn TextRecognizer> = if args.skip_ocr {
        Box::new(AcceptAll)
    } else {
        Box::new(OcrsRecognizer::new()?)
    };

    let mut failures = 0usize;
    for path in &args.images {
        if let Err(e) = process_image(path, &args, recognizer.as_ref()) {
            eprintln!("{}: {:#}", path.display(), e);
            failures += 1;
        }
    }

    // One bad image must not hide results for the rest of the batch, but the
    // exit code still has to reflect it.
    if failures > 0 {
        anyhow::bail!("{} of {} images failed", failures, args.images.len());
    }
    Ok(())
}

fn process_image(path: &Path, args: &Cli, recognizer: &dyn TextRecognizer) -> anyhow::Result<()> {
    if args.verbose {
        println!("Loading image: {:?}", path);
    }

    let img = ImageReader::open(path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?
        .to_rgb8();

    if args.verbose {
        println!("Image loaded: {}x{}", img.width(), img.height());
    }

    let debug_dir = args
        .debug_out
        .as_ref()
        .map(|dir| dir.join(path.file_stem().unwrap_or_default()));

    let detection = TextDetection::new()
        .with_verbose(args.verbose)
        .with_debug_dir(debug_dir);

    let pieces = detection.find_text_pieces(&img, recognizer)?;
    let image_name = path.display().to_string();
    let mut out = std::io::stdout().lock();

    for piece in &pieces {
        run_checks(&image_name, piece, &img, args, &mut out)?;
    }

    Ok(())
}

fn run_checks(
    image_name: &str,
    piece: &TextPiece,
    img: &image::RgbImage,
    args: &Cli,
    out: &mut impl std::io::Write,
) -> anyhow::Result<()> {
    let mut problems = Vec::new();

    if args.wants(CheckKind::Height) {
        problems.extend(checks::check_text_height(image_name, piece, img.height()));
    }

    if args.wants(CheckKind::Saturation) || args.wants(CheckKind::Contrast) {
        let sub = image::imageops::crop_imm(
            img,
            piece.bbox.x,
            piece.bbox.y,
            piece.bbox.width,
            piece.bbox.height,
        )
        .to_image();
        let layers = classify_layers(&piece.mask);

        // No usable text or background layer (e.g. a solid block): the
        // region has no color signal, skip the color checks for it.
        if let Some((text, background)) = extract_colors(&layers, &sub) {
            if args.wants(CheckKind::Saturation) {
                problems.extend(checks::check_background_saturation(
                    image_name, piece, background,
                ));
            }
            if args.wants(CheckKind::Contrast) {
                problems.extend(checks::check_contrast(image_name, piece, text, background));
            }
        } else if args.verbose {
            println!("  Region at ({}, {}): empty layer, color checks skipped",
                piece.bbox.x, piece.bbox.y);
        }
    }

    for problem in &problems {
        checks::report_problem(out, problem)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runs_every_check() {
        let cli = Cli::try_parse_from(["textcheck", "shot.png"]).unwrap();
        assert!(cli.wants(CheckKind::Height));
        assert!(cli.wants(CheckKind::Saturation));
        assert!(cli.wants(CheckKind::Contrast));
    }

    #[test]
    fn two_of_three_checks_can_be_selected() {
        let cli = Cli::try_parse_from([
            "textcheck", "-c", "height", "-c", "contrast", "shot.png",
        ])
        .unwrap();
        assert!(cli.wants(CheckKind::Height));
        assert!(cli.wants(CheckKind::Contrast));
        assert!(!cli.wants(CheckKind::Saturation));
    }

    #[test]
    fn single_check_can_be_selected() {
        let cli = Cli::try_parse_from(["textcheck", "--checks", "saturation", "shot.png"]).unwrap();
        assert!(cli.wants(CheckKind::Saturation));
        assert!(!cli.wants(CheckKind::Height));
        assert!(!cli.wants(CheckKind::Contrast));
    }
}
