mod common;

use common::{StubRecognizer, paint_block, screenshot};
use image::{Rgb, RgbImage};
use textcheck::checks;
use textcheck::{Problem, TextDetection, TextPiece, classify_layers, extract_colors};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Full pipeline: detect, classify, run every check; collect problems.
fn run_all_checks(img: &RgbImage, name: &str) -> Vec<Problem> {
    let pieces = TextDetection::new()
        .find_text_pieces(img, &StubRecognizer::saying("Sample text"))
        .unwrap();

    let mut problems = Vec::new();
    for piece in &pieces {
        problems.extend(checks::check_text_height(name, piece, img.height()));
        if let Some((text, background)) = region_colors(img, piece) {
            problems.extend(checks::check_background_saturation(name, piece, background));
            problems.extend(checks::check_contrast(name, piece, text, background));
        }
    }
    problems
}

fn region_colors(
    img: &RgbImage,
    piece: &TextPiece,
) -> Option<(textcheck::Rgb, textcheck::Rgb)> {
    let sub = image::imageops::crop_imm(
        img,
        piece.bbox.x,
        piece.bbox.y,
        piece.bbox.width,
        piece.bbox.height,
    )
    .to_image();
    extract_colors(&classify_layers(&piece.mask), &sub)
}

#[test]
fn image_without_text_reports_nothing() {
    let img = screenshot(640, 480, WHITE);
    assert!(run_all_checks(&img, "no_text.png").is_empty());
}

#[test]
fn readable_dark_on_light_text_reports_nothing() {
    let mut img = screenshot(640, 1080, WHITE);
    // 41px block grows to ~48px with dilation: 6mm at 135mm/1080px.
    paint_block(&mut img, 60, 200, 300, 41, Rgb([30, 30, 30]));
    assert!(run_all_checks(&img, "text_ok.png").is_empty());
}

#[test]
fn small_text_triggers_exactly_one_height_problem() {
    let mut img = screenshot(640, 1080, WHITE);
    // 16px block grows to ~23px: 2.9mm, under the 3mm floor.
    paint_block(&mut img, 60, 200, 300, 16, Rgb([30, 30, 30]));

    let problems = run_all_checks(&img, "text_small.png");
    assert_eq!(problems.len(), 1);
    assert!(problems[0].message.starts_with("text height too small"));

    // Bounding box tracks the painted block within dilation tolerance.
    let bb = &problems[0].bounding_box;
    assert!(bb.x.abs_diff(60) <= 10);
    assert!(bb.y.abs_diff(200) <= 10);
    assert!((bb.x + bb.w).abs_diff(360) <= 10);
    assert!((bb.y + bb.h).abs_diff(216) <= 10);
}

#[test]
fn saturated_background_triggers_exactly_one_problem() {
    let mut img = screenshot(640, 1080, Rgb([230, 30, 30]));
    paint_block(&mut img, 60, 200, 300, 41, WHITE);

    let problems = run_all_checks(&img, "toxic.png");
    assert_eq!(problems.len(), 1);
    assert!(
        problems[0]
            .message
            .starts_with("background color is too saturated")
    );
}

#[test]
fn low_contrast_text_triggers_exactly_one_problem() {
    let mut img = screenshot(640, 1080, Rgb([150, 150, 150]));
    paint_block(&mut img, 60, 200, 300, 41, Rgb([120, 120, 120]));

    let problems = run_all_checks(&img, "low_contrast.png");
    assert_eq!(problems.len(), 1);
    assert!(problems[0].message.contains("too low"));
}

#[test]
fn extreme_contrast_triggers_exactly_one_problem() {
    let mut img = screenshot(640, 1080, WHITE);
    paint_block(&mut img, 60, 200, 300, 41, BLACK);

    let problems = run_all_checks(&img, "high_contrast.png");
    assert_eq!(problems.len(), 1);
    assert!(problems[0].message.contains("too high"));
}

#[test]
fn classified_colors_match_the_painted_colors() {
    let mut img = screenshot(640, 480, Rgb([240, 240, 240]));
    paint_block(&mut img, 60, 200, 300, 41, Rgb([10, 40, 90]));

    let pieces = TextDetection::new()
        .find_text_pieces(&img, &StubRecognizer::saying("Sample"))
        .unwrap();
    assert_eq!(pieces.len(), 1);

    let (text, background) = region_colors(&img, &pieces[0]).unwrap();
    assert_eq!(text, textcheck::Rgb { r: 10, g: 40, b: 90 });
    assert_eq!(
        background,
        textcheck::Rgb {
            r: 240,
            g: 240,
            b: 240
        }
    );
}

#[test]
fn report_writes_one_json_object_per_line() {
    let problems = vec![
        Problem {
            image: "a.png".into(),
            message: "text height too small (2.5 mm)".into(),
            bounding_box: textcheck::ProblemBox { x: 1, y: 2, w: 3, h: 4 },
        },
        Problem {
            image: "a.png".into(),
            message: "contrast between text and background is too low (0.1)".into(),
            bounding_box: textcheck::ProblemBox { x: 5, y: 6, w: 7, h: 8 },
        },
    ];

    let mut out = Vec::new();
    for p in &problems {
        checks::report_problem(&mut out, p).unwrap();
    }

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for (line, problem) in lines.iter().zip(&problems) {
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["image"], "a.png");
        assert_eq!(parsed["message"], problem.message.as_str());
        assert_eq!(parsed["bounding_box"]["x"], problem.bounding_box.x);
    }
}
