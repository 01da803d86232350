use image::{GrayImage, RgbImage};

/// Binary mask of strong local color changes.
///
/// A pixel is an edge when the squared per-channel difference to its right
/// or below neighbor, summed over channels, exceeds `threshold`. The last
/// column has no right neighbor and the last row no below neighbor, so the
/// directional tests pad with zero there. Edge density is the segmentation
/// signal because it works for any foreground/background color combination,
/// which is exactly the dimension an accessibility check cannot assume.
pub fn edge_mask(img: &RgbImage, threshold: u32) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut mask = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let here = img.get_pixel(x, y);
            let horizontal = x + 1 < width && diff_sq(here.0, img.get_pixel(x + 1, y).0) > threshold;
            let vertical = y + 1 < height && diff_sq(here.0, img.get_pixel(x, y + 1).0) > threshold;
            if horizontal || vertical {
                mask.put_pixel(x, y, image::Luma([255]));
            }
        }
    }

    mask
}

fn diff_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&a, &b)| {
            let d = i32::from(a) - i32::from(b);
            (d * d) as u32
        })
        .sum()
}
