/// Mean color of one classified layer, canonical RGB order, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Convert to HSP on the 0-1 scale used by the checks.
    pub fn to_hsp(self) -> Hsp {
        rgb_to_hsp(
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

/// Hue / saturation / perceptual brightness triple.
///
/// Brightness is the luma-weighted quadratic mean of the HSP color model,
/// which tracks perceived brightness much better than linear luma. Hue and
/// saturation are nominally in [0,1]; saturation can exceed 1 by rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsp {
    pub h: f64,
    pub s: f64,
    pub p: f64,
}

/// HSP conversion after Darel Rex Finley (alienryderflex.com/hsp.html).
/// Inputs and outputs are on a 0 to 1 scale. No clamping: the downstream
/// thresholds assume the exact values.
pub fn rgb_to_hsp(r: f64, g: f64, b: f64) -> Hsp {
    let p = (0.299 * r * r + 0.587 * g * g + 0.114 * b * b).sqrt();

    let (h, s) = if r == g && r == b {
        (0.0, 0.0)
    } else if r >= g && r >= b {
        // r is largest
        if b >= g {
            (1.0 - 1.0 / 6.0 * (b - g) / (r - g), 1.0 - g / r)
        } else {
            (1.0 / 6.0 * (g - b) / (r - b), 1.0 - b / r)
        }
    } else if g >= r && g >= b {
        // g is largest
        if r >= b {
            (2.0 / 6.0 - 1.0 / 6.0 * (r - b) / (g - b), 1.0 - b / g)
        } else {
            (2.0 / 6.0 + 1.0 / 6.0 * (b - r) / (g - r), 1.0 - r / g)
        }
    } else {
        // b is largest
        if g >= r {
            (4.0 / 6.0 - 1.0 / 6.0 * (g - r) / (b - r), 1.0 - r / b)
        } else {
            (4.0 / 6.0 + 1.0 / 6.0 * (r - g) / (b - g), 1.0 - g / b)
        }
    };

    Hsp { h, s, p }
}
