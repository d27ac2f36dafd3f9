//! Color parsing and normalization
//!
//! The rasterizer only understands legacy sRGB color syntax. Anything written
//! in a wide-gamut or perceptual space is converted to `rgb()`/`rgba()` on the
//! snapshot before capture.

mod normalizer;
mod parser;
mod spaces;

pub use normalizer::*;
pub use parser::*;

use std::fmt;

/// An 8-bit sRGB color with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Quantize floating sRGB channels in 0..=1, clipping out-of-gamut values
    pub fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        fn to_u8(x: f64) -> u8 {
            if x.is_nan() {
                return 0;
            }
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Self::new(to_u8(r), to_u8(g), to_u8(b), to_u8(a))
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Alpha as a fraction rounded to three decimals
    pub fn alpha_fraction(&self) -> f64 {
        (f64::from(self.a) / 255.0 * 1000.0).round() / 1000.0
    }

    /// Encode in the legacy syntax every rasterizer accepts
    pub fn to_css(&self) -> String {
        self.to_string()
    }

    /// Lowercase `rrggbb` hex without the `#`, ignoring alpha
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                self.alpha_fraction()
            )
        }
    }
}

/// Native "parse any CSS color" capability.
///
/// Implementations render the color as a platform would and report the
/// resulting 8-bit channels, or `None` when the string is not a color.
pub trait ColorParser: Send + Sync {
    fn parse_color_to_rgba(&self, value: &str) -> Option<Rgba>;
}
