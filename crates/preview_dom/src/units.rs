//! CSS length units
//!
//! Absolute units resolve at the CSS reference density of 96 px per inch.

/// CSS pixels per inch
pub const CSS_PX_PER_INCH: f64 = 96.0;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// PDF points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert millimetres to pixels at the given density
pub fn mm_to_px(mm: f64, dpi: f64) -> f64 {
    mm / MM_PER_INCH * dpi
}

/// Convert millimetres to PDF points
pub fn mm_to_pt(mm: f64) -> f64 {
    mm / MM_PER_INCH * POINTS_PER_INCH
}

/// Parse an absolute CSS length into CSS pixels.
///
/// Returns `None` for keywords (`auto`, `none`), percentages and anything
/// that needs a layout context. A bare `0` is accepted.
pub fn parse_length_px(value: &str) -> Option<f64> {
    let value = value.trim().to_ascii_lowercase();
    if value == "0" {
        return Some(0.0);
    }
    let split = value
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f64 = number.trim().parse().ok()?;
    let px = match unit {
        "px" => number,
        "mm" => mm_to_px(number, CSS_PX_PER_INCH),
        "cm" => mm_to_px(number * 10.0, CSS_PX_PER_INCH),
        "in" => number * CSS_PX_PER_INCH,
        "pt" => number * CSS_PX_PER_INCH / POINTS_PER_INCH,
        "pc" => number * 16.0,
        _ => return None,
    };
    px.is_finite().then_some(px)
}

/// Parse a shorthand like `padding: 8px 16px` into top/right/bottom/left px
pub fn parse_box_shorthand(value: &str) -> Option<[f64; 4]> {
    let parts: Option<Vec<f64>> = value.split_whitespace().map(parse_length_px).collect();
    match parts?.as_slice() {
        [all] => Some([*all; 4]),
        [vertical, horizontal] => Some([*vertical, *horizontal, *vertical, *horizontal]),
        [top, horizontal, bottom] => Some([*top, *horizontal, *bottom, *horizontal]),
        [top, right, bottom, left] => Some([*top, *right, *bottom, *left]),
        _ => None,
    }
}
