//! CSS color parsing
//!
//! `CssColorParser` is the built-in stand-in for a platform color parser. It
//! accepts the full CSS Color 4 surface the preview may use (legacy and
//! modern functions, predefined `color()` spaces, `color-mix()`), resolves to
//! sRGB and quantizes the way a 1x1 canvas readback would.

use super::spaces::{self, PredefinedSpace};
use super::{ColorParser, Rgba};

/// Color functions the rasterizer cannot consume
pub const UNSUPPORTED_COLOR_FUNCTIONS: &[&str] =
    &["lab", "lch", "oklab", "oklch", "color", "color-mix"];

/// Built-in CSS color parser
#[derive(Debug, Clone, Copy, Default)]
pub struct CssColorParser;

impl ColorParser for CssColorParser {
    fn parse_color_to_rgba(&self, value: &str) -> Option<Rgba> {
        parse_css_color(value)
    }
}

/// Parse any CSS color into 8-bit sRGB
pub fn parse_css_color(value: &str) -> Option<Rgba> {
    parse_unit(value).map(|[r, g, b, a]| Rgba::from_unit(r, g, b, a))
}

/// Whether the value is plain legacy syntax (named, hex, rgb/rgba, hsl/hsla)
pub fn is_legacy_color(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    match value.find('(') {
        Some(open) => {
            matches!(value[..open].trim(), "rgb" | "rgba" | "hsl" | "hsla")
                && parse_unit(&value).is_some()
        }
        None => parse_unit(&value).is_some(),
    }
}

/// Parse into unclipped sRGB channels plus alpha
fn parse_unit(value: &str) -> Option<[f64; 4]> {
    let value = value.trim().to_ascii_lowercase();
    if value == "transparent" {
        return Some([0.0; 4]);
    }
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(open) = value.find('(') {
        let body = value.strip_suffix(')')?;
        let name = body[..open].trim();
        return parse_function(name, &body[open + 1..]);
    }
    named_color(&value).map(|Rgba { r, g, b, a }| {
        [r, g, b, a].map(|c| f64::from(c) / 255.0)
    })
}

fn parse_hex(hex: &str) -> Option<[f64; 4]> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok();
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let channels: [u8; 4] = match hex.len() {
        3 => [digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, 255],
        4 => [digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, digit(3)? * 17],
        6 => [pair(0)?, pair(2)?, pair(4)?, 255],
        8 => [pair(0)?, pair(2)?, pair(4)?, pair(6)?],
        _ => return None,
    };
    Some(channels.map(|c| f64::from(c) / 255.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Component {
    Number(f64),
    Percent(f64),
    Angle(f64),
    None,
}

impl Component {
    fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token == "none" {
            return Some(Component::None);
        }
        if let Some(number) = token.strip_suffix('%') {
            return finite(number).map(Component::Percent);
        }
        for (unit, to_degrees) in [
            ("deg", 1.0),
            ("grad", 0.9),
            ("rad", 180.0 / std::f64::consts::PI),
            ("turn", 360.0),
        ] {
            if let Some(number) = token.strip_suffix(unit) {
                return finite(number).map(|n| Component::Angle(n * to_degrees));
            }
        }
        finite(token).map(Component::Number)
    }

    /// Resolve against the value 100% maps to
    fn scaled(self, percent_reference: f64) -> Option<f64> {
        match self {
            Component::Number(n) => Some(n),
            Component::Percent(p) => Some(p / 100.0 * percent_reference),
            Component::None => Some(0.0),
            Component::Angle(_) => None,
        }
    }

    fn hue(self) -> Option<f64> {
        match self {
            Component::Number(n) | Component::Angle(n) => Some(n),
            Component::None => Some(0.0),
            Component::Percent(_) => None,
        }
    }

    fn alpha(self) -> Option<f64> {
        self.scaled(1.0).map(|a| a.clamp(0.0, 1.0))
    }
}

fn finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Arguments of a color function, split into channels and optional alpha
struct Arguments<'a> {
    channels: Vec<&'a str>,
    alpha: Option<&'a str>,
}

impl<'a> Arguments<'a> {
    fn split(body: &'a str) -> Option<Self> {
        if body.contains(',') {
            if body.contains('/') {
                return None;
            }
            let mut channels: Vec<&str> = body.split(',').map(str::trim).collect();
            let alpha = if channels.len() == 4 { channels.pop() } else { None };
            return Some(Self { channels, alpha });
        }
        let (channels, alpha) = match body.split_once('/') {
            Some((channels, alpha)) => (channels, Some(alpha.trim())),
            None => (body, None),
        };
        Some(Self {
            channels: channels.split_whitespace().collect(),
            alpha,
        })
    }

    fn components<const N: usize>(&self) -> Option<[Component; N]> {
        if self.channels.len() != N {
            return None;
        }
        let mut out = [Component::None; N];
        for (slot, token) in out.iter_mut().zip(&self.channels) {
            *slot = Component::parse(token)?;
        }
        Some(out)
    }

    fn alpha(&self) -> Option<f64> {
        match self.alpha {
            Some(token) => Component::parse(token)?.alpha(),
            None => Some(1.0),
        }
    }
}

fn parse_function(name: &str, body: &str) -> Option<[f64; 4]> {
    if name == "color-mix" {
        return parse_color_mix(body);
    }

    let args = Arguments::split(body)?;
    let alpha = args.alpha()?;
    let [r, g, b] = match name {
        "rgb" | "rgba" => {
            let [r, g, b] = args.components::<3>()?;
            [
                r.scaled(255.0)? / 255.0,
                g.scaled(255.0)? / 255.0,
                b.scaled(255.0)? / 255.0,
            ]
        }
        "hsl" | "hsla" => {
            let [h, s, l] = args.components::<3>()?;
            spaces::hsl_to_srgb(h.hue()?, percentage(s)?, percentage(l)?)
        }
        "hwb" => {
            let [h, w, b] = args.components::<3>()?;
            spaces::hwb_to_srgb(h.hue()?, percentage(w)?, percentage(b)?)
        }
        "lab" => {
            let [l, a, b] = args.components::<3>()?;
            spaces::lab_to_srgb(l.scaled(100.0)?.max(0.0), a.scaled(125.0)?, b.scaled(125.0)?)
        }
        "lch" => {
            let [l, c, h] = args.components::<3>()?;
            spaces::lch_to_srgb(l.scaled(100.0)?.max(0.0), c.scaled(150.0)?, h.hue()?)
        }
        "oklab" => {
            let [l, a, b] = args.components::<3>()?;
            spaces::oklab_to_srgb(l.scaled(1.0)?.max(0.0), a.scaled(0.4)?, b.scaled(0.4)?)
        }
        "oklch" => {
            let [l, c, h] = args.components::<3>()?;
            spaces::oklch_to_srgb(l.scaled(1.0)?.max(0.0), c.scaled(0.4)?, h.hue()?)
        }
        "color" => {
            let (space, rest) = args.channels.split_first()?;
            let space = PredefinedSpace::from_name(space)?;
            let channels = Arguments {
                channels: rest.to_vec(),
                alpha: None,
            };
            let [x, y, z] = channels.components::<3>()?;
            space.to_srgb([x.scaled(1.0)?, y.scaled(1.0)?, z.scaled(1.0)?])
        }
        _ => return None,
    };
    Some([r, g, b, alpha])
}

/// HSL/HWB saturation-like channels: bare numbers are read as percentages
fn percentage(component: Component) -> Option<f64> {
    match component {
        Component::Number(n) => Some(n / 100.0),
        other => other.scaled(1.0),
    }
}

#[derive(Debug, Clone, Copy)]
enum MixSpace {
    Srgb,
    SrgbLinear,
    Oklab,
}

/// `color-mix(in <space>, <color> [<p>%], <color> [<p>%])`
fn parse_color_mix(body: &str) -> Option<[f64; 4]> {
    let parts = split_top_level_commas(body);
    let [space, first, second] = parts.as_slice() else {
        return None;
    };
    let space = match space.trim().strip_prefix("in ")?.trim() {
        "srgb" => MixSpace::Srgb,
        "srgb-linear" => MixSpace::SrgbLinear,
        "oklab" => MixSpace::Oklab,
        _ => return None,
    };

    let (first, p1) = split_mix_stop(first)?;
    let (second, p2) = split_mix_stop(second)?;
    let (p1, p2) = match (p1, p2) {
        (None, None) => (0.5, 0.5),
        (Some(p1), None) => (p1, 1.0 - p1),
        (None, Some(p2)) => (1.0 - p2, p2),
        (Some(p1), Some(p2)) => (p1, p2),
    };
    let total = p1 + p2;
    if total <= 0.0 {
        return None;
    }
    let (w1, w2) = (p1 / total, p2 / total);
    let alpha_multiplier = total.min(1.0);

    let c1 = parse_unit(first)?;
    let c2 = parse_unit(second)?;
    let to_space = |c: [f64; 4]| {
        let rgb = [c[0], c[1], c[2]];
        match space {
            MixSpace::Srgb => rgb,
            MixSpace::SrgbLinear => spaces::srgb_to_linear(rgb),
            MixSpace::Oklab => spaces::srgb_to_oklab(rgb),
        }
    };
    let (a1, a2) = (c1[3], c2[3]);
    let alpha = a1 * w1 + a2 * w2;
    if alpha <= 0.0 {
        return Some([0.0; 4]);
    }

    let (s1, s2) = (to_space(c1), to_space(c2));
    let mut mixed = [0.0; 3];
    for i in 0..3 {
        mixed[i] = (s1[i] * a1 * w1 + s2[i] * a2 * w2) / alpha;
    }
    let [r, g, b] = match space {
        MixSpace::Srgb => mixed,
        MixSpace::SrgbLinear => spaces::linear_to_srgb(mixed),
        MixSpace::Oklab => spaces::oklab_to_srgb(mixed[0], mixed[1], mixed[2]),
    };
    Some([r, g, b, alpha * alpha_multiplier])
}

/// Split `<color> <percentage>?` where the color may itself contain spaces
fn split_mix_stop(stop: &str) -> Option<(&str, Option<f64>)> {
    let stop = stop.trim();
    if let Some((color, last)) = stop.rsplit_once(' ') {
        if let Some(p) = last.strip_suffix('%').and_then(finite) {
            return Some((color.trim(), Some((p / 100.0).clamp(0.0, 1.0))));
        }
    }
    if let Some((first, color)) = stop.split_once(' ') {
        if let Some(p) = first.strip_suffix('%').and_then(finite) {
            return Some((color.trim(), Some((p / 100.0).clamp(0.0, 1.0))));
        }
    }
    Some((stop, None))
}

fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn named_color(name: &str) -> Option<Rgba> {
    let rgb = |r, g, b| Some(Rgba::opaque(r, g, b));
    match name {
        "black" => rgb(0, 0, 0),
        "white" => rgb(255, 255, 255),
        "red" => rgb(255, 0, 0),
        "green" => rgb(0, 128, 0),
        "lime" => rgb(0, 255, 0),
        "blue" => rgb(0, 0, 255),
        "yellow" => rgb(255, 255, 0),
        "cyan" | "aqua" => rgb(0, 255, 255),
        "magenta" | "fuchsia" => rgb(255, 0, 255),
        "gray" | "grey" => rgb(128, 128, 128),
        "silver" => rgb(192, 192, 192),
        "maroon" => rgb(128, 0, 0),
        "olive" => rgb(128, 128, 0),
        "purple" => rgb(128, 0, 128),
        "teal" => rgb(0, 128, 128),
        "navy" => rgb(0, 0, 128),
        "orange" => rgb(255, 165, 0),
        "pink" => rgb(255, 192, 203),
        "brown" => rgb(165, 42, 42),
        "gold" => rgb(255, 215, 0),
        "indigo" => rgb(75, 0, 130),
        "violet" => rgb(238, 130, 238),
        "coral" => rgb(255, 127, 80),
        "crimson" => rgb(220, 20, 60),
        "tomato" => rgb(255, 99, 71),
        "salmon" => rgb(250, 128, 114),
        "khaki" => rgb(240, 230, 140),
        "beige" => rgb(245, 245, 220),
        "ivory" => rgb(255, 255, 240),
        "lavender" => rgb(230, 230, 250),
        "turquoise" => rgb(64, 224, 208),
        "tan" => rgb(210, 180, 140),
        "darkgray" | "darkgrey" => rgb(169, 169, 169),
        "dimgray" | "dimgrey" => rgb(105, 105, 105),
        "lightgray" | "lightgrey" => rgb(211, 211, 211),
        "gainsboro" => rgb(220, 220, 220),
        "whitesmoke" => rgb(245, 245, 245),
        "slategray" | "slategrey" => rgb(112, 128, 144),
        "darkslategray" | "darkslategrey" => rgb(47, 79, 79),
        "darkblue" => rgb(0, 0, 139),
        "darkgreen" => rgb(0, 100, 0),
        "darkred" => rgb(139, 0, 0),
        "steelblue" => rgb(70, 130, 180),
        "royalblue" => rgb(65, 105, 225),
        "dodgerblue" => rgb(30, 144, 255),
        "skyblue" => rgb(135, 206, 235),
        "lightblue" => rgb(173, 216, 230),
        "midnightblue" => rgb(25, 25, 112),
        "seagreen" => rgb(46, 139, 87),
        "forestgreen" => rgb(34, 139, 34),
        "rebeccapurple" => rgb(102, 51, 153),
        _ => None,
    }
}
