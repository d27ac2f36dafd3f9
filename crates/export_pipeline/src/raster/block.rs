//! Built-in software rasterizer
//!
//! Lays the subtree out as stacked blocks and paints solid fills into a
//! `tiny_skia` pixmap: element backgrounds, border sides and text lines
//! drawn as bars one glyph-height tall. Like a DOM capture library it only
//! reads legacy color syntax, so an un-normalized `oklch()` in a painted
//! property is an error.

use super::{Bitmap, RasterError, RasterOptions, Rasterizer, Result};
use crate::color::{contains_unsupported_color, parse_css_color, Rgba};
use preview_dom::{parse_box_shorthand, parse_length_px, Document, NodeId, NodeKind};
use tiny_skia::{Paint, Pixmap, Rect as SkiaRect, Transform};

const LINE_HEIGHT_FACTOR: f64 = 1.4;
const GLYPH_WIDTH_FACTOR: f64 = 0.5;
const GLYPH_HEIGHT_FACTOR: f64 = 0.6;
const DEFAULT_FONT_SIZE_PX: f64 = 16.0;
const MAX_BITMAP_PIXELS: u64 = 16_384 * 16_384;
/// Layout recurses per element level
const MAX_NESTING_DEPTH: usize = 256;

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Headless block-flow rasterizer
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRasterizer;

impl Rasterizer for BlockRasterizer {
    async fn rasterize(
        &self,
        document: &Document,
        root: NodeId,
        options: &RasterOptions,
    ) -> Result<Bitmap> {
        document.element(root)?;

        let mut layout = Layout::new(document);
        let width = f64::from(options.width_px);
        let height = layout.block(root, 0.0, 0.0, width, 0)?;

        if options.logging {
            tracing::trace!(fills = layout.fills.len(), height, "Block layout complete");
        }
        paint(&layout.fills, height, options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Clone, Copy)]
struct Fill {
    rect: Rect,
    color: Rgba,
}

struct Layout<'a> {
    document: &'a Document,
    fills: Vec<Fill>,
}

impl<'a> Layout<'a> {
    fn new(document: &'a Document) -> Self {
        Self {
            document,
            fills: Vec::new(),
        }
    }

    /// Lay out an element at (x, y); returns its margin-box height
    fn block(&mut self, node: NodeId, x: f64, y: f64, available: f64, depth: usize) -> Result<f64> {
        if depth > MAX_NESTING_DEPTH {
            return Err(RasterError::TooDeep { limit: MAX_NESTING_DEPTH });
        }
        if self.style(node, "display").as_deref() == Some("none") {
            return Ok(0.0);
        }

        let is_root = depth == 0;
        let margin = if is_root { [0.0; 4] } else { self.box_sides(node, "margin") };
        let padding = self.box_sides(node, "padding");
        let border = self.border_widths(node);
        let border_box = self.style(node, "box-sizing").as_deref() == Some("border-box");
        let frame_x = padding[1] + padding[3] + border[1] + border[3];
        let frame_y = padding[0] + padding[2] + border[0] + border[2];

        let content_width = if is_root {
            available - frame_x
        } else {
            match self.length(node, "width") {
                Some(width) if border_box => width - frame_x,
                Some(width) => width,
                None => available - margin[1] - margin[3] - frame_x,
            }
        }
        .max(0.0);

        let content_x = x + margin[3] + border[3] + padding[3];
        let content_y = y + margin[0] + border[0] + padding[0];

        let document = self.document;
        let paint_index = self.fills.len();
        let mut cursor = content_y;
        for &child in document.children(node) {
            cursor += match document.kind(child)? {
                NodeKind::Element(_) => self.block(child, content_x, cursor, content_width, depth + 1)?,
                NodeKind::Text(text) => self.text(child, text, content_x, cursor, content_width)?,
            };
        }

        let mut content_height = cursor - content_y;
        if let Some(height) = self.length(node, "height") {
            content_height = if border_box { height - frame_y } else { height };
        }
        if let Some(min_height) = self.length(node, "min-height") {
            let min_content = if border_box { min_height - frame_y } else { min_height };
            content_height = content_height.max(min_content);
        }
        let content_height = content_height.max(0.0);

        let outer = Rect {
            x: x + margin[3],
            y: y + margin[0],
            width: content_width + frame_x,
            height: content_height + frame_y,
        };
        let decorations = self.decorations(node, outer, border)?;
        self.fills.splice(paint_index..paint_index, decorations);

        Ok(margin[0] + outer.height + margin[2])
    }

    /// Background then border fills for a box, painted beneath its content
    fn decorations(&self, node: NodeId, outer: Rect, border: [f64; 4]) -> Result<Vec<Fill>> {
        let mut fills = Vec::new();
        if let Some(color) = self.color(node, "background-color")? {
            fills.push(Fill { rect: outer, color });
        }

        let [top, right, bottom, left] = border;
        let edges = [
            (0, Rect { height: top, ..outer }),
            (1, Rect { x: outer.x + outer.width - right, width: right, ..outer }),
            (2, Rect { y: outer.y + outer.height - bottom, height: bottom, ..outer }),
            (3, Rect { width: left, ..outer }),
        ];
        for (side, rect) in edges {
            if rect.width <= 0.0 || rect.height <= 0.0 {
                continue;
            }
            let property = format!("border-{}-color", SIDES[side]);
            if let Some(color) = self.color(node, &property)? {
                fills.push(Fill { rect, color });
            }
        }
        Ok(fills)
    }

    /// Wrap a text node into lines; returns the height consumed
    fn text(&mut self, node: NodeId, text: &str, x: f64, y: f64, width: f64) -> Result<f64> {
        let words: Vec<usize> = text.split_whitespace().map(|w| w.chars().count()).collect();
        if words.is_empty() {
            return Ok(0.0);
        }

        let font_size = self.length(node, "font-size").unwrap_or(DEFAULT_FONT_SIZE_PX);
        let line_height = self.line_height(node, font_size);
        let glyph_width = font_size * GLYPH_WIDTH_FACTOR;
        let max_chars = ((width / glyph_width).floor() as usize).max(1);
        let lines = wrap(&words, max_chars);

        let visible = self.style(node, "visibility").as_deref() != Some("hidden");
        if visible {
            if let Some(color) = self.color(node, "color")? {
                let bar_height = font_size * GLYPH_HEIGHT_FACTOR;
                for (index, &chars) in lines.iter().enumerate() {
                    let top = y + index as f64 * line_height + (line_height - bar_height) / 2.0;
                    self.fills.push(Fill {
                        rect: Rect {
                            x,
                            y: top,
                            width: (chars as f64 * glyph_width).min(width),
                            height: bar_height,
                        },
                        color,
                    });
                }
            }
        }

        Ok(lines.len() as f64 * line_height)
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.document
            .computed_style(node, property)
            .map(|v| v.trim().to_ascii_lowercase())
    }

    fn length(&self, node: NodeId, property: &str) -> Option<f64> {
        self.style(node, property).as_deref().and_then(parse_length_px)
    }

    fn line_height(&self, node: NodeId, font_size: f64) -> f64 {
        let Some(value) = self.style(node, "line-height") else {
            return font_size * LINE_HEIGHT_FACTOR;
        };
        if let Some(px) = parse_length_px(&value) {
            return px;
        }
        if let Some(percent) = value.strip_suffix('%').and_then(|p| p.trim().parse::<f64>().ok()) {
            return font_size * percent / 100.0;
        }
        match value.parse::<f64>() {
            Ok(factor) => font_size * factor,
            Err(_) => font_size * LINE_HEIGHT_FACTOR,
        }
    }

    /// `margin`/`padding` shorthand overridden by per-side longhands
    fn box_sides(&self, node: NodeId, property: &str) -> [f64; 4] {
        let mut sides = self
            .style(node, property)
            .as_deref()
            .and_then(parse_box_shorthand)
            .unwrap_or([0.0; 4]);
        for (index, side) in SIDES.iter().enumerate() {
            if let Some(value) = self.length(node, &format!("{}-{}", property, side)) {
                sides[index] = value;
            }
        }
        sides
    }

    /// Border widths; sides whose style is `none` or `hidden` count as zero
    fn border_widths(&self, node: NodeId) -> [f64; 4] {
        let shorthand = self
            .style(node, "border-width")
            .as_deref()
            .and_then(parse_box_shorthand)
            .unwrap_or([0.0; 4]);
        let shared_style = self.style(node, "border-style");
        let mut out = [0.0; 4];
        for (index, side) in SIDES.iter().enumerate() {
            let width = self
                .length(node, &format!("border-{}-width", side))
                .unwrap_or(shorthand[index]);
            let style = self
                .style(node, &format!("border-{}-style", side))
                .or_else(|| shared_style.clone());
            let drawn = matches!(style.as_deref(), Some(s) if s != "none" && s != "hidden");
            if drawn {
                out[index] = width.max(0.0);
            }
        }
        out
    }

    /// Resolve a painted color, rejecting syntax a DOM capture cannot parse
    fn color(&self, node: NodeId, property: &str) -> Result<Option<Rgba>> {
        let Some(value) = self.document.computed_style(node, property) else {
            return Ok(None);
        };
        if contains_unsupported_color(&value) {
            return Err(RasterError::UnsupportedColor {
                property: property.to_string(),
                value,
            });
        }
        Ok(parse_css_color(&value).filter(|c| c.a > 0))
    }
}

/// Greedy word wrap over character counts; overlong words are split
fn wrap(words: &[usize], max_chars: usize) -> Vec<usize> {
    let mut lines = Vec::new();
    let mut current = 0usize;
    for &word in words {
        let mut word = word;
        if current > 0 && current + 1 + word <= max_chars {
            current += 1 + word;
            continue;
        }
        if current > 0 {
            lines.push(current);
        }
        while word > max_chars {
            lines.push(max_chars);
            word -= max_chars;
        }
        current = word;
    }
    if current > 0 {
        lines.push(current);
    }
    lines
}

fn paint(fills: &[Fill], height_css: f64, options: &RasterOptions) -> Result<Bitmap> {
    let scale = options.scale;
    let width = options.expected_width();
    // A page-height element must stay exactly one page tall
    let height = (height_css * scale).round().max(0.0) as u64;
    if width == 0 || height == 0 {
        return Err(RasterError::EmptyBitmap);
    }
    if u64::from(width) * height > MAX_BITMAP_PIXELS {
        return Err(RasterError::TooLarge { width, height });
    }
    let height = height as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| RasterError::Capture(format!("failed to allocate {}x{} pixmap", width, height)))?;
    let bg = options.background;
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));

    let mut paint = Paint::default();
    paint.anti_alias = false;
    for fill in fills {
        // Snap to device pixels so adjacent boxes never overlap or gap
        let x0 = (fill.rect.x * scale).round().max(0.0);
        let y0 = (fill.rect.y * scale).round().max(0.0);
        let x1 = ((fill.rect.x + fill.rect.width) * scale).round().min(f64::from(width));
        let y1 = ((fill.rect.y + fill.rect.height) * scale).round().min(f64::from(height));
        if x1 <= x0 || y1 <= y0 {
            continue;
        }
        let Some(rect) = SkiaRect::from_ltrb(x0 as f32, y0 as f32, x1 as f32, y1 as f32) else {
            continue;
        };
        let color = fill.color;
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let c = pixel.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Bitmap::from_raw(width, height, data)
        .ok_or_else(|| RasterError::Capture("pixmap size does not match the bitmap".to_string()))
}
