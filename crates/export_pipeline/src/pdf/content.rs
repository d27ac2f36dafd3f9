//! Page content streams
//!
//! Only the operators an image page needs: graphics state, the current
//! transformation matrix, rectangle clipping and XObject painting.

use super::objects::format_real;

#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// q
    pub fn save_state(&mut self) -> &mut Self {
        self.write_line("q")
    }

    /// Q
    pub fn restore_state(&mut self) -> &mut Self {
        self.write_line("Q")
    }

    /// cm
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        let operands = [a, b, c, d, e, f].map(format_real).join(" ");
        self.write_line(&format!("{} cm", operands))
    }

    /// Clip to a rectangle: `re W n`
    pub fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.write_line(&format!(
            "{} {} {} {} re W n",
            format_real(x),
            format_real(y),
            format_real(width),
            format_real(height)
        ))
    }

    /// Do
    pub fn draw_xobject(&mut self, name: &str) -> &mut Self {
        self.write_line(&format!("/{} Do", name))
    }

    /// Paint an image XObject into the given box.
    ///
    /// Image space is the unit square, so the matrix scales it to
    /// `width` x `height` and moves its lower-left corner to (`x`, `y`).
    pub fn draw_image(&mut self, name: &str, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.save_state()
            .transform(width, 0.0, 0.0, height, x, y)
            .draw_xobject(name)
            .restore_state()
    }

    fn write_line(&mut self, line: &str) -> &mut Self {
        self.data.extend_from_slice(line.as_bytes());
        self.data.push(b'\n');
        self
    }
}
