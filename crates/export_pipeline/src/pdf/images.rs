//! Image XObjects
//!
//! The captured bitmap is embedded as one DeviceRGB image. PDF 1.4 viewers
//! handle soft masks unevenly, so alpha is composited onto the page
//! background before embedding.

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use crate::color::Rgba;
use crate::raster::Bitmap;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{self, Write};

/// Raw or Flate-encoded 8-bit RGB samples
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub compressed: bool,
}

impl ImageData {
    /// Flatten `bitmap` onto `background` and keep the RGB samples
    pub fn from_bitmap(bitmap: &Bitmap, background: Rgba) -> Self {
        let (width, height) = bitmap.dimensions();
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in bitmap.pixels() {
            let [r, g, b, a] = pixel.0;
            data.push(over(r, background.r, a));
            data.push(over(g, background.g, a));
            data.push(over(b, background.b, a));
        }
        Self {
            width,
            height,
            data,
            compressed: false,
        }
    }

    pub fn compress(&mut self) -> io::Result<()> {
        if self.compressed {
            return Ok(());
        }
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.data)?;
        self.data = encoder.finish()?;
        self.compressed = true;
        Ok(())
    }

    pub fn to_xobject(&self) -> PdfStream {
        let mut dict = PdfDictionary::of_type("XObject")
            .with("Subtype", PdfObject::name("Image"))
            .with("Width", PdfObject::Integer(i64::from(self.width)))
            .with("Height", PdfObject::Integer(i64::from(self.height)))
            .with("ColorSpace", PdfObject::name("DeviceRGB"))
            .with("BitsPerComponent", PdfObject::Integer(8));
        if self.compressed {
            dict.insert("Filter", PdfObject::name("FlateDecode"));
        }
        let mut stream = PdfStream::new(dict, self.data.clone());
        // Already in final form; the writer must not filter it again.
        stream.filtered = true;
        stream
    }
}

fn over(channel: u8, background: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    ((u32::from(channel) * a + u32::from(background) * (255 - a) + 127) / 255) as u8
}
