//! PDF file writer
//!
//! [`PdfWriter`] handles file structure: header, numbered objects, the
//! cross-reference table and trailer. [`ImagePdfWriter`] lays a paginated
//! bitmap out as a complete document on top of it.

use super::content::ContentStream;
use super::document::{create_catalog, create_pages, DocumentInfo, MediaBox, PdfPage, PdfVersion};
use super::images::ImageData;
use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use super::options::PdfExportOptions;
use crate::color::Rgba;
use crate::paginate::PageLayout;
use crate::raster::Bitmap;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use preview_dom::mm_to_pt;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, PdfError>;

/// Resource name of the page image
const IMAGE_NAME: &str = "Im1";

/// Low-level writer tracking byte offsets for the xref table
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    /// Byte offset per object number; index 0 is the free head
    offsets: Vec<Option<u64>>,
    version: PdfVersion,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W, version: PdfVersion) -> Self {
        Self {
            writer,
            position: 0,
            offsets: vec![None],
            version,
            compress: true,
        }
    }

    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    pub fn allocate_object(&mut self) -> u32 {
        self.offsets.push(None);
        (self.offsets.len() - 1) as u32
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{}\n", self.version.as_str()))?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    fn begin_object(&mut self, obj_num: u32) -> Result<()> {
        let slot = self
            .offsets
            .get_mut(obj_num as usize)
            .ok_or_else(|| PdfError::InvalidDocument(format!("object {} not allocated", obj_num)))?;
        if slot.is_some() {
            return Err(PdfError::InvalidDocument(format!(
                "object {} written twice",
                obj_num
            )));
        }
        *slot = Some(self.position);
        self.write_str(&format!("{} 0 obj\n", obj_num))
    }

    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> Result<()> {
        self.begin_object(obj_num)?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(object)?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\nendobj\n")
    }

    /// Write a stream, Flate-compressing it unless it is already filtered
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.filtered {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&stream.data)?;
            stream.data = encoder.finish()?;
            stream.filtered = true;
            stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
        }
        stream
            .dict
            .insert("Length", PdfObject::Integer(stream.data.len() as i64));

        self.begin_object(obj_num)?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_stream(&stream)?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\nendobj\n")
    }

    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        if let Some(missing) = self.offsets.iter().skip(1).position(Option::is_none) {
            return Err(PdfError::InvalidDocument(format!(
                "object {} allocated but never written",
                missing + 1
            )));
        }

        let xref_offset = self.position;
        let size = self.offsets.len();
        let mut table = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for offset in self.offsets.iter().skip(1).flatten() {
            table.push_str(&format!("{:010} 00000 n \n", offset));
        }
        self.write_str(&table)?;

        let mut trailer = PdfDictionary::new()
            .with("Size", PdfObject::Integer(size as i64))
            .with("Root", PdfObject::Reference(catalog_ref));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::Reference(info));
        }
        self.write_str("trailer\n")?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_dictionary(&trailer)?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str(&format!("\nstartxref\n{}\n%%EOF\n", xref_offset))
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Writes a paginated bitmap as a complete PDF.
///
/// The image is embedded once and every page draws it, shifted up by that
/// page's placement offset and cropped by the media box.
pub struct ImagePdfWriter {
    options: PdfExportOptions,
    background: Rgba,
}

impl ImagePdfWriter {
    pub fn new(options: PdfExportOptions) -> Self {
        Self {
            options,
            background: Rgba::WHITE,
        }
    }

    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    pub fn write<W: Write>(
        &self,
        bitmap: &Bitmap,
        layout: &PageLayout,
        info: &DocumentInfo,
        out: W,
    ) -> Result<W> {
        if layout.placements.is_empty() {
            return Err(PdfError::InvalidDocument("No pages to export".to_string()));
        }

        let mut pdf = PdfWriter::new(out, self.options.pdf_version.into());
        pdf.set_compression(self.options.compress);
        pdf.write_header()?;

        let catalog_ref = pdf.allocate_object();
        let pages_ref = pdf.allocate_object();
        let info_ref = pdf.allocate_object();
        let image_ref = pdf.allocate_object();
        let page_refs: Vec<(u32, u32)> = layout
            .placements
            .iter()
            .map(|_| (pdf.allocate_object(), pdf.allocate_object()))
            .collect();

        pdf.write_object(catalog_ref, &create_catalog(pages_ref).into())?;
        let kids: Vec<u32> = page_refs.iter().map(|(page, _)| *page).collect();
        pdf.write_object(pages_ref, &create_pages(&kids).into())?;
        pdf.write_object(info_ref, &info.to_dictionary().into())?;

        let mut image = ImageData::from_bitmap(bitmap, self.background);
        if self.options.compress {
            image.compress()?;
        }
        pdf.write_stream_object(image_ref, image.to_xobject())?;

        let media_box = MediaBox::for_page(layout.page);
        let image_width = mm_to_pt(layout.image_width_mm);
        let image_height = mm_to_pt(layout.image_height_mm);
        for (placement, (page_ref, content_ref)) in layout.placements.iter().zip(&page_refs) {
            // PDF space grows upward from the bottom edge
            let y = media_box.height - mm_to_pt(placement.offset_y_mm) - image_height;
            let mut content = ContentStream::new();
            content
                .save_state()
                .clip_rect(0.0, 0.0, media_box.width, media_box.height)
                .draw_image(IMAGE_NAME, 0.0, y, image_width, image_height)
                .restore_state();

            let mut page = PdfPage::new(media_box, *content_ref);
            page.add_image(IMAGE_NAME, image_ref);
            pdf.write_object(*page_ref, &page.to_dictionary(pages_ref).into())?;
            pdf.write_stream_object(
                *content_ref,
                PdfStream::new(PdfDictionary::new(), content.into_bytes()),
            )?;
        }

        pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
        pdf.finish()
    }

    /// Convenience wrapper returning the file bytes
    pub fn to_bytes(&self, bitmap: &Bitmap, layout: &PageLayout, info: &DocumentInfo) -> Result<Vec<u8>> {
        self.write(bitmap, layout, info, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageSize;
    use crate::paginate::paginate;

    fn uncompressed() -> ImagePdfWriter {
        ImagePdfWriter::new(PdfExportOptions {
            compress: false,
            ..Default::default()
        })
    }

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn test_low_level_structure() {
        let mut pdf = PdfWriter::new(Vec::new(), PdfVersion::V1_4);
        pdf.write_header().unwrap();
        let catalog = pdf.allocate_object();
        let pages = pdf.allocate_object();
        pdf.write_object(catalog, &create_catalog(pages).into()).unwrap();
        pdf.write_object(pages, &create_pages(&[]).into()).unwrap();
        pdf.write_xref_and_trailer(catalog, None).unwrap();
        let out = text(&pdf.finish().unwrap());

        assert!(out.starts_with("%PDF-1.4\n"));
        assert!(out.contains("xref\n0 3\n0000000000 65535 f \n"));
        assert!(out.contains("/Root 1 0 R"));
        assert!(out.ends_with("%%EOF\n"));

        let start: usize = out
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .unwrap()
            .parse()
            .unwrap();
        assert!(out.as_bytes()[start..].starts_with(b"xref"));
    }

    #[test]
    fn test_unwritten_object_rejected() {
        let mut pdf = PdfWriter::new(Vec::new(), PdfVersion::V1_4);
        let catalog = pdf.allocate_object();
        pdf.allocate_object();
        pdf.write_object(catalog, &PdfObject::Null).unwrap();
        assert!(matches!(
            pdf.write_xref_and_trailer(catalog, None),
            Err(PdfError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_double_write_rejected() {
        let mut pdf = PdfWriter::new(Vec::new(), PdfVersion::V1_4);
        let obj = pdf.allocate_object();
        pdf.write_object(obj, &PdfObject::Null).unwrap();
        assert!(pdf.write_object(obj, &PdfObject::Null).is_err());
    }

    #[test]
    fn test_three_page_document() {
        let bitmap = Bitmap::new(210, 891);
        let layout = paginate(210, 891, PageSize::A4).unwrap();
        let out = text(
            &uncompressed()
                .to_bytes(&bitmap, &layout, &DocumentInfo::default())
                .unwrap(),
        );

        assert_eq!(out.matches("/Type /Page ").count(), 3);
        assert!(out.contains("/Count 3"));
        // The image is embedded exactly once
        assert_eq!(out.matches("/Subtype /Image").count(), 1);
        assert_eq!(out.matches("/Im1 Do").count(), 3);
        // 891mm is 2525.6693pt; page 1 sits flush with the top edge
        assert!(out.contains("595.2756 0 0 2525.6693 0 -1683.7795 cm"));
        assert!(out.contains("595.2756 0 0 2525.6693 0 -841.8898 cm"));
        assert!(out.contains("595.2756 0 0 2525.6693 0 0 cm"));
    }

    #[test]
    fn test_compressed_content_is_filtered() {
        let bitmap = Bitmap::new(210, 100);
        let layout = paginate(210, 100, PageSize::A4).unwrap();
        let out = ImagePdfWriter::new(PdfExportOptions::default())
            .to_bytes(&bitmap, &layout, &DocumentInfo::default())
            .unwrap();
        let out = text(&out);
        assert_eq!(out.matches("/Filter /FlateDecode").count(), 2);
        assert!(!out.contains("/Im1 Do"));
    }

    #[test]
    fn test_empty_layout_rejected() {
        let mut layout = paginate(10, 10, PageSize::A4).unwrap();
        layout.placements.clear();
        let err = uncompressed()
            .to_bytes(&Bitmap::new(10, 10), &layout, &DocumentInfo::default())
            .unwrap_err();
        assert!(matches!(err, PdfError::InvalidDocument(_)));
    }
}
