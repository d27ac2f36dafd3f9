//! PDF document structure
//!
//! Catalog, page tree, page objects and the Info dictionary.

use super::objects::{PdfDictionary, PdfObject};
use super::options::PdfExportOptions;
use crate::config::PageSize;
use chrono::NaiveDateTime;
use resume_model::ResumeData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfVersion {
    #[default]
    V1_4,
    V1_7,
}

impl PdfVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfVersion::V1_4 => "1.4",
            PdfVersion::V1_7 => "1.7",
        }
    }
}

/// Info dictionary contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
}

impl DocumentInfo {
    /// Metadata for an exported resume.
    ///
    /// The title is "<name> - Resume", or just "Resume" when the name is
    /// blank.
    pub fn for_resume(
        resume: &ResumeData,
        options: &PdfExportOptions,
        created: NaiveDateTime,
    ) -> Self {
        let title = match resume.full_name() {
            Some(name) => format!("{} - Resume", name),
            None => "Resume".to_string(),
        };
        Self {
            title: Some(title),
            author: resume.full_name().map(str::to_string),
            subject: Some(options.subject.clone()),
            creator: Some(options.creator.clone()),
            producer: Some(options.producer.clone()),
            creation_date: Some(created),
        }
    }

    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        let text_fields = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value {
                dict.insert(key, PdfObject::text(value));
            }
        }
        if let Some(date) = self.creation_date {
            dict.insert("CreationDate", PdfObject::text(&pdf_date(date)));
        }
        dict
    }
}

/// PDF date string, `D:YYYYMMDDHHmmSS`
pub fn pdf_date(date: NaiveDateTime) -> String {
    date.format("D:%Y%m%d%H%M%S").to_string()
}

/// Page box in points, origin at the lower left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaBox {
    pub width: f64,
    pub height: f64,
}

impl MediaBox {
    pub fn for_page(page: PageSize) -> Self {
        Self {
            width: page.width_pt(),
            height: page.height_pt(),
        }
    }

    pub fn to_array(&self) -> PdfObject {
        PdfObject::real_array(&[0.0, 0.0, self.width, self.height])
    }
}

/// One page: a content stream drawing named image XObjects
#[derive(Debug, Clone)]
pub struct PdfPage {
    pub media_box: MediaBox,
    pub content_ref: u32,
    images: Vec<(String, u32)>,
}

impl PdfPage {
    pub fn new(media_box: MediaBox, content_ref: u32) -> Self {
        Self {
            media_box,
            content_ref,
            images: Vec::new(),
        }
    }

    pub fn add_image(&mut self, name: impl Into<String>, obj_ref: u32) {
        self.images.push((name.into(), obj_ref));
    }

    pub fn to_dictionary(&self, parent_ref: u32) -> PdfDictionary {
        let mut xobjects = PdfDictionary::new();
        for (name, obj_ref) in &self.images {
            xobjects.insert(name.as_str(), PdfObject::Reference(*obj_ref));
        }
        let resources = PdfDictionary::new()
            .with("XObject", xobjects)
            .with(
                "ProcSet",
                PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("ImageC")]),
            );

        PdfDictionary::of_type("Page")
            .with("Parent", PdfObject::Reference(parent_ref))
            .with("MediaBox", self.media_box.to_array())
            .with("Resources", resources)
            .with("Contents", PdfObject::Reference(self.content_ref))
    }
}

pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    PdfDictionary::of_type("Catalog").with("Pages", PdfObject::Reference(pages_ref))
}

pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    PdfDictionary::of_type("Pages")
        .with(
            "Kids",
            PdfObject::Array(page_refs.iter().map(|r| PdfObject::Reference(*r)).collect()),
        )
        .with("Count", PdfObject::Integer(page_refs.len() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn created() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_pdf_date() {
        assert_eq!(pdf_date(created()), "D:20240115093005");
    }

    #[test]
    fn test_info_for_named_resume() {
        let mut resume = ResumeData::default();
        resume.personal_info.full_name = "Alex Lee".to_string();
        let info = DocumentInfo::for_resume(&resume, &PdfExportOptions::default(), created());
        assert_eq!(info.title.as_deref(), Some("Alex Lee - Resume"));
        assert_eq!(info.author.as_deref(), Some("Alex Lee"));

        let dict = info.to_dictionary();
        assert_eq!(dict.get("Title"), Some(&PdfObject::text("Alex Lee - Resume")));
        assert_eq!(
            dict.get("CreationDate"),
            Some(&PdfObject::text("D:20240115093005"))
        );
    }

    #[test]
    fn test_info_for_anonymous_resume() {
        let info = DocumentInfo::for_resume(
            &ResumeData::default(),
            &PdfExportOptions::default(),
            created(),
        );
        assert_eq!(info.title.as_deref(), Some("Resume"));
        assert!(info.author.is_none());
        assert!(info.to_dictionary().get("Author").is_none());
    }

    #[test]
    fn test_page_dictionary() {
        let mut page = PdfPage::new(MediaBox::for_page(PageSize::A4), 7);
        page.add_image("Im1", 3);
        let dict = page.to_dictionary(2);
        assert_eq!(dict.get("Parent"), Some(&PdfObject::Reference(2)));
        assert_eq!(dict.get("Contents"), Some(&PdfObject::Reference(7)));
        let Some(PdfObject::Dictionary(resources)) = dict.get("Resources") else {
            panic!("missing resources");
        };
        let Some(PdfObject::Dictionary(xobjects)) = resources.get("XObject") else {
            panic!("missing xobjects");
        };
        assert_eq!(xobjects.get("Im1"), Some(&PdfObject::Reference(3)));
    }

    #[test]
    fn test_create_pages() {
        let pages = create_pages(&[4, 6]);
        assert_eq!(pages.get("Count"), Some(&PdfObject::Integer(2)));
        assert_eq!(create_catalog(2).get("Pages"), Some(&PdfObject::Reference(2)));
    }
}
