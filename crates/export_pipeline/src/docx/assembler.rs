//! Resume-to-DOCX assembly
//!
//! Walks the resume data directly; the preview DOM is never consulted.
//! Sections without content produce no heading.

use super::error::DocxResult;
use super::model::{Alignment, DocxDocument, DocxTheme, Paragraph, Run, RIGHT_TAB_TWIPS};
use super::numbering_writer::BULLET_NUM_ID;
use super::styles_writer::SECTION_HEADING_STYLE;
use super::writer::docx_to_bytes;
use crate::color::parse_css_color;
use crate::filename::{export_file_name, Clock};
use crate::format::ExportFormat;
use crate::sink::ExportedFile;
use resume_model::{non_empty, RenderStyle, ResumeData, Section};

/// Separator between contact fields in the header
pub const CONTACT_SEPARATOR: &str = " | ";

/// Builds DOCX documents from resume data
#[derive(Debug, Clone)]
pub struct DocxAssembler {
    fallback_file_stem: String,
}

impl Default for DocxAssembler {
    fn default() -> Self {
        Self::new("Resume")
    }
}

impl DocxAssembler {
    pub fn new(fallback_file_stem: impl Into<String>) -> Self {
        Self {
            fallback_file_stem: fallback_file_stem.into(),
        }
    }

    /// Lay the resume out as paragraphs
    pub fn build(&self, resume: &ResumeData) -> DocxDocument {
        let mut builder = Builder {
            doc: DocxDocument {
                theme: theme_for(&resume.style),
                title: Some(match resume.full_name() {
                    Some(name) => format!("{} - Resume", name),
                    None => "Resume".to_string(),
                }),
                author: resume.full_name().map(str::to_string),
                paragraphs: Vec::new(),
            },
        };

        builder.header(resume);
        for section in resume.populated_sections() {
            builder.heading(section.title());
            match section {
                Section::Summary => builder.summary(resume),
                Section::Experience => builder.experience(resume),
                Section::Education => builder.education(resume),
                Section::Skills => builder.skills(resume),
                Section::Projects => builder.projects(resume),
                Section::Certifications => builder.certifications(resume),
                Section::Languages => builder.languages(resume),
                Section::Community => builder.community(resume),
                Section::References => builder.references(resume),
            }
        }

        tracing::debug!(
            paragraphs = builder.doc.paragraphs.len(),
            "DOCX document laid out"
        );
        builder.doc
    }

    /// Build and package the resume, named for download
    pub fn export(&self, resume: &ResumeData, clock: &Clock) -> DocxResult<ExportedFile> {
        let doc = self.build(resume);
        let bytes = docx_to_bytes(&doc, clock.now_utc())?;
        let file_name = export_file_name(
            resume.full_name(),
            &self.fallback_file_stem,
            clock.today(),
            ExportFormat::Docx.extension(),
        );
        Ok(ExportedFile::new(file_name, ExportFormat::Docx, bytes))
    }
}

/// Map the preview's render style onto document formatting
pub fn theme_for(style: &RenderStyle) -> DocxTheme {
    let defaults = DocxTheme::default();
    let accent_color = parse_css_color(&style.accent_color)
        .map(|rgba| rgba.to_hex().to_ascii_uppercase())
        .unwrap_or_else(|| {
            tracing::warn!(
                "Unparseable accent color {:?}, using {}",
                style.accent_color,
                defaults.accent_color
            );
            defaults.accent_color.clone()
        });
    let font_family = style
        .font_family
        .split(',')
        .map(|family| family.trim().trim_matches(['"', '\'']).trim())
        .find(|family| !family.is_empty())
        .map(str::to_string)
        .unwrap_or(defaults.font_family);

    DocxTheme {
        accent_color,
        font_family,
        body_size: (style.font_size.body_points() * 2.0).round() as u32,
        paragraph_after: (style.spacing.paragraph_after_points() * 20.0).round() as u32,
    }
}

struct Builder {
    doc: DocxDocument,
}

impl Builder {
    fn body_size(&self) -> u32 {
        self.doc.theme.body_size
    }

    fn header(&mut self, resume: &ResumeData) {
        let info = &resume.personal_info;
        if let Some(name) = resume.full_name() {
            let size = self.body_size() + 14;
            self.doc.push(
                Paragraph::new()
                    .align(Alignment::Center)
                    .space_after(40)
                    .run(Run::text(name).bold().size(size)),
            );
        }
        if let Some(title) = non_empty(&info.title) {
            let size = self.body_size() + 4;
            let accent = self.doc.theme.accent_color.clone();
            self.doc.push(
                Paragraph::new()
                    .align(Alignment::Center)
                    .space_after(40)
                    .run(Run::text(title).size(size).color(&accent)),
            );
        }
        let contacts = info.contact_fields();
        if !contacts.is_empty() {
            self.doc.push(
                Paragraph::new()
                    .align(Alignment::Center)
                    .run(Run::text(contacts.join(CONTACT_SEPARATOR))),
            );
        }
    }

    fn heading(&mut self, title: &str) {
        self.doc
            .push(Paragraph::new().style(SECTION_HEADING_STYLE).run(Run::text(title)));
    }

    fn text(&mut self, text: &str) {
        self.doc.push(Paragraph::new().run(Run::text(text)));
    }

    fn bullets(&mut self, lines: &[String]) {
        for line in lines.iter().filter_map(|line| non_empty(line)) {
            self.doc.push(
                Paragraph::new()
                    .bullet(BULLET_NUM_ID)
                    .space_after(0)
                    .run(Run::text(line)),
            );
        }
    }

    /// Bold line with an optional right-aligned trailer
    fn title_line(&mut self, title: &str, trailer: Option<&str>) {
        let mut paragraph = Paragraph::new()
            .space_before(120)
            .space_after(0)
            .run(Run::text(title).bold());
        if let Some(trailer) = trailer {
            paragraph = paragraph
                .right_tab(RIGHT_TAB_TWIPS)
                .run(Run::tab())
                .run(Run::text(trailer));
        }
        self.doc.push(paragraph);
    }

    /// Italic line with the date range on the right tab stop
    fn role_line(&mut self, role: Option<&str>, dates: Option<&str>) {
        if role.is_none() && dates.is_none() {
            return;
        }
        let mut paragraph = Paragraph::new().space_after(40).right_tab(RIGHT_TAB_TWIPS);
        if let Some(role) = role {
            paragraph = paragraph.run(Run::text(role).italic());
        }
        if let Some(dates) = dates {
            paragraph = paragraph.run(Run::tab()).run(Run::text(dates));
        }
        self.doc.push(paragraph);
    }

    fn summary(&mut self, resume: &ResumeData) {
        if let Some(summary) = resume.summary() {
            self.text(summary);
        }
    }

    fn experience(&mut self, resume: &ResumeData) {
        for job in &resume.work_experience {
            if let Some(company) = non_empty(&job.company) {
                self.title_line(company, non_empty(&job.location));
            }
            self.role_line(non_empty(&job.position), job.date_range().as_deref());
            self.bullets(&job.description);
        }
    }

    fn education(&mut self, resume: &ResumeData) {
        for entry in &resume.education {
            if let Some(institution) = non_empty(&entry.institution) {
                self.title_line(institution, non_empty(&entry.location));
            }
            self.role_line(entry.degree_line().as_deref(), entry.date_range().as_deref());
            if let Some(gpa) = non_empty(&entry.gpa) {
                self.text(&format!("GPA: {}", gpa));
            }
            self.bullets(&entry.description);
        }
    }

    fn skills(&mut self, resume: &ResumeData) {
        let skills: Vec<String> = resume
            .skills
            .iter()
            .filter_map(|skill| {
                let name = non_empty(&skill.name)?;
                Some(match skill.level.as_deref().and_then(non_empty) {
                    Some(level) => format!("{} ({})", name, level),
                    None => name.to_string(),
                })
            })
            .collect();
        self.text(&skills.join(", "));
    }

    fn projects(&mut self, resume: &ResumeData) {
        for project in &resume.projects {
            let dates = project.date_range();
            if let Some(name) = non_empty(&project.name) {
                self.title_line(name, dates.as_deref());
            }
            let technologies: Vec<&str> = project
                .technologies
                .iter()
                .filter_map(|t| non_empty(t))
                .collect();
            if !technologies.is_empty() {
                self.doc.push(
                    Paragraph::new()
                        .space_after(40)
                        .run(Run::text(technologies.join(", ")).italic()),
                );
            }
            if let Some(link) = non_empty(&project.link) {
                self.text(link);
            }
            self.bullets(&project.description);
        }
    }

    fn certifications(&mut self, resume: &ResumeData) {
        for cert in &resume.certifications {
            let line = cert.display_line();
            if !line.is_empty() {
                self.doc
                    .push(Paragraph::new().space_after(40).run(Run::text(line)));
            }
        }
    }

    fn languages(&mut self, resume: &ResumeData) {
        for language in &resume.languages {
            let Some(name) = non_empty(&language.language) else {
                continue;
            };
            let mut paragraph = Paragraph::new().space_after(40).run(Run::text(name).bold());
            if let Some(proficiency) = non_empty(&language.proficiency) {
                paragraph = paragraph.run(Run::text(format!(" - {}", proficiency)));
            }
            self.doc.push(paragraph);
        }
    }

    fn community(&mut self, resume: &ResumeData) {
        for entry in &resume.community {
            if let Some(organization) = non_empty(&entry.organization) {
                self.title_line(organization, None);
            }
            self.role_line(non_empty(&entry.role), entry.date_range().as_deref());
            self.bullets(&entry.description);
        }
    }

    fn references(&mut self, resume: &ResumeData) {
        for reference in &resume.references {
            if let Some(name) = non_empty(&reference.name) {
                self.title_line(name, None);
            }
            let role: Vec<&str> = [&reference.position, &reference.company]
                .into_iter()
                .filter_map(|field| non_empty(field))
                .collect();
            if !role.is_empty() {
                self.role_line(Some(&role.join(", ")), None);
            }
            let contact: Vec<&str> = [&reference.email, &reference.phone]
                .into_iter()
                .filter_map(|field| non_empty(field))
                .collect();
            if !contact.is_empty() {
                self.text(&contact.join(CONTACT_SEPARATOR));
            }
            if let Some(relationship) = non_empty(&reference.relationship) {
                self.text(relationship);
            }
        }
    }
}
