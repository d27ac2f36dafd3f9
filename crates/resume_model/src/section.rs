//! Resume sections in display order

use crate::resume::ResumeData;
use serde::{Deserialize, Serialize};

/// A titled resume section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Community,
    References,
}

impl Section {
    /// All sections in the order exports render them
    pub const ALL: [Section; 9] = [
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Certifications,
        Section::Languages,
        Section::Community,
        Section::References,
    ];

    /// Heading text
    pub fn title(self) -> &'static str {
        match self {
            Section::Summary => "Summary",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Certifications => "Certifications",
            Section::Languages => "Languages",
            Section::Community => "Community & Leadership",
            Section::References => "References",
        }
    }

    /// Whether the resume has content for this section
    pub fn has_content(self, resume: &ResumeData) -> bool {
        match self {
            Section::Summary => resume.summary().is_some(),
            Section::Experience => !resume.work_experience.is_empty(),
            Section::Education => !resume.education.is_empty(),
            Section::Skills => resume.skills.iter().any(|s| !s.name.trim().is_empty()),
            Section::Projects => !resume.projects.is_empty(),
            Section::Certifications => !resume.certifications.is_empty(),
            Section::Languages => !resume.languages.is_empty(),
            Section::Community => !resume.community.is_empty(),
            Section::References => !resume.references.is_empty(),
        }
    }
}

impl ResumeData {
    /// Sections with content, in display order
    pub fn populated_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| section.has_content(self))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Certification, Skill};

    #[test]
    fn test_empty_resume_has_no_sections() {
        assert!(ResumeData::default().populated_sections().is_empty());
    }

    #[test]
    fn test_populated_sections_order() {
        let mut resume = ResumeData::default();
        resume.certifications.push(Certification::default());
        resume.skills.push(Skill::new("Rust"));
        resume.personal_info.summary = "Builder of things".to_string();

        assert_eq!(
            resume.populated_sections(),
            vec![Section::Summary, Section::Skills, Section::Certifications]
        );
    }

    #[test]
    fn test_blank_skills_do_not_count() {
        let mut resume = ResumeData::default();
        resume.skills.push(Skill::new("  "));
        assert!(!Section::Skills.has_content(&resume));
    }
}
