//! Resume content types

use crate::lines::deserialize_lines;
use crate::style::RenderStyle;
use crate::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// The complete resume handed to the export pipeline.
///
/// Every field defaults, so partially filled editor state deserializes.
/// The pipeline never mutates this value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    /// Name, headline, contact details and summary
    pub personal_info: PersonalInfo,
    /// Work history, most recent first
    pub work_experience: Vec<WorkExperience>,
    /// Schools and degrees
    pub education: Vec<Education>,
    /// Skills, either plain names or name + level
    pub skills: Vec<Skill>,
    /// Certifications and licences
    pub certifications: Vec<Certification>,
    /// Personal or professional projects
    pub projects: Vec<Project>,
    /// Spoken languages
    pub languages: Vec<Language>,
    /// Community and leadership entries
    #[serde(alias = "leadership")]
    pub community: Vec<CommunityEntry>,
    /// Professional references
    pub references: Vec<Reference>,
    /// Style choices applied to the preview
    pub style: RenderStyle,
}

impl ResumeData {
    /// Parse resume JSON as produced by the editor
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON used by the plain-text export
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The candidate's name, if one has been entered
    pub fn full_name(&self) -> Option<&str> {
        non_empty(&self.personal_info.full_name)
    }

    /// The professional summary, if one has been entered
    pub fn summary(&self) -> Option<&str> {
        non_empty(&self.personal_info.summary)
    }
}

/// Personal details shown in the resume header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(alias = "name")]
    pub full_name: String,
    /// Headline such as "Senior Engineer"
    pub title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub linkedin: String,
    pub location: String,
    pub summary: String,
}

impl PersonalInfo {
    /// Contact fields in display order, skipping anything blank
    pub fn contact_fields(&self) -> Vec<&str> {
        [
            &self.email,
            &self.phone,
            &self.website,
            &self.linkedin,
            &self.location,
        ]
        .into_iter()
        .filter_map(|field| non_empty(field))
        .collect()
    }
}

/// A position held at a company
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// Still working here; the end date is shown as "Present"
    pub current: bool,
    #[serde(deserialize_with = "deserialize_lines")]
    pub description: Vec<String>,
}

impl WorkExperience {
    pub fn date_range(&self) -> Option<String> {
        date_range(&self.start_date, &self.end_date, self.current)
    }
}

/// A degree or course of study
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(alias = "school")]
    pub institution: String,
    pub degree: String,
    /// Field of study, e.g. "Computer Science"
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub gpa: String,
    #[serde(deserialize_with = "deserialize_lines")]
    pub description: Vec<String>,
}

impl Education {
    pub fn date_range(&self) -> Option<String> {
        date_range(&self.start_date, &self.end_date, self.current)
    }

    /// Degree and field joined for display ("BSc in Physics")
    pub fn degree_line(&self) -> Option<String> {
        match (non_empty(&self.degree), non_empty(&self.field)) {
            (Some(degree), Some(field)) => Some(format!("{} in {}", degree, field)),
            (Some(degree), None) => Some(degree.to_string()),
            (None, Some(field)) => Some(field.to_string()),
            (None, None) => None,
        }
    }
}

/// A skill with an optional proficiency level
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
        }
    }
}

impl<'de> Deserialize<'de> for Skill {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Full {
                name: String,
                #[serde(default)]
                level: Option<String>,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Name(name) => Skill { name, level: None },
            Repr::Full { name, level } => Skill { name, level },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub url: String,
}

impl Certification {
    /// One-line rendering: "Name - Issuer (Date)"
    pub fn display_line(&self) -> String {
        let mut line = self.name.trim().to_string();
        if let Some(issuer) = non_empty(&self.issuer) {
            if !line.is_empty() {
                line.push_str(" - ");
            }
            line.push_str(issuer);
        }
        if let Some(date) = non_empty(&self.date) {
            line.push_str(&format!(" ({})", date));
        }
        line
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    #[serde(deserialize_with = "deserialize_lines")]
    pub description: Vec<String>,
    pub technologies: Vec<String>,
    #[serde(alias = "url")]
    pub link: String,
    pub start_date: String,
    pub end_date: String,
}

impl Project {
    pub fn date_range(&self) -> Option<String> {
        date_range(&self.start_date, &self.end_date, false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    #[serde(alias = "name")]
    pub language: String,
    pub proficiency: String,
}

/// Volunteer, community or leadership role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommunityEntry {
    pub organization: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    #[serde(deserialize_with = "deserialize_lines")]
    pub description: Vec<String>,
}

impl CommunityEntry {
    pub fn date_range(&self) -> Option<String> {
        date_range(&self.start_date, &self.end_date, self.current)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    pub name: String,
    pub position: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub relationship: String,
}

/// Format a start/end pair as "start - end".
///
/// `current` replaces the end with "Present". Returns `None` when neither
/// side is known.
pub fn date_range(start: &str, end: &str, current: bool) -> Option<String> {
    let end = if current { Some("Present") } else { non_empty(end) };
    match (non_empty(start), end) {
        (Some(start), Some(end)) => Some(format!("{} - {}", start, end)),
        (Some(start), None) => Some(start.to_string()),
        (None, Some(end)) => Some(end.to_string()),
        (None, None) => None,
    }
}

/// Trimmed value, or `None` when blank
pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_resume() {
        let json = r#"{
            "personalInfo": { "fullName": "Alex Lee" },
            "workExperience": [{
                "company": "Acme",
                "position": "Engineer",
                "startDate": "2020-01",
                "endDate": "2022-01",
                "current": false,
                "description": ["Built X"]
            }],
            "education": [],
            "skills": []
        }"#;

        let resume = ResumeData::from_json(json).unwrap();
        assert_eq!(resume.full_name(), Some("Alex Lee"));
        assert_eq!(resume.work_experience.len(), 1);
        assert_eq!(resume.work_experience[0].description, vec!["Built X"]);
        assert_eq!(
            resume.work_experience[0].date_range().as_deref(),
            Some("2020-01 - 2022-01")
        );
        assert!(resume.certifications.is_empty());
    }

    #[test]
    fn test_description_as_text_block() {
        let json = r#"{ "company": "Acme", "description": "• One\n• Two" }"#;
        let entry: WorkExperience = serde_json::from_str(json).unwrap();
        assert_eq!(entry.description, vec!["One", "Two"]);
    }

    #[test]
    fn test_description_null() {
        let json = r#"{ "company": "Acme", "description": null }"#;
        let entry: WorkExperience = serde_json::from_str(json).unwrap();
        assert!(entry.description.is_empty());
    }

    #[test]
    fn test_skills_accept_strings_and_objects() {
        let json = r#"{ "skills": ["Rust", { "name": "Go", "level": "Advanced" }] }"#;
        let resume = ResumeData::from_json(json).unwrap();
        assert_eq!(resume.skills[0], Skill::new("Rust"));
        assert_eq!(resume.skills[1].level.as_deref(), Some("Advanced"));
    }

    #[test]
    fn test_contact_fields_skip_blank() {
        let info = PersonalInfo {
            email: "a@b.co".to_string(),
            phone: "  ".to_string(),
            location: "Berlin".to_string(),
            ..Default::default()
        };
        assert_eq!(info.contact_fields(), vec!["a@b.co", "Berlin"]);
    }

    #[test]
    fn test_date_range_current() {
        assert_eq!(
            date_range("2021", "2022", true).as_deref(),
            Some("2021 - Present")
        );
        assert_eq!(date_range("", "2022", false).as_deref(), Some("2022"));
        assert_eq!(date_range("", "", false), None);
    }

    #[test]
    fn test_degree_line() {
        let edu = Education {
            degree: "BSc".to_string(),
            field: "Physics".to_string(),
            ..Default::default()
        };
        assert_eq!(edu.degree_line().as_deref(), Some("BSc in Physics"));
    }

    #[test]
    fn test_certification_display_line() {
        let cert = Certification {
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            date: "2023".to_string(),
            ..Default::default()
        };
        assert_eq!(cert.display_line(), "CKA - CNCF (2023)");
    }

    #[test]
    fn test_pretty_json_roundtrip() {
        let mut resume = ResumeData::default();
        resume.personal_info.full_name = "Alex Lee".to_string();
        let json = resume.to_pretty_json().unwrap();
        assert!(json.contains("\n  \"personalInfo\""));
        assert_eq!(ResumeData::from_json(&json).unwrap(), resume);
    }
}
