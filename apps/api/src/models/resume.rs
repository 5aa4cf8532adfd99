use serde::{Deserialize, Serialize};

/// Contact and identity block shown in every template header.
///
/// Every field is optional while editing. Name and email are only required at
/// submit time (see `resume::validation`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub profession: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<String>,
    /// Ignored for ordering and display while `currently_working` is set.
    pub end_date: Option<String>,
    pub currently_working: bool,
    /// Multi-line free text; each non-empty line is one bullet in list layouts.
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution_name: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    /// Graduation (or expected) date. Doubles as the sort key.
    pub date: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntry {
    pub name: String,
}

/// The canonical in-memory résumé. Owned by exactly one editing session and
/// sent verbatim to the remote store on save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    /// Unique under case-insensitive comparison; insertion order is display order.
    pub skills: Vec<SkillEntry>,
}

/// Returns the trimmed value when it carries any visible text.
pub fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
