//! Document reducer. Every editor mutation goes through `reduce`.
//!
//! `reduce` takes the current document by reference and returns a new one, so
//! the caller swaps documents atomically and nested editors never alias state.
//! Field paths use the editor's dotted wire form, e.g. `personalInfo.email`,
//! `experience.0.description`, `projects.2.type`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument};
use crate::resume::skills::{add_skill, dedup_skills, remove_skill, SkillError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Unknown field path '{0}'")]
    UnknownField(String),

    #[error("No {section} entry at index {index} (list has {len})")]
    IndexOutOfRange {
        section: Section,
        index: usize,
        len: usize,
    },

    #[error("Field '{path}' expects {expected}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
    },

    #[error(transparent)]
    Skill(#[from] SkillError),
}

/// The list-valued sections of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Experience,
    Education,
    Projects,
    Skills,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Skills => "skills",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Location,
    Profession,
    Linkedin,
    Website,
    ImageUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceField {
    Company,
    Title,
    StartDate,
    EndDate,
    CurrentlyWorking,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EducationField {
    InstitutionName,
    Degree,
    FieldOfStudy,
    Date,
    Gpa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    Name,
    Kind,
    Description,
}

/// Address of a single scalar field inside a document.
///
/// Skills are not addressable: they change only through add/remove so the
/// uniqueness rule cannot be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldPath {
    Personal(PersonalField),
    Summary,
    Experience(usize, ExperienceField),
    Education(usize, EducationField),
    Project(usize, ProjectField),
}

impl FieldPath {
    /// The list section this path indexes into, if any.
    pub fn section(&self) -> Option<Section> {
        match self {
            FieldPath::Personal(_) | FieldPath::Summary => None,
            FieldPath::Experience(..) => Some(Section::Experience),
            FieldPath::Education(..) => Some(Section::Education),
            FieldPath::Project(..) => Some(Section::Projects),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Personal(field) => {
                let name = match field {
                    PersonalField::Name => "name",
                    PersonalField::Email => "email",
                    PersonalField::Phone => "phone",
                    PersonalField::Location => "location",
                    PersonalField::Profession => "profession",
                    PersonalField::Linkedin => "linkedin",
                    PersonalField::Website => "website",
                    PersonalField::ImageUrl => "imageUrl",
                };
                write!(f, "personalInfo.{name}")
            }
            FieldPath::Summary => f.write_str("summary"),
            FieldPath::Experience(i, field) => {
                let name = match field {
                    ExperienceField::Company => "company",
                    ExperienceField::Title => "title",
                    ExperienceField::StartDate => "startDate",
                    ExperienceField::EndDate => "endDate",
                    ExperienceField::CurrentlyWorking => "currentlyWorking",
                    ExperienceField::Description => "description",
                };
                write!(f, "experience.{i}.{name}")
            }
            FieldPath::Education(i, field) => {
                let name = match field {
                    EducationField::InstitutionName => "institutionName",
                    EducationField::Degree => "degree",
                    EducationField::FieldOfStudy => "fieldOfStudy",
                    EducationField::Date => "date",
                    EducationField::Gpa => "gpa",
                };
                write!(f, "education.{i}.{name}")
            }
            FieldPath::Project(i, field) => {
                let name = match field {
                    ProjectField::Name => "name",
                    ProjectField::Kind => "type",
                    ProjectField::Description => "description",
                };
                write!(f, "projects.{i}.{name}")
            }
        }
    }
}

impl FromStr for FieldPath {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || EditError::UnknownField(s.to_string());
        let parts: Vec<&str> = s.split('.').collect();

        match parts.as_slice() {
            ["summary"] => Ok(FieldPath::Summary),
            ["personalInfo", field] => {
                let field = match *field {
                    "name" => PersonalField::Name,
                    "email" => PersonalField::Email,
                    "phone" => PersonalField::Phone,
                    "location" => PersonalField::Location,
                    "profession" => PersonalField::Profession,
                    "linkedin" => PersonalField::Linkedin,
                    "website" => PersonalField::Website,
                    "imageUrl" => PersonalField::ImageUrl,
                    _ => return Err(unknown()),
                };
                Ok(FieldPath::Personal(field))
            }
            [list, index, field] => {
                let index: usize = index.parse().map_err(|_| unknown())?;
                match *list {
                    "experience" => {
                        let field = match *field {
                            "company" => ExperienceField::Company,
                            "title" => ExperienceField::Title,
                            "startDate" => ExperienceField::StartDate,
                            "endDate" => ExperienceField::EndDate,
                            "currentlyWorking" => ExperienceField::CurrentlyWorking,
                            "description" => ExperienceField::Description,
                            _ => return Err(unknown()),
                        };
                        Ok(FieldPath::Experience(index, field))
                    }
                    "education" => {
                        let field = match *field {
                            "institutionName" => EducationField::InstitutionName,
                            "degree" => EducationField::Degree,
                            "fieldOfStudy" => EducationField::FieldOfStudy,
                            "date" => EducationField::Date,
                            "gpa" => EducationField::Gpa,
                            _ => return Err(unknown()),
                        };
                        Ok(FieldPath::Education(index, field))
                    }
                    "projects" => {
                        let field = match *field {
                            "name" => ProjectField::Name,
                            "type" => ProjectField::Kind,
                            "description" => ProjectField::Description,
                            _ => return Err(unknown()),
                        };
                        Ok(FieldPath::Project(index, field))
                    }
                    _ => Err(unknown()),
                }
            }
            _ => Err(unknown()),
        }
    }
}

impl TryFrom<String> for FieldPath {
    type Error = EditError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

/// A value written into a field. `null` clears a text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
    Clear(()),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Every mutation the editor can make to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Writes one scalar field.
    Set { path: FieldPath, value: FieldValue },
    /// Inserts a blank entry at the front of a list section.
    AddEntry { section: Section },
    /// Removes the entry at `index`; out-of-range indices are ignored.
    RemoveEntry { section: Section, index: usize },
    AddSkill { label: String },
    RemoveSkill { index: usize },
    /// Replaces the whole document (loading an existing résumé).
    Replace { document: ResumeDocument },
}

impl Action {
    /// The list section whose indices this action can shift.
    pub fn restructures(&self) -> Option<Section> {
        match self {
            Action::AddEntry { section } | Action::RemoveEntry { section, .. } => Some(*section),
            Action::RemoveSkill { .. } | Action::AddSkill { .. } => Some(Section::Skills),
            Action::Set { .. } | Action::Replace { .. } => None,
        }
    }
}

fn text_value(path: FieldPath, value: FieldValue) -> Result<Option<String>, EditError> {
    match value {
        FieldValue::Text(text) => Ok(Some(text)),
        FieldValue::Clear(()) => Ok(None),
        FieldValue::Flag(_) => Err(EditError::TypeMismatch {
            path,
            expected: "text",
        }),
    }
}

fn entry_mut<T>(list: &mut [T], section: Section, index: usize) -> Result<&mut T, EditError> {
    let len = list.len();
    list.get_mut(index).ok_or(EditError::IndexOutOfRange {
        section,
        index,
        len,
    })
}

fn set_field(
    doc: &mut ResumeDocument,
    path: FieldPath,
    value: FieldValue,
) -> Result<(), EditError> {
    match path {
        FieldPath::Personal(field) => {
            let info = &mut doc.personal_info;
            let slot = match field {
                PersonalField::Name => &mut info.name,
                PersonalField::Email => &mut info.email,
                PersonalField::Phone => &mut info.phone,
                PersonalField::Location => &mut info.location,
                PersonalField::Profession => &mut info.profession,
                PersonalField::Linkedin => &mut info.linkedin,
                PersonalField::Website => &mut info.website,
                PersonalField::ImageUrl => &mut info.image_url,
            };
            *slot = text_value(path, value)?;
        }
        FieldPath::Summary => doc.summary = text_value(path, value)?,
        FieldPath::Experience(index, field) => {
            let entry = entry_mut(&mut doc.experience, Section::Experience, index)?;
            let slot = match field {
                ExperienceField::CurrentlyWorking => {
                    let FieldValue::Flag(flag) = value else {
                        return Err(EditError::TypeMismatch {
                            path,
                            expected: "a boolean",
                        });
                    };
                    entry.currently_working = flag;
                    return Ok(());
                }
                ExperienceField::Company => &mut entry.company,
                ExperienceField::Title => &mut entry.title,
                ExperienceField::StartDate => &mut entry.start_date,
                ExperienceField::EndDate => &mut entry.end_date,
                ExperienceField::Description => &mut entry.description,
            };
            *slot = text_value(path, value)?;
        }
        FieldPath::Education(index, field) => {
            let entry = entry_mut(&mut doc.education, Section::Education, index)?;
            let slot = match field {
                EducationField::InstitutionName => &mut entry.institution_name,
                EducationField::Degree => &mut entry.degree,
                EducationField::FieldOfStudy => &mut entry.field_of_study,
                EducationField::Date => &mut entry.date,
                EducationField::Gpa => &mut entry.gpa,
            };
            *slot = text_value(path, value)?;
        }
        FieldPath::Project(index, field) => {
            let entry = entry_mut(&mut doc.projects, Section::Projects, index)?;
            let slot = match field {
                ProjectField::Name => &mut entry.name,
                ProjectField::Kind => &mut entry.kind,
                ProjectField::Description => &mut entry.description,
            };
            *slot = text_value(path, value)?;
        }
    }
    Ok(())
}

fn remove_at<T>(list: &mut Vec<T>, index: usize) {
    if index < list.len() {
        list.remove(index);
    }
}

/// Applies `action` to a copy of `doc`. On error the caller's document is untouched.
pub fn reduce(doc: &ResumeDocument, action: Action) -> Result<ResumeDocument, EditError> {
    let mut next = doc.clone();

    match action {
        Action::Set { path, value } => set_field(&mut next, path, value)?,
        Action::AddEntry { section } => match section {
            Section::Experience => next.experience.insert(0, ExperienceEntry::default()),
            Section::Education => next.education.insert(0, EducationEntry::default()),
            Section::Projects => next.projects.insert(0, ProjectEntry::default()),
            Section::Skills => {
                return Err(EditError::UnknownField(
                    "skills are added by label".to_string(),
                ))
            }
        },
        Action::RemoveEntry { section, index } => match section {
            Section::Experience => remove_at(&mut next.experience, index),
            Section::Education => remove_at(&mut next.education, index),
            Section::Projects => remove_at(&mut next.projects, index),
            Section::Skills => {
                remove_skill(&mut next.skills, index);
            }
        },
        Action::AddSkill { label } => {
            add_skill(&mut next.skills, &label)?;
        }
        Action::RemoveSkill { index } => {
            remove_skill(&mut next.skills, index);
        }
        Action::Replace { document } => {
            next = document;
            next.skills = dedup_skills(&next.skills);
        }
    }

    Ok(next)
}

/// Reads a text field, for callers that act on the current value (enhancement).
pub fn read_text<'a>(doc: &'a ResumeDocument, path: &FieldPath) -> Result<Option<&'a str>, EditError> {
    let value = match *path {
        FieldPath::Summary => &doc.summary,
        FieldPath::Personal(field) => {
            let info = &doc.personal_info;
            match field {
                PersonalField::Name => &info.name,
                PersonalField::Email => &info.email,
                PersonalField::Phone => &info.phone,
                PersonalField::Location => &info.location,
                PersonalField::Profession => &info.profession,
                PersonalField::Linkedin => &info.linkedin,
                PersonalField::Website => &info.website,
                PersonalField::ImageUrl => &info.image_url,
            }
        }
        FieldPath::Experience(index, field) => {
            let len = doc.experience.len();
            let entry = doc.experience.get(index).ok_or(EditError::IndexOutOfRange {
                section: Section::Experience,
                index,
                len,
            })?;
            match field {
                ExperienceField::Company => &entry.company,
                ExperienceField::Title => &entry.title,
                ExperienceField::StartDate => &entry.start_date,
                ExperienceField::EndDate => &entry.end_date,
                ExperienceField::Description => &entry.description,
                ExperienceField::CurrentlyWorking => {
                    return Err(EditError::TypeMismatch {
                        path: *path,
                        expected: "a text field",
                    })
                }
            }
        }
        FieldPath::Education(index, field) => {
            let len = doc.education.len();
            let entry = doc.education.get(index).ok_or(EditError::IndexOutOfRange {
                section: Section::Education,
                index,
                len,
            })?;
            match field {
                EducationField::InstitutionName => &entry.institution_name,
                EducationField::Degree => &entry.degree,
                EducationField::FieldOfStudy => &entry.field_of_study,
                EducationField::Date => &entry.date,
                EducationField::Gpa => &entry.gpa,
            }
        }
        FieldPath::Project(index, field) => {
            let len = doc.projects.len();
            let entry = doc.projects.get(index).ok_or(EditError::IndexOutOfRange {
                section: Section::Projects,
                index,
                len,
            })?;
            match field {
                ProjectField::Name => &entry.name,
                ProjectField::Kind => &entry.kind,
                ProjectField::Description => &entry.description,
            }
        }
    };
    Ok(value.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    fn set(doc: &ResumeDocument, p: &str, value: FieldValue) -> Result<ResumeDocument, EditError> {
        reduce(
            doc,
            Action::Set {
                path: path(p),
                value,
            },
        )
    }

    #[test]
    fn test_path_roundtrips_through_display() {
        for raw in [
            "summary",
            "personalInfo.imageUrl",
            "experience.3.currentlyWorking",
            "education.0.fieldOfStudy",
            "projects.12.type",
        ] {
            assert_eq!(path(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_unknown_paths_rejected() {
        for raw in [
            "",
            "personalInfo",
            "personalInfo.age",
            "experience.x.title",
            "experience.0",
            "skills.0.name",
            "summary.extra",
        ] {
            assert!(raw.parse::<FieldPath>().is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn test_set_personal_field_returns_new_document() {
        let doc = ResumeDocument::default();
        let next = set(&doc, "personalInfo.name", "Ada".into()).unwrap();
        assert_eq!(next.personal_info.name.as_deref(), Some("Ada"));
        assert_eq!(doc.personal_info.name, None);
    }

    #[test]
    fn test_clear_text_field() {
        let doc = set(&ResumeDocument::default(), "summary", "Hello".into()).unwrap();
        let cleared = set(&doc, "summary", FieldValue::Clear(())).unwrap();
        assert_eq!(cleared.summary, None);
    }

    #[test]
    fn test_add_entry_inserts_at_front() {
        let doc = reduce(
            &ResumeDocument::default(),
            Action::AddEntry {
                section: Section::Experience,
            },
        )
        .unwrap();
        let doc = set(&doc, "experience.0.company", "First".into()).unwrap();
        let doc = reduce(
            &doc,
            Action::AddEntry {
                section: Section::Experience,
            },
        )
        .unwrap();

        assert_eq!(doc.experience.len(), 2);
        assert_eq!(doc.experience[0].company, None);
        assert_eq!(doc.experience[1].company.as_deref(), Some("First"));
    }

    #[test]
    fn test_set_out_of_range_leaves_document_untouched() {
        let doc = ResumeDocument::default();
        let err = set(&doc, "projects.0.name", "X".into()).unwrap_err();
        assert_eq!(
            err,
            EditError::IndexOutOfRange {
                section: Section::Projects,
                index: 0,
                len: 0
            }
        );
    }

    #[test]
    fn test_currently_working_requires_flag() {
        let doc = reduce(
            &ResumeDocument::default(),
            Action::AddEntry {
                section: Section::Experience,
            },
        )
        .unwrap();
        assert!(matches!(
            set(&doc, "experience.0.currentlyWorking", "yes".into()),
            Err(EditError::TypeMismatch { .. })
        ));
        assert!(matches!(
            set(&doc, "experience.0.title", FieldValue::Flag(true)),
            Err(EditError::TypeMismatch { .. })
        ));

        let next = set(&doc, "experience.0.currentlyWorking", FieldValue::Flag(true)).unwrap();
        assert!(next.experience[0].currently_working);
    }

    #[test]
    fn test_remove_entry_out_of_range_is_noop() {
        let doc = reduce(
            &ResumeDocument::default(),
            Action::AddEntry {
                section: Section::Education,
            },
        )
        .unwrap();
        let next = reduce(
            &doc,
            Action::RemoveEntry {
                section: Section::Education,
                index: 4,
            },
        )
        .unwrap();
        assert_eq!(next, doc);
    }

    #[test]
    fn test_duplicate_skill_surfaces_as_error() {
        let doc = reduce(
            &ResumeDocument::default(),
            Action::AddSkill {
                label: "Python".to_string(),
            },
        )
        .unwrap();
        let err = reduce(
            &doc,
            Action::AddSkill {
                label: "python".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Skill \"python\" already added.");
    }

    #[test]
    fn test_action_wire_format() {
        let action: Action = serde_json::from_value(json!({
            "type": "set",
            "path": "experience.0.currentlyWorking",
            "value": true
        }))
        .unwrap();
        assert_eq!(
            action,
            Action::Set {
                path: FieldPath::Experience(0, ExperienceField::CurrentlyWorking),
                value: FieldValue::Flag(true),
            }
        );

        let action: Action = serde_json::from_value(json!({
            "type": "set",
            "path": "summary",
            "value": null
        }))
        .unwrap();
        assert_eq!(
            action,
            Action::Set {
                path: FieldPath::Summary,
                value: FieldValue::Clear(()),
            }
        );

        let action: Action =
            serde_json::from_value(json!({"type": "remove_entry", "section": "projects", "index": 1}))
                .unwrap();
        assert_eq!(
            action,
            Action::RemoveEntry {
                section: Section::Projects,
                index: 1
            }
        );

        assert!(serde_json::from_value::<Action>(json!({
            "type": "set",
            "path": "personalInfo.age",
            "value": "x"
        }))
        .is_err());
    }

    #[test]
    fn test_replace_swaps_document_and_folds_duplicate_skills() {
        let current = set(&ResumeDocument::default(), "summary", "Old".into()).unwrap();
        let incoming: ResumeDocument = serde_json::from_value(json!({
            "summary": "New",
            "skills": [{"name": "Python"}, {"name": "python"}, {"name": "Go"}]
        }))
        .unwrap();

        let next = reduce(&current, Action::Replace { document: incoming }).unwrap();
        assert_eq!(next.summary.as_deref(), Some("New"));
        let names: Vec<&str> = next.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Python", "Go"]);
    }

    #[test]
    fn test_read_text() {
        let doc = set(&ResumeDocument::default(), "summary", "Hi".into()).unwrap();
        assert_eq!(read_text(&doc, &FieldPath::Summary).unwrap(), Some("Hi"));
        assert!(read_text(&doc, &path("experience.0.description")).is_err());
    }
}
