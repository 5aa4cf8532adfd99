//! Building blocks shared by every layout: placeholders, date labels, contact
//! slots, and entry views.

use chrono::NaiveDate;

use crate::models::{filled, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDocument};
use crate::render::view::{ContactItem, ContactKind, EntryView, Heading, Node, SectionKind};
use crate::resume::chronology::{format_month_year, sort_chronologically};

pub const PLACEHOLDER_NAME: &str = "Your Name";
pub const PLACEHOLDER_JOB_TITLE: &str = "Job Title";
pub const PLACEHOLDER_COMPANY: &str = "Company Name";
pub const PLACEHOLDER_PROJECT: &str = "Project Name";
pub const PLACEHOLDER_DEGREE: &str = "Degree";
pub const PLACEHOLDER_INSTITUTION: &str = "Institution Name";
pub const PLACEHOLDER_DESCRIPTION: &str = "Description...";
pub const PLACEHOLDER_PROJECT_DESCRIPTION: &str = "Project description...";
pub const PRESENT: &str = "Present";

/// Hosts whose profile links get the dedicated code-profile slot.
const CODE_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org", "codeberg.org"];

/// Everything a layout needs, with the dated sections already ordered.
pub struct RenderContext<'a> {
    pub doc: &'a ResumeDocument,
    pub accent: &'a str,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

impl<'a> RenderContext<'a> {
    pub fn new(doc: &'a ResumeDocument, accent: &'a str, today: NaiveDate) -> Self {
        Self {
            doc,
            accent,
            experience: sort_chronologically(&doc.experience, today),
            education: sort_chronologically(&doc.education, today),
        }
    }

    pub fn info(&self) -> &PersonalInfo {
        &self.doc.personal_info
    }

    pub fn name(&self) -> String {
        filled(&self.info().name)
            .unwrap_or(PLACEHOLDER_NAME)
            .to_string()
    }

    pub fn summary(&self) -> Option<&str> {
        filled(&self.doc.summary)
    }

    /// Heading carrying the accent color.
    pub fn heading(&self, level: u8, text: impl Into<String>) -> Heading {
        Heading {
            level,
            text: text.into(),
            color: Some(self.accent.to_string()),
        }
    }

    pub fn section(&self, kind: SectionKind, title: Option<&str>, children: Vec<Node>) -> Node {
        Node::Section {
            kind,
            title: title.map(|t| self.heading(4, t)),
            children,
        }
    }

    /// Non-blank skill names in insertion order.
    pub fn skill_names(&self) -> Vec<String> {
        self.doc
            .skills
            .iter()
            .map(|s| s.name.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// True when `url` points at a known code-hosting site.
pub fn is_code_host(url: &str) -> bool {
    let lowered = url.trim().to_lowercase();
    let without_scheme = lowered
        .split_once("://")
        .map_or(lowered.as_str(), |(_, rest)| rest);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    let host = host.split(':').next().unwrap_or_default();

    CODE_HOSTS
        .iter()
        .any(|&known| host == known || host.ends_with(&format!(".{known}")))
}

/// Contact line items in display order, plus the split-out code profile.
pub struct ContactSlots {
    pub general: Vec<ContactItem>,
    pub code_profile: Option<ContactItem>,
}

fn item(kind: ContactKind, value: &Option<String>) -> Option<ContactItem> {
    filled(value).map(|text| ContactItem {
        kind,
        text: text.to_string(),
    })
}

/// Email, phone, location, LinkedIn, then the website. A code-host website
/// lands in `code_profile` instead of `general`.
pub fn contact_slots(info: &PersonalInfo) -> ContactSlots {
    let mut general: Vec<ContactItem> = [
        item(ContactKind::Email, &info.email),
        item(ContactKind::Phone, &info.phone),
        item(ContactKind::Location, &info.location),
        item(ContactKind::Linkedin, &info.linkedin),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut code_profile = None;
    if let Some(site) = filled(&info.website) {
        if is_code_host(site) {
            code_profile = item(ContactKind::CodeProfile, &info.website);
        } else {
            general.extend(item(ContactKind::Website, &info.website));
        }
    }

    ContactSlots {
        general,
        code_profile,
    }
}

/// `"start - end"`, with `Present` for ongoing roles. Missing halves are dropped.
pub fn experience_dates(entry: &ExperienceEntry) -> Option<String> {
    let start = format_month_year(entry.start_date.as_deref());
    let end = if entry.currently_working {
        Some(PRESENT.to_string())
    } else {
        format_month_year(entry.end_date.as_deref())
    };

    match (start, end) {
        (Some(s), Some(e)) => Some(format!("{s} - {e}")),
        (Some(s), None) => Some(s),
        (None, Some(e)) => Some(e),
        (None, None) => None,
    }
}

/// How a layout renders free-text descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStyle {
    /// One bullet per non-empty line; nothing when the text is empty.
    Bullets,
    /// A single paragraph; placeholder text when empty.
    Paragraph,
}

fn description(text: &Option<String>, style: BodyStyle, placeholder: &str) -> Option<Box<Node>> {
    match style {
        BodyStyle::Bullets => {
            let items: Vec<String> = text
                .as_deref()
                .unwrap_or_default()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            (!items.is_empty()).then(|| Box::new(Node::Bullets { items }))
        }
        BodyStyle::Paragraph => Some(Box::new(Node::Paragraph {
            text: filled(text).unwrap_or(placeholder).to_string(),
        })),
    }
}

pub fn experience_entry(entry: &ExperienceEntry, style: BodyStyle) -> Node {
    Node::Entry(EntryView {
        title: filled(&entry.title)
            .unwrap_or(PLACEHOLDER_JOB_TITLE)
            .to_string(),
        subtitle: Some(
            filled(&entry.company)
                .unwrap_or(PLACEHOLDER_COMPANY)
                .to_string(),
        ),
        date: experience_dates(entry),
        note: None,
        body: description(&entry.description, style, PLACEHOLDER_DESCRIPTION),
    })
}

pub fn project_entry(entry: &ProjectEntry, style: BodyStyle) -> Node {
    Node::Entry(EntryView {
        title: filled(&entry.name)
            .unwrap_or(PLACEHOLDER_PROJECT)
            .to_string(),
        subtitle: filled(&entry.kind).map(str::to_string),
        date: None,
        note: None,
        body: description(&entry.description, style, PLACEHOLDER_PROJECT_DESCRIPTION),
    })
}

/// `"{degree}{joiner}{field}"`, e.g. `"BSc in Physics"`.
pub fn degree_line(entry: &EducationEntry, joiner: &str) -> String {
    let degree = filled(&entry.degree).unwrap_or(PLACEHOLDER_DEGREE);
    match filled(&entry.field_of_study) {
        Some(field) => format!("{degree}{joiner}{field}"),
        None => degree.to_string(),
    }
}

pub fn education_entry(entry: &EducationEntry, joiner: &str, show_gpa: bool) -> Node {
    Node::Entry(EntryView {
        title: degree_line(entry, joiner),
        subtitle: Some(
            filled(&entry.institution_name)
                .unwrap_or(PLACEHOLDER_INSTITUTION)
                .to_string(),
        ),
        date: format_month_year(entry.date.as_deref()),
        note: if show_gpa {
            filled(&entry.gpa).map(|gpa| format!("GPA: {gpa}"))
        } else {
            None
        },
        body: None,
    })
}
