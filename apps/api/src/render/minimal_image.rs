use crate::models::{filled, PersonalInfo};
use crate::render::common::{
    education_entry, experience_entry, project_entry, BodyStyle, RenderContext,
};
use crate::render::view::{Column, ContactItem, ContactKind, Node, SectionKind, TextRole};
use crate::render::Layout;

const SIDEBAR_SPAN: u8 = 8;
const MAIN_SPAN: u8 = 16;

/// Two columns: photo, contact, education, and skills in a sidebar; the
/// narrative sections in the main column.
pub struct MinimalImageLayout;

impl Layout for MinimalImageLayout {
    fn compose(&self, ctx: &RenderContext<'_>) -> Node {
        Node::Columns {
            columns: vec![
                Column {
                    span: SIDEBAR_SPAN,
                    children: sidebar(ctx),
                },
                Column {
                    span: MAIN_SPAN,
                    children: main_column(ctx),
                },
            ],
        }
    }
}

fn sidebar(ctx: &RenderContext<'_>) -> Vec<Node> {
    let mut children = vec![Node::Avatar {
        src: filled(&ctx.info().image_url).map(str::to_string),
    }];

    let contacts = sidebar_contacts(ctx.info());
    if !contacts.is_empty() {
        children.push(ctx.section(
            SectionKind::Contact,
            Some("CONTACT"),
            vec![Node::Contacts { items: contacts }],
        ));
    }

    if !ctx.education.is_empty() {
        children.push(ctx.section(
            SectionKind::Education,
            Some("EDUCATION"),
            ctx.education
                .iter()
                .map(|e| education_entry(e, " - ", false))
                .collect(),
        ));
    }

    let skills = ctx.skill_names();
    if !skills.is_empty() {
        children.push(ctx.section(
            SectionKind::Skills,
            Some("SKILLS"),
            vec![Node::Lines { items: skills }],
        ));
    }

    children
}

/// Phone first, and no separate code-profile slot in this design.
fn sidebar_contacts(info: &PersonalInfo) -> Vec<ContactItem> {
    [
        (ContactKind::Phone, &info.phone),
        (ContactKind::Email, &info.email),
        (ContactKind::Location, &info.location),
        (ContactKind::Linkedin, &info.linkedin),
        (ContactKind::Website, &info.website),
    ]
    .into_iter()
    .filter_map(|(kind, value)| {
        filled(value).map(|text| ContactItem {
            kind,
            text: text.to_string(),
        })
    })
    .collect()
}

fn main_column(ctx: &RenderContext<'_>) -> Vec<Node> {
    let mut children = vec![Node::Heading(ctx.heading(1, ctx.name()))];

    if let Some(profession) = filled(&ctx.info().profession) {
        children.push(Node::Text {
            text: profession.to_uppercase(),
            role: TextRole::Tagline,
        });
    }

    if let Some(summary) = ctx.summary() {
        children.push(ctx.section(
            SectionKind::Summary,
            Some("SUMMARY"),
            vec![Node::Paragraph {
                text: summary.to_string(),
            }],
        ));
    }

    if !ctx.experience.is_empty() {
        children.push(ctx.section(
            SectionKind::Experience,
            Some("EXPERIENCE"),
            ctx.experience
                .iter()
                .map(|e| experience_entry(e, BodyStyle::Bullets))
                .collect(),
        ));
    }

    if !ctx.doc.projects.is_empty() {
        children.push(ctx.section(
            SectionKind::Projects,
            Some("PROJECTS"),
            ctx.doc
                .projects
                .iter()
                .map(|p| project_entry(p, BodyStyle::Bullets))
                .collect(),
        ));
    }

    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ResumeDocument};
    use chrono::NaiveDate;

    fn compose(doc: &ResumeDocument) -> Node {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        MinimalImageLayout.compose(&RenderContext::new(doc, "#3b82f6", today))
    }

    #[test]
    fn test_columns_span_full_width() {
        let Node::Columns { columns } = compose(&ResumeDocument::default()) else {
            panic!("expected columns");
        };
        assert_eq!(columns.iter().map(|c| c.span).sum::<u8>(), 24);
        assert_eq!(columns[0].children, vec![Node::Avatar { src: None }]);
    }

    #[test]
    fn test_profession_is_uppercased() {
        let doc = ResumeDocument {
            personal_info: PersonalInfo {
                profession: Some("Data Engineer".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let Node::Columns { columns } = compose(&doc) else {
            panic!("expected columns");
        };
        assert_eq!(
            columns[1].children[1],
            Node::Text {
                text: "DATA ENGINEER".to_string(),
                role: TextRole::Tagline
            }
        );
    }

    #[test]
    fn test_code_host_website_is_a_plain_contact() {
        let info = PersonalInfo {
            website: Some("https://github.com/ada".to_string()),
            phone: Some("555".to_string()),
            ..Default::default()
        };
        let items = sidebar_contacts(&info);
        assert_eq!(items[0].kind, ContactKind::Phone);
        assert_eq!(items[1].kind, ContactKind::Website);
    }

    #[test]
    fn test_education_omits_gpa() {
        let doc = ResumeDocument {
            education: vec![EducationEntry {
                degree: Some("MSc".to_string()),
                field_of_study: Some("CS".to_string()),
                gpa: Some("4.0".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let json = serde_json::to_string(&compose(&doc)).unwrap();
        assert!(json.contains("MSc - CS"));
        assert!(!json.contains("GPA"));
    }
}
