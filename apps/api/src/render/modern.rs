use crate::models::filled;
use crate::render::common::{
    contact_slots, education_entry, experience_entry, project_entry, BodyStyle, RenderContext,
};
use crate::render::view::{Heading, Node, SectionKind, TextRole};
use crate::render::Layout;

/// Accent banner header over paragraph-style sections and skill chips.
pub struct ModernLayout;

impl Layout for ModernLayout {
    fn compose(&self, ctx: &RenderContext<'_>) -> Node {
        let mut children = vec![banner(ctx)];

        if let Some(summary) = ctx.summary() {
            children.push(ctx.section(
                SectionKind::Summary,
                Some("Professional Summary"),
                vec![Node::Paragraph {
                    text: summary.to_string(),
                }],
            ));
        }

        if !ctx.experience.is_empty() {
            children.push(ctx.section(
                SectionKind::Experience,
                Some("Experience"),
                ctx.experience
                    .iter()
                    .map(|e| experience_entry(e, BodyStyle::Paragraph))
                    .collect(),
            ));
        }

        if !ctx.doc.projects.is_empty() {
            children.push(ctx.section(
                SectionKind::Projects,
                Some("Projects"),
                ctx.doc
                    .projects
                    .iter()
                    .map(|p| project_entry(p, BodyStyle::Paragraph))
                    .collect(),
            ));
        }

        if !ctx.education.is_empty() {
            children.push(ctx.section(
                SectionKind::Education,
                Some("Education"),
                ctx.education
                    .iter()
                    .map(|e| education_entry(e, " in ", true))
                    .collect(),
            ));
        }

        let skills = ctx.skill_names();
        if !skills.is_empty() {
            children.push(ctx.section(
                SectionKind::Skills,
                Some("Skills"),
                vec![Node::Tags { items: skills }],
            ));
        }

        Node::Stack { children }
    }
}

fn banner(ctx: &RenderContext<'_>) -> Node {
    // Name sits on the accent fill, so it keeps the client's inverse text color.
    let mut children = vec![Node::Heading(Heading {
        level: 1,
        text: ctx.name(),
        color: None,
    })];

    if let Some(profession) = filled(&ctx.info().profession) {
        children.push(Node::Text {
            text: profession.to_string(),
            role: TextRole::Tagline,
        });
    }

    let slots = contact_slots(ctx.info());
    let items: Vec<_> = slots.general.into_iter().chain(slots.code_profile).collect();
    if !items.is_empty() {
        children.push(Node::Contacts { items });
    }

    Node::Banner {
        color: ctx.accent.to_string(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceEntry, PersonalInfo, ResumeDocument};
    use chrono::NaiveDate;

    fn compose(doc: &ResumeDocument) -> Node {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ModernLayout.compose(&RenderContext::new(doc, "#10b981", today))
    }

    #[test]
    fn test_banner_carries_accent_and_profession() {
        let doc = ResumeDocument {
            personal_info: PersonalInfo {
                name: Some("Ada".to_string()),
                profession: Some("Engineer".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let Node::Stack { children } = compose(&doc) else {
            panic!("expected stack");
        };
        let Node::Banner { color, children } = &children[0] else {
            panic!("expected banner");
        };
        assert_eq!(color, "#10b981");
        assert_eq!(
            children[1],
            Node::Text {
                text: "Engineer".to_string(),
                role: TextRole::Tagline
            }
        );
    }

    #[test]
    fn test_empty_description_shows_placeholder_paragraph() {
        let doc = ResumeDocument {
            experience: vec![ExperienceEntry::default()],
            ..Default::default()
        };
        let json = serde_json::to_string(&compose(&doc)).unwrap();
        assert!(json.contains("Description..."));
    }
}
