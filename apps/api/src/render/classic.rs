use crate::render::common::{
    contact_slots, education_entry, experience_entry, project_entry, BodyStyle, RenderContext,
};
use crate::render::view::{Node, SectionKind};
use crate::render::Layout;

/// Traditional single column: centered header, accent rule, titled sections.
pub struct ClassicLayout;

impl Layout for ClassicLayout {
    fn compose(&self, ctx: &RenderContext<'_>) -> Node {
        let mut children = vec![header(ctx), Node::Divider {
            color: Some(ctx.accent.to_string()),
        }];

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
                Some("Professional Experience"),
                ctx.experience
                    .iter()
                    .map(|e| experience_entry(e, BodyStyle::Bullets))
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
                    .map(|p| project_entry(p, BodyStyle::Bullets))
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
                Some("Core Skills"),
                vec![Node::Inline {
                    items: skills,
                    separator: " • ".to_string(),
                }],
            ));
        }

        Node::Stack { children }
    }
}

/// Name, one contact line, and the code profile on a line of its own.
fn header(ctx: &RenderContext<'_>) -> Node {
    let slots = contact_slots(ctx.info());
    let mut children = vec![Node::Heading(ctx.heading(1, ctx.name()))];

    if !slots.general.is_empty() {
        children.push(Node::Contacts {
            items: slots.general,
        });
    }
    if let Some(profile) = slots.code_profile {
        children.push(Node::Contacts {
            items: vec![profile],
        });
    }

    ctx.section(SectionKind::Contact, None, children)
}
