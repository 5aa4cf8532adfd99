use crate::render::common::{
    contact_slots, education_entry, experience_entry, project_entry, BodyStyle, RenderContext,
};
use crate::render::view::{Node, SectionKind};
use crate::render::Layout;

/// No dividers, no banner, untitled summary.
pub struct MinimalLayout;

impl Layout for MinimalLayout {
    fn compose(&self, ctx: &RenderContext<'_>) -> Node {
        let slots = contact_slots(ctx.info());
        let mut header = vec![Node::Heading(ctx.heading(1, ctx.name()))];
        let contacts: Vec<_> = slots.general.into_iter().chain(slots.code_profile).collect();
        if !contacts.is_empty() {
            header.push(Node::Contacts { items: contacts });
        }

        let mut children = vec![ctx.section(SectionKind::Contact, None, header)];

        if let Some(summary) = ctx.summary() {
            children.push(ctx.section(
                SectionKind::Summary,
                None,
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
                vec![Node::Inline {
                    items: skills,
                    separator: " • ".to_string(),
                }],
            ));
        }

        Node::Stack { children }
    }
}
