//! Presentational view tree produced by the layouts.
//!
//! The tree describes structure and emphasis only. Clients map it onto their own
//! widgets and styles. Accent color appears only on `Heading`, `Divider`, and
//! `Banner`. Body text nodes carry no color field at all.

use serde::Serialize;

/// Which part of the résumé a `Section` node holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Contact,
    Summary,
    Experience,
    Projects,
    Education,
    Skills,
}

/// Icon/slot hint for a contact line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    Linkedin,
    Website,
    /// A website on a known code-hosting domain, shown in its own slot.
    CodeProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactItem {
    pub kind: ContactKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub color: Option<String>,
}

/// One experience, education, or project block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub title: String,
    pub subtitle: Option<String>,
    /// Right-aligned date label, e.g. `"Jan 2020 - Present"`.
    pub date: Option<String>,
    /// Secondary line under the subtitle, e.g. `"GPA: 3.9"`.
    pub note: Option<String>,
    pub body: Option<Box<Node>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Body,
    /// Small caps line under the name (profession).
    Tagline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    /// Vertical stack of children.
    Stack { children: Vec<Node> },
    /// Side-by-side columns; `span` values sum to 24.
    Columns { columns: Vec<Column> },
    /// Accent-filled header block.
    Banner { color: String, children: Vec<Node> },
    Section {
        kind: SectionKind,
        title: Option<Heading>,
        children: Vec<Node>,
    },
    Heading(Heading),
    Text { text: String, role: TextRole },
    Paragraph { text: String },
    Bullets { items: Vec<String> },
    Contacts { items: Vec<ContactItem> },
    /// Items laid out on one line with a visible separator.
    Inline { items: Vec<String>, separator: String },
    /// Items rendered as chips.
    Tags { items: Vec<String> },
    /// Items rendered one per line.
    Lines { items: Vec<String> },
    Avatar { src: Option<String> },
    Divider { color: Option<String> },
    Entry(EntryView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub span: u8,
    pub children: Vec<Node>,
}

impl Node {
    /// Visits this node and every descendant, depth first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        match self {
            Node::Stack { children }
            | Node::Banner { children, .. }
            | Node::Section { children, .. } => {
                for child in children {
                    child.walk(visit);
                }
            }
            Node::Columns { columns } => {
                for column in columns {
                    for child in &column.children {
                        child.walk(visit);
                    }
                }
            }
            Node::Entry(entry) => {
                if let Some(body) = &entry.body {
                    body.walk(visit);
                }
            }
            _ => {}
        }
    }
}
