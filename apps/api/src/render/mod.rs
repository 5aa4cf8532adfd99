// Template rendering: turns a ResumeDocument into a presentational view tree.
// Rendering is pure. The caller supplies "today" so ongoing roles sort stably.

pub mod classic;
pub mod common;
pub mod handlers;
pub mod minimal;
pub mod minimal_image;
pub mod modern;
pub mod view;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ResumeDocument;
pub use common::RenderContext;
pub use view::Node;

pub const DEFAULT_ACCENT_COLOR: &str = "#3b82f6";

/// Swatches offered by the accent picker. Any other color string is also accepted.
pub const ACCENT_PRESETS: &[&str] = &["#3b82f6", "#10b981", "#ef4444", "#f97316", "#8b5cf6"];

/// The four résumé designs. Unknown ids fall back to `Classic`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Variant {
    #[default]
    Classic,
    Modern,
    MinimalImage,
    Minimal,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Classic,
        Variant::Modern,
        Variant::MinimalImage,
        Variant::Minimal,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Modern => "modern",
            Variant::MinimalImage => "minimalImage",
            Variant::Minimal => "minimal",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Modern => "Modern",
            Variant::MinimalImage => "Minimal Image",
            Variant::Minimal => "Minimal",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Variant::Classic => {
                "A clean, traditional resume format with clear sections and professional typography."
            }
            Variant::Modern => "Sleek design with strategic use of color and modern font choices.",
            Variant::MinimalImage => "Minimal design with a single image and clean typography.",
            Variant::Minimal => "Ultra-clean design that puts your content front and center.",
        }
    }

    /// Resolves a template id. Anything unrecognised renders as `Classic`.
    pub fn from_id(id: &str) -> Self {
        match id.trim() {
            "modern" => Variant::Modern,
            "minimalImage" | "minimal-image" | "minimal_image" => Variant::MinimalImage,
            "minimal" => Variant::Minimal,
            "classic" => Variant::Classic,
            _ => Variant::Classic,
        }
    }

    fn layout(self) -> &'static dyn Layout {
        match self {
            Variant::Classic => &classic::ClassicLayout,
            Variant::Modern => &modern::ModernLayout,
            Variant::MinimalImage => &minimal_image::MinimalImageLayout,
            Variant::Minimal => &minimal::MinimalLayout,
        }
    }
}

impl From<String> for Variant {
    fn from(id: String) -> Self {
        Variant::from_id(&id)
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.id().to_string()
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Catalogue entry served to the template picker.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub fn catalogue() -> Vec<TemplateInfo> {
    Variant::ALL
        .iter()
        .map(|v| TemplateInfo {
            id: v.id(),
            name: v.display_name(),
            description: v.description(),
        })
        .collect()
}

/// One résumé design. Implementations only arrange nodes; ordering and
/// placeholder rules live in `common`.
pub trait Layout: Send + Sync {
    fn compose(&self, ctx: &RenderContext<'_>) -> Node;
}

/// A rendered résumé ready to hand to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewTree {
    pub variant: Variant,
    pub accent_color: String,
    pub root: Node,
}

/// Falls back to the default accent when `accent` is blank.
pub fn resolve_accent(accent: Option<&str>) -> &str {
    accent
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_ACCENT_COLOR)
}

pub fn render_at(
    doc: &ResumeDocument,
    accent: Option<&str>,
    variant: Variant,
    today: NaiveDate,
) -> ViewTree {
    let accent = resolve_accent(accent);
    let ctx = RenderContext::new(doc, accent, today);
    ViewTree {
        variant,
        accent_color: accent.to_string(),
        root: variant.layout().compose(&ctx),
    }
}

pub fn render(doc: &ResumeDocument, accent: Option<&str>, variant: Variant) -> ViewTree {
    render_at(doc, accent, variant, Utc::now().date_naive())
}

/// Renders by template id string, as received from clients.
pub fn render_by_id(doc: &ResumeDocument, accent: Option<&str>, template_id: &str) -> ViewTree {
    render(doc, accent, Variant::from_id(template_id))
}
