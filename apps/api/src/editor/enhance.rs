//! Enhancement bookkeeping.
//!
//! Every enhancement request takes a ticket `(field, generation)` before the
//! remote call. When the response arrives it is applied only if the ticket is
//! still the current one for that field. Edits to the field, structural edits
//! of its section, and newer requests for the same field all retire the ticket.

use std::collections::HashMap;

use thiserror::Error;

use crate::editor::prompts::{project_prompt, summary_prompt};
use crate::models::ResumeDocument;
use crate::resume::update::{read_text, ExperienceField, ProjectField};
use crate::resume::{Action, EditError, FieldPath, Section};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnhanceError {
    #[error("Field {0} cannot be enhanced")]
    NotEnhanceable(FieldPath),
    #[error("{0}")]
    Blank(&'static str),
    #[error(transparent)]
    Edit(#[from] EditError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnhancementTicket {
    pub path: FieldPath,
    pub generation: u64,
}

/// What to send to the enhancement service for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancementPlan {
    pub text: String,
    pub prompt_override: Option<String>,
}

/// Builds the request for `path` from the current document.
///
/// Only the summary, experience descriptions, and project descriptions are
/// enhanceable. Blank text is rejected with the editor's warning message.
pub fn plan_enhancement(
    doc: &ResumeDocument,
    path: &FieldPath,
) -> Result<EnhancementPlan, EnhanceError> {
    let blank_message = match path {
        FieldPath::Summary => "Please write a summary to enhance.",
        FieldPath::Experience(_, ExperienceField::Description) => {
            "Please write a description to enhance."
        }
        FieldPath::Project(_, ProjectField::Description) => {
            "Please write a project description to enhance."
        }
        other => return Err(EnhanceError::NotEnhanceable(*other)),
    };

    let text = read_text(doc, path)?
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(EnhanceError::Blank(blank_message))?
        .to_string();

    let prompt_override = match path {
        FieldPath::Summary => Some(summary_prompt(&text)),
        FieldPath::Project(..) => Some(project_prompt(&text)),
        _ => None,
    };

    Ok(EnhancementPlan {
        text,
        prompt_override,
    })
}

#[derive(Debug, Clone, Default)]
pub struct EnhancementTracker {
    next_generation: u64,
    current: HashMap<FieldPath, u64>,
}

impl EnhancementTracker {
    /// Issues a ticket for `path`, retiring any earlier one for the same field.
    pub fn begin(&mut self, path: FieldPath) -> EnhancementTicket {
        self.next_generation += 1;
        self.current.insert(path, self.next_generation);
        EnhancementTicket {
            path,
            generation: self.next_generation,
        }
    }

    pub fn is_current(&self, ticket: &EnhancementTicket) -> bool {
        self.current.get(&ticket.path) == Some(&ticket.generation)
    }

    /// Consumes the ticket. Returns whether the response may be applied.
    pub fn complete(&mut self, ticket: &EnhancementTicket) -> bool {
        if self.is_current(ticket) {
            self.current.remove(&ticket.path);
            true
        } else {
            false
        }
    }

    /// Drops the ticket without applying anything (remote call failed).
    pub fn abandon(&mut self, ticket: &EnhancementTicket) {
        if self.is_current(ticket) {
            self.current.remove(&ticket.path);
        }
    }

    pub fn invalidate(&mut self, path: &FieldPath) {
        self.current.remove(path);
    }

    pub fn invalidate_section(&mut self, section: Section) {
        self.current.retain(|path, _| path.section() != Some(section));
    }

    /// Retires whatever tickets `action` makes stale. Call for every applied edit.
    pub fn observe(&mut self, action: &Action) {
        match action {
            Action::Set { path, .. } => self.invalidate(path),
            Action::Replace { .. } => self.current.clear(),
            other => {
                if let Some(section) = other.restructures() {
                    self.invalidate_section(section);
                }
            }
        }
    }

    /// Fields with an enhancement in flight.
    pub fn pending(&self) -> Vec<FieldPath> {
        let mut paths: Vec<FieldPath> = self.current.keys().copied().collect();
        paths.sort_by_key(|p| p.to_string());
        paths
    }
}
