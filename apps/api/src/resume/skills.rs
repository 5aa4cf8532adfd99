//! Skill list editing. Keeps labels unique under case-insensitive comparison.

use thiserror::Error;

use crate::models::SkillEntry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillError {
    #[error("Skill \"{0}\" already added.")]
    Duplicate(String),
}

/// What `add_skill` did with a label that was not a duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillAdded {
    Appended,
    /// The label was empty after trimming; nothing changed.
    Blank,
}

fn same_skill(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Trims `label` and appends it unless it is blank or already present.
pub fn add_skill(skills: &mut Vec<SkillEntry>, label: &str) -> Result<SkillAdded, SkillError> {
    let label = label.trim();
    if label.is_empty() {
        return Ok(SkillAdded::Blank);
    }

    if skills.iter().any(|s| same_skill(&s.name, label)) {
        return Err(SkillError::Duplicate(label.to_string()));
    }

    skills.push(SkillEntry {
        name: label.to_string(),
    });
    Ok(SkillAdded::Appended)
}

/// Removes the skill at `index`. Out-of-range indices are ignored.
pub fn remove_skill(skills: &mut Vec<SkillEntry>, index: usize) -> Option<SkillEntry> {
    (index < skills.len()).then(|| skills.remove(index))
}

/// Drops later duplicates and blank names, keeping first occurrences in order.
/// Applied to documents that arrive from outside the editor (loads, previews).
pub fn dedup_skills(skills: &[SkillEntry]) -> Vec<SkillEntry> {
    let mut kept: Vec<SkillEntry> = Vec::with_capacity(skills.len());
    for skill in skills {
        let _ = add_skill(&mut kept, &skill.name);
    }
    kept
}
