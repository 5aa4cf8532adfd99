// Résumé document rules: ordering, skill dedup, submit checks, and the reducer.
// Everything here is synchronous and pure; no I/O.

pub mod chronology;
pub mod skills;
pub mod update;
pub mod validation;

pub use update::{reduce, Action, EditError, FieldPath, FieldValue, Section};
