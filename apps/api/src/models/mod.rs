pub mod resume;

pub use resume::{
    filled, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDocument,
    SkillEntry,
};
