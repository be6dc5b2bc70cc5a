pub mod candidate;
pub mod document;
pub mod entity;
pub mod loaders;
pub mod result_set;

pub use candidate::{
    CandidateRecord, Column, ContactDetails, ExperienceScores, ExperienceTier, NOT_FOUND,
};
pub use document::{DocumentFailure, ResumeDocument};
pub use entity::{EntityLabel, EntitySpan, EntityTag, TagBoundary};
pub use loaders::{is_pdf, load_all_resumes};
pub use result_set::ResultSet;
