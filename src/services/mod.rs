pub mod contact;
pub mod education;
pub mod experience_scorer;
pub mod failure_log;
pub mod identity;
pub mod patterns;
pub mod report_writer;
pub mod skills;

pub use contact::extract_contact;
pub use education::{extract_cgpa_or_percentage, extract_discipline, extract_year_and_course};
pub use experience_scorer::score_experience;
pub use failure_log::FailureLog;
pub use identity::extract_name_and_university;
pub use report_writer::{ReportFormat, ReportWriter};
pub use skills::{extract_skills, extract_supporting_info};
