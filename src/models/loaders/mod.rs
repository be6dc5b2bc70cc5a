pub mod resume_loader;

pub use resume_loader::{is_pdf, load_all_resumes};
