pub mod resume_ctx;
pub mod resume_flow;

pub use resume_ctx::ResumeCtx;
pub use resume_flow::ResumeFlow;
