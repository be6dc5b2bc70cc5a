//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量简历处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载简历（Vec<ResumeDocument>）
//! - 分批并发（批大小即并发上限）
//! - 写入报表与失败清单
//!
//! ### `resume_processor` - 单份简历处理器
//! - 在阻塞线程中运行 ResumeFlow
//! - 输出单份简历的日志
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<ResumeDocument>)
//!     ↓
//! resume_processor (处理单份简历)
//!     ↓
//! workflow::ResumeFlow (文本 → 记录)
//!     ↓
//! services (能力层：字段抽取 / 打分 / 报表)
//!     ↓
//! infrastructure (基础设施：PDF 抽取 / 实体识别)
//! ```

pub mod batch_processor;
pub mod resume_processor;

// 重新导出主要类型
pub use batch_processor::{process_resumes, App};
pub use resume_processor::process_resume;
