//! 简历处理上下文
//!
//! 封装"我正在处理第几份简历"这一信息

use std::fmt::Display;

/// 简历处理上下文
#[derive(Debug, Clone)]
pub struct ResumeCtx {
    /// 简历序号（从1开始，仅用于日志显示）
    pub resume_index: usize,

    /// 本批总数
    pub total: usize,

    /// 文件名
    pub file_name: String,
}

impl ResumeCtx {
    pub fn new(resume_index: usize, total: usize, file_name: impl Into<String>) -> Self {
        Self {
            resume_index,
            total,
            file_name: file_name.into(),
        }
    }
}

impl Display for ResumeCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[简历 {}/{} {}]",
            self.resume_index, self.total, self.file_name
        )
    }
}
