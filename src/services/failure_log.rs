//! 失败记录服务 - 业务能力层
//!
//! 只负责"写失败清单"能力，不关心流程

use crate::error::{AppError, AppResult};
use crate::models::document::DocumentFailure;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 失败记录服务
///
/// 职责：
/// - 将无法处理的简历写入失败清单
/// - 只处理单份简历的记录
/// - 不关心流程顺序
pub struct FailureLog {
    log_file_path: String,
}

impl FailureLog {
    /// 使用给定文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            log_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.log_file_path
    }

    /// 清空文件并写入本次运行的时间戳
    pub fn init(&self) -> AppResult<()> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let header = format!("# 简历分析失败清单\n# 生成时间: {}\n\n", timestamp);
        std::fs::write(&self.log_file_path, header)
            .map_err(|e| AppError::file_write_failed(&self.log_file_path, e))
    }

    /// 追加一条失败记录
    pub fn append(&self, failure: &DocumentFailure) -> AppResult<()> {
        debug!("写入失败记录: {} | {}", failure.file_name, failure.reason);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)
            .map_err(|e| AppError::file_write_failed(&self.log_file_path, e))?;

        // 原因可能跨行，压成一行便于 grep
        let reason = failure.reason.replace(['\r', '\n'], " ");
        writeln!(file, "{} | {}", failure.file_name, reason)
            .map_err(|e| AppError::file_write_failed(&self.log_file_path, e))
    }
}
