//! 单份简历处理器 - 编排层
//!
//! 在阻塞线程中运行 [`ResumeFlow`]，并输出单份简历的日志。

use crate::error::DocumentError;
use crate::models::candidate::CandidateRecord;
use crate::models::document::ResumeDocument;
use crate::utils::logging::truncate_text;
use crate::workflow::{ResumeCtx, ResumeFlow};
use tracing::{error, info};

/// 处理单份简历
///
/// # 参数
/// - `flow`: 简历处理流程
/// - `doc`: 待处理的简历
/// - `ctx`: 日志上下文
/// - `verbose`: 是否输出逐字段明细
pub fn process_resume(
    flow: &ResumeFlow,
    doc: &ResumeDocument,
    ctx: &ResumeCtx,
    verbose: bool,
) -> Result<CandidateRecord, DocumentError> {
    info!("{} 📄 开始处理", ctx);

    match flow.run(doc) {
        Ok(record) => {
            log_record(ctx, &record, verbose);
            Ok(record)
        }
        Err(e) => {
            error!("{} ❌ 处理失败: {}", ctx, e);
            Err(e)
        }
    }
}

// ========== 日志辅助函数 ==========

fn log_record(ctx: &ResumeCtx, record: &CandidateRecord, verbose: bool) {
    info!(
        "{} ✓ 完成 | 姓名: {} | GenAI {} | AI/ML {}",
        ctx,
        record.name.as_deref().unwrap_or("-"),
        record.scores.gen_ai,
        record.scores.ai_ml
    );

    if verbose {
        for (column, value) in crate::models::Column::ALL.iter().zip(record.to_row()) {
            info!("{}   {}: {}", ctx, column, truncate_text(&value, 80));
        }
    }
}
