use crate::models::candidate::CandidateRecord;
use crate::models::document::DocumentFailure;

/// 一次批处理的结果
///
/// `records` 的顺序与输入文档顺序一致（跳过失败的文档）。
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub records: Vec<CandidateRecord>,
    pub failures: Vec<DocumentFailure>,
}

impl ResultSet {
    /// 成功处理的数量
    pub fn success_count(&self) -> usize {
        self.records.len()
    }

    /// 失败数量
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// 处理总数
    pub fn total(&self) -> usize {
        self.success_count() + self.failed_count()
    }
}
