//! 简历处理流程 - 流程层
//!
//! 核心职责：定义"一份简历"的完整处理流程
//!
//! 流程顺序：
//! 1. 抽取 PDF 文本
//! 2. 实体识别（失败时退化为空结果）
//! 3. 各字段抽取器独立运行
//! 4. 经验打分，组装记录

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::DocumentError;
use crate::infrastructure::{EntityRecognizer, TextExtractor};
use crate::models::candidate::CandidateRecord;
use crate::models::document::ResumeDocument;
use crate::services::{
    extract_cgpa_or_percentage, extract_contact, extract_discipline, extract_name_and_university,
    extract_skills, extract_supporting_info, extract_year_and_course, score_experience,
};

/// 简历处理流程
///
/// - 编排单份简历的处理流程
/// - 通过 trait 对象持有抽取器与识别器，便于替换
/// - 同一段文本多次组装得到相同记录
pub struct ResumeFlow {
    extractor: Arc<dyn TextExtractor>,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl ResumeFlow {
    pub fn new(extractor: Arc<dyn TextExtractor>, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            extractor,
            recognizer,
        }
    }

    /// 处理一份简历：抽取文本后组装记录
    pub fn run(&self, doc: &ResumeDocument) -> Result<CandidateRecord, DocumentError> {
        let text = self.extractor.extract(doc.path())?;
        debug!("{} 文本长度: {}", doc.file_name, text.chars().count());
        Ok(self.assemble(&text))
    }

    /// 从纯文本组装候选人记录
    pub fn assemble(&self, text: &str) -> CandidateRecord {
        let spans = match self.recognizer.recognize(text) {
            Ok(spans) => spans,
            Err(e) => {
                warn!("⚠️ 实体识别失败，姓名与学校将记为未找到: {}", e);
                Vec::new()
            }
        };

        let (name, university) = extract_name_and_university(&spans);
        let (year_of_study, course) = extract_year_and_course(text);

        CandidateRecord {
            name,
            contact: extract_contact(text),
            university,
            year_of_study,
            course,
            discipline: extract_discipline(text),
            cgpa_or_percentage: extract_cgpa_or_percentage(text),
            key_skills: extract_skills(text),
            scores: score_experience(text),
            supporting_info: extract_supporting_info(text),
        }
    }
}
