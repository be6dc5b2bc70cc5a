//! 规则表
//!
//! 所有正则与关键词表集中在这里，每条规则都可以单独测试。
//! "首个匹配生效"和"按优先级回退"只在 [`first_match`] 中实现。

use crate::models::candidate::{Column, ExperienceTier};
use phf::phf_map;
use regex::Regex;
use std::sync::OnceLock;

/// 单条字段规则：正则 + 取值分组，首次使用时编译
pub struct FieldPattern {
    /// 规则服务的输出列
    pub column: Column,
    pub source: &'static str,
    group: usize,
    compiled: OnceLock<Regex>,
}

impl FieldPattern {
    pub const fn new(column: Column, source: &'static str, group: usize) -> Self {
        Self {
            column,
            source,
            group,
            compiled: OnceLock::new(),
        }
    }

    fn regex(&self) -> &Regex {
        // 规则均为编译期常量，由 test_all_patterns_compile 保证合法
        self.compiled
            .get_or_init(|| Regex::new(self.source).expect("内置正则必须合法"))
    }

    /// 文本中第一个匹配的取值分组
    pub fn find(&self, text: &str) -> Option<String> {
        self.regex()
            .captures(text)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str().to_string())
    }

    /// 所有匹配的取值分组（保留重复，按出现顺序）
    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.regex()
            .captures_iter(text)
            .filter_map(|caps| caps.get(self.group))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// 按优先级依次尝试规则，返回第一个命中的结果
pub fn first_match(rules: &[&FieldPattern], text: &str) -> Option<String> {
    rules.iter().find_map(|rule| rule.find(text))
}

// ========== 正则规则 ==========

pub static EMAIL: FieldPattern = FieldPattern::new(Column::ContactDetails, r"\S+@\S+", 0);

/// 北美 10 位电话，括号与分隔符可选
pub static PHONE: FieldPattern = FieldPattern::new(
    Column::ContactDetails,
    r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
    0,
);

/// 1900–2099 的四位年份
pub static YEAR: FieldPattern = FieldPattern::new(Column::YearOfStudy, r"\b(?:19|20)\d{2}\b", 0);

pub static COURSE: FieldPattern = FieldPattern::new(
    Column::Course,
    r"(?i)(?:B\.?Tech|M\.?Tech|Bachelor|Master|Engineering|Science|Arts)",
    0,
);

pub static CGPA: FieldPattern = FieldPattern::new(
    Column::CgpaOrPercentage,
    r"CGPA[:\s]*([0-9]+(?:\.[0-9]+)?)",
    1,
);

pub static PERCENTAGE: FieldPattern =
    FieldPattern::new(Column::CgpaOrPercentage, r"(\d{1,3}(?:\.\d+)?%)", 1);

pub static SUPPORTING_INFO: FieldPattern = FieldPattern::new(
    Column::SupportingInformation,
    r"(?i)(?:certified|certification|course|internship|project)",
    0,
);

/// 全部正则规则
pub fn all_patterns() -> [&'static FieldPattern; 7] {
    [
        &EMAIL,
        &PHONE,
        &YEAR,
        &COURSE,
        &CGPA,
        &PERCENTAGE,
        &SUPPORTING_INFO,
    ]
}

// ========== 关键词表 ==========

/// 技能词表（输出按此顺序，而非文本顺序）
pub const SKILL_VOCABULARY: [&str; 8] = [
    "Machine Learning",
    "AI",
    "Python",
    "Data Science",
    "TensorFlow",
    "Keras",
    "NLP",
    "Generative AI",
];

/// 生成式 AI 经验信号（小写）
pub static GEN_AI_SIGNALS: phf::Map<&'static str, ExperienceTier> = phf_map! {
    "agentic" => ExperienceTier::Strong,
    "rag" => ExperienceTier::Strong,
    "hands-on" => ExperienceTier::Moderate,
    "project" => ExperienceTier::Moderate,
};

/// AI / 机器学习经验信号（小写）
pub static AI_ML_SIGNALS: phf::Map<&'static str, ExperienceTier> = phf_map! {
    "advanced" => ExperienceTier::Strong,
    "deep learning" => ExperienceTier::Strong,
    "machine learning" => ExperienceTier::Moderate,
};
