//! 学历相关字段抽取 - 业务能力层
//!
//! 年份、课程、成绩（CGPA / 百分比）以及学科占位。

use crate::services::patterns::{first_match, CGPA, COURSE, PERCENTAGE, YEAR};

/// 年份与课程，各自独立回退
pub fn extract_year_and_course(text: &str) -> (Option<String>, Option<String>) {
    (YEAR.find(text), COURSE.find(text))
}

/// CGPA 严格优先于百分比，即使两者同时出现
pub fn extract_cgpa_or_percentage(text: &str) -> Option<String> {
    first_match(&[&CGPA, &PERCENTAGE], text)
}

/// 学科：尚未实现，始终返回 `None`
///
/// 扩展点：可在此根据课程或关键词映射到学科分类。
pub fn extract_discipline(_text: &str) -> Option<String> {
    None
}
