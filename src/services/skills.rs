//! 技能与补充信息抽取 - 业务能力层

use crate::services::patterns::{SKILL_VOCABULARY, SUPPORTING_INFO};

/// 词表中出现在文本里的技能（不区分大小写的子串匹配）
///
/// 输出按词表顺序，与文本中的出现顺序无关。
pub fn extract_skills(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lowered.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

/// 证书、课程、实习、项目等关键词的每一次出现（保留重复与原文大小写）
pub fn extract_supporting_info(text: &str) -> Vec<String> {
    SUPPORTING_INFO.find_all(text)
}
