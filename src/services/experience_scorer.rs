//! 经验打分 - 业务能力层
//!
//! 关键词存在即计分（不区分大小写的子串），命中多个等级时取最高。

use crate::models::candidate::{ExperienceScores, ExperienceTier};
use crate::services::patterns::{AI_ML_SIGNALS, GEN_AI_SIGNALS};

/// 计算两个维度的经验等级，没有任何信号时为 1
pub fn score_experience(text: &str) -> ExperienceScores {
    let lowered = text.to_lowercase();
    ExperienceScores {
        gen_ai: highest_tier(&lowered, &GEN_AI_SIGNALS),
        ai_ml: highest_tier(&lowered, &AI_ML_SIGNALS),
    }
}

fn highest_tier(lowered: &str, signals: &phf::Map<&'static str, ExperienceTier>) -> ExperienceTier {
    signals
        .entries()
        .filter(|(keyword, _)| lowered.contains(**keyword))
        .map(|(_, tier)| *tier)
        .max()
        .unwrap_or_default()
}
