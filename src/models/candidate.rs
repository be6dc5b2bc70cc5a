//! 候选人记录：固定 11 列的输出模型
//!
//! 内部使用 `Option` 表示"未找到"，只在序列化边界上转换为 `"Not found"`。

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// 未找到时对外展示的占位值
pub const NOT_FOUND: &str = "Not found";

/// 输出表格的列（顺序即兼容性契约）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    ContactDetails,
    University,
    YearOfStudy,
    Course,
    Discipline,
    CgpaOrPercentage,
    KeySkills,
    GenAiExperienceScore,
    AiMlExperienceScore,
    SupportingInformation,
}

impl Column {
    /// 列数
    pub const COUNT: usize = 11;

    /// 所有列，按输出顺序排列
    pub const ALL: [Column; Column::COUNT] = [
        Column::Name,
        Column::ContactDetails,
        Column::University,
        Column::YearOfStudy,
        Column::Course,
        Column::Discipline,
        Column::CgpaOrPercentage,
        Column::KeySkills,
        Column::GenAiExperienceScore,
        Column::AiMlExperienceScore,
        Column::SupportingInformation,
    ];

    /// 表头名称
    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::ContactDetails => "Contact Details",
            Column::University => "University",
            Column::YearOfStudy => "Year of Study",
            Column::Course => "Course",
            Column::Discipline => "Discipline",
            Column::CgpaOrPercentage => "CGPA/Percentage",
            Column::KeySkills => "Key Skills",
            Column::GenAiExperienceScore => "Gen AI Experience Score",
            Column::AiMlExperienceScore => "AI/ML Experience Score",
            Column::SupportingInformation => "Supporting Information",
        }
    }

    /// 完整表头行
    pub fn headers() -> [&'static str; Column::COUNT] {
        Column::ALL.map(Column::header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// 经验等级（1 = 基础，2 = 有一定信号，3 = 信号强烈）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ExperienceTier {
    #[default]
    Baseline = 1,
    Moderate = 2,
    Strong = 3,
}

impl ExperienceTier {
    /// 数值分数
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// 两个维度的经验分数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExperienceScores {
    /// 生成式 AI 经验
    pub gen_ai: ExperienceTier,
    /// AI / 机器学习经验
    pub ai_ml: ExperienceTier,
}

/// 联系方式
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl fmt::Display for ContactDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Email: {}, Phone: {}",
            self.email.as_deref().unwrap_or(NOT_FOUND),
            self.phone.as_deref().unwrap_or(NOT_FOUND)
        )
    }
}

/// 单份简历的抽取结果
///
/// 创建后不再修改；通过 [`CandidateRecord::to_row`] 渲染为固定 11 列。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateRecord {
    pub name: Option<String>,
    pub contact: ContactDetails,
    pub university: Option<String>,
    pub year_of_study: Option<String>,
    pub course: Option<String>,
    pub discipline: Option<String>,
    pub cgpa_or_percentage: Option<String>,
    /// 按词表顺序排列的技能
    pub key_skills: Vec<String>,
    pub scores: ExperienceScores,
    /// 保留重复项，按文本出现顺序排列
    pub supporting_info: Vec<String>,
}

impl CandidateRecord {
    /// 渲染单列的展示值
    pub fn value(&self, column: Column) -> String {
        match column {
            Column::Name => display_or_not_found(self.name.as_deref()),
            Column::ContactDetails => self.contact.to_string(),
            Column::University => display_or_not_found(self.university.as_deref()),
            Column::YearOfStudy => display_or_not_found(self.year_of_study.as_deref()),
            Column::Course => display_or_not_found(self.course.as_deref()),
            Column::Discipline => display_or_not_found(self.discipline.as_deref()),
            Column::CgpaOrPercentage => display_or_not_found(self.cgpa_or_percentage.as_deref()),
            Column::KeySkills => join_or_not_found(&self.key_skills),
            Column::GenAiExperienceScore => self.scores.gen_ai.to_string(),
            Column::AiMlExperienceScore => self.scores.ai_ml.to_string(),
            Column::SupportingInformation => join_or_not_found(&self.supporting_info),
        }
    }

    /// 渲染为一整行（列数由类型保证）
    pub fn to_row(&self) -> [String; Column::COUNT] {
        Column::ALL.map(|column| self.value(column))
    }
}

/// 按列顺序序列化为有序对象，分数保留为数字
impl Serialize for CandidateRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Column::COUNT))?;
        for column in Column::ALL {
            match column {
                Column::GenAiExperienceScore => {
                    map.serialize_entry(column.header(), &self.scores.gen_ai.value())?
                }
                Column::AiMlExperienceScore => {
                    map.serialize_entry(column.header(), &self.scores.ai_ml.value())?
                }
                _ => map.serialize_entry(column.header(), &self.value(column))?,
            }
        }
        map.end()
    }
}

fn display_or_not_found(value: Option<&str>) -> String {
    value.unwrap_or(NOT_FOUND).to_string()
}

fn join_or_not_found(values: &[String]) -> String {
    if values.is_empty() {
        NOT_FOUND.to_string()
    } else {
        values.join(", ")
    }
}
