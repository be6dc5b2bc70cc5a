use serde::{Deserialize, Serialize};

/// 实体类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Miscellaneous,
}

impl EntityLabel {
    /// 从 CoNLL 标签后缀解析（`PER` / `ORG` / `LOC` / `MISC`）
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "PER" => Some(EntityLabel::Person),
            "ORG" => Some(EntityLabel::Organization),
            "LOC" => Some(EntityLabel::Location),
            "MISC" => Some(EntityLabel::Miscellaneous),
            _ => None,
        }
    }
}

/// 标签在实体中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagBoundary {
    /// `B-`：实体开头
    Begin,
    /// `I-`：实体内部
    Inside,
}

/// 解析后的单个 token 标签，例如 `B-PER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityTag {
    pub boundary: TagBoundary,
    pub label: EntityLabel,
}

impl EntityTag {
    /// 解析 `B-PER` / `I-ORG` 形式的标签，`O` 与未知标签返回 `None`
    pub fn parse(tag: &str) -> Option<Self> {
        let (prefix, suffix) = tag.split_once('-')?;
        let boundary = match prefix {
            "B" => TagBoundary::Begin,
            "I" => TagBoundary::Inside,
            _ => return None,
        };
        let label = EntityLabel::from_suffix(suffix)?;
        Some(Self { boundary, label })
    }
}

/// 识别出的实体片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// 实体文本
    pub text: String,
    /// 实体类别
    pub label: EntityLabel,
    /// 在原文中的起始字节位置
    pub position: usize,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, label: EntityLabel, position: usize) -> Self {
        Self {
            text: text.into(),
            label,
            position,
        }
    }

    pub fn person(text: impl Into<String>, position: usize) -> Self {
        Self::new(text, EntityLabel::Person, position)
    }

    pub fn organization(text: impl Into<String>, position: usize) -> Self {
        Self::new(text, EntityLabel::Organization, position)
    }
}
