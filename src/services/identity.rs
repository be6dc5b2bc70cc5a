//! 姓名与学校抽取 - 业务能力层
//!
//! 唯一依赖实体识别结果的抽取器。

use crate::models::entity::{EntityLabel, EntitySpan};

/// 取第一个人名实体作为姓名、第一个机构实体作为学校
///
/// 这是"首个匹配"而非"最佳匹配"：多个候选时总是选最早出现的，
/// 可能选中简历中提到的公司名而非学校。
pub fn extract_name_and_university(spans: &[EntitySpan]) -> (Option<String>, Option<String>) {
    let first_of = |label: EntityLabel| {
        spans
            .iter()
            .find(|span| span.label == label)
            .map(|span| span.text.clone())
    };

    (
        first_of(EntityLabel::Person),
        first_of(EntityLabel::Organization),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_person_and_first_org() {
        let spans = vec![
            EntitySpan::organization("Acme", 0),
            EntitySpan::person("Jane Doe", 10),
            EntitySpan::person("Bob", 30),
        ];

        let (name, university) = extract_name_and_university(&spans);

        assert_eq!(name.as_deref(), Some("Jane Doe"));
        assert_eq!(university.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_other_labels_are_ignored() {
        let spans = vec![
            EntitySpan::new("Pune", EntityLabel::Location, 0),
            EntitySpan::new("Kaggle", EntityLabel::Miscellaneous, 5),
        ];
        assert_eq!(extract_name_and_university(&spans), (None, None));
    }

    #[test]
    fn test_no_spans() {
        assert_eq!(extract_name_and_university(&[]), (None, None));
    }
}
