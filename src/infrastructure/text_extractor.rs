//! PDF 文本抽取 - 基础设施层
//!
//! 只暴露"把文档变成纯文本"的能力

use crate::error::DocumentError;
use std::path::Path;
use tracing::debug;

/// 文本抽取器
///
/// 职责：
/// - 按页序拼接所有页面的文本
/// - 打开 / 解析失败时返回错误，不伪造空文本
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, DocumentError>;
}

/// 基于 `pdf-extract` 的 PDF 抽取器
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, DocumentError> {
        let text = pdf_extract::extract_text(path).map_err(|e| DocumentError::ExtractionFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        debug!(
            "抽取完成: {} ({} 字符)",
            path.display(),
            text.chars().count()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_extraction_error() {
        let extractor = PdfTextExtractor::new();
        let result = extractor.extract(Path::new("/no/such/resume.pdf"));
        assert!(matches!(
            result,
            Err(DocumentError::ExtractionFailed { .. })
        ));
    }
}
