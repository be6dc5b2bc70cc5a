use std::path::{Path, PathBuf};

/// 待处理的简历文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    pub path: PathBuf,
    pub file_name: String,
}

impl ResumeDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self { path, file_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// 处理失败而被跳过的简历
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub file_name: String,
    pub reason: String,
}
