use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文档读取 / 文本抽取错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 实体识别模型错误
    #[error("实体识别错误: {0}")]
    Recognizer(#[from] RecognizerError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文档相关错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// PDF 无法打开或解析
    #[error("无法抽取文本 ({path}): {source}")]
    ExtractionFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 处理线程异常退出（例如解析库 panic）
    #[error("处理任务异常终止 ({path}): {message}")]
    WorkerAborted { path: String, message: String },
}

/// 实体识别模型错误
#[derive(Debug, Error)]
pub enum RecognizerError {
    /// 模型文件缺失
    #[error("模型文件不存在: {}", .0.display())]
    ModelNotFound(PathBuf),
    /// 模型初始化失败
    #[error("模型初始化失败: {0}")]
    ModelInit(String),
    /// 当前构建未包含所需的后端
    #[error("实体识别后端不可用: {0}")]
    Unavailable(String),
    /// 分词失败
    #[error("分词失败: {0}")]
    Tokenization(String),
    /// 推理失败
    #[error("模型推理失败: {0}")]
    Inference(String),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// TOML 配置文件解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值不合法
    #[error("配置项 {name} 不合法: {reason}")]
    InvalidValue { name: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_layer_prefix() {
        let err = AppError::from(FileError::DirectoryNotFound {
            path: "resumes".to_string(),
        });
        assert_eq!(err.to_string(), "文件错误: 目录不存在: resumes");
    }

    #[test]
    fn test_extraction_failed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad xref");
        let err = AppError::from(DocumentError::ExtractionFailed {
            path: "a.pdf".to_string(),
            source: Box::new(io),
        });
        let AppError::Document(inner) = &err else {
            panic!("应为文档错误");
        };
        assert!(inner.source().is_some());
        assert!(err.to_string().contains("a.pdf"));
    }

    #[test]
    fn test_file_errors_carry_the_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::file_write_failed("out/report.xlsx", io);
        assert!(matches!(
            &err,
            AppError::File(FileError::WriteFailed { path, .. }) if path == "out/report.xlsx"
        ));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AppError::file_read_failed("resume_analyzer.toml", io);
        assert!(err.to_string().contains("resume_analyzer.toml"));
    }
}
