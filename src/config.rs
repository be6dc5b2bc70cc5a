use crate::error::{AppError, AppResult, ConfigError};
use crate::services::ReportFormat;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "resume_analyzer.toml";

/// 实体识别后端
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NerBackend {
    /// 本地 ONNX 模型
    Onnx,
    /// 不做实体识别
    Disabled,
}

impl FromStr for NerBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onnx" => Ok(NerBackend::Onnx),
            "disabled" | "none" | "off" => Ok(NerBackend::Disabled),
            _ => Err(()),
        }
    }
}

/// 程序配置
///
/// 优先级（低 → 高）：默认值 → TOML 文件 → 环境变量 → 命令行参数
#[derive(Clone, Debug)]
pub struct Config {
    /// 简历 PDF 所在目录
    pub resume_folder: String,
    /// 输出表格路径（按扩展名选择 `.xlsx` / `.csv` / `.json`）
    pub output_file: String,
    /// 实体识别后端
    pub ner_backend: NerBackend,
    /// 模型目录（model.onnx / tokenizer.json / config.json）
    pub ner_model_dir: String,
    /// 同时处理的简历数量
    pub max_concurrent_resumes: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 失败简历记录文件
    pub failure_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resume_folder: "resumes".to_string(),
            output_file: "extracted_resume_data.xlsx".to_string(),
            ner_backend: NerBackend::Onnx,
            ner_model_dir: "models/bert-large-cased-finetuned-conll03-english".to_string(),
            max_concurrent_resumes: 1,
            verbose_logging: false,
            failure_log_file: "failed_resumes.txt".to_string(),
        }
    }
}

/// TOML 文件中的可选项
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    resume_folder: Option<String>,
    output_file: Option<String>,
    ner_backend: Option<NerBackend>,
    ner_model_dir: Option<String>,
    max_concurrent_resumes: Option<usize>,
    verbose_logging: Option<bool>,
    failure_log_file: Option<String>,
}

impl Config {
    /// 加载完整配置
    ///
    /// `args` 为去掉程序名后的命令行参数：`[输入目录] [输出文件]`
    pub fn load(args: impl IntoIterator<Item = String>) -> AppResult<Self> {
        Self::load_from(args, |name| std::env::var(name).ok())
    }

    /// 同 [`Config::load`]，环境变量改由 `vars` 提供
    pub fn load_from(
        args: impl IntoIterator<Item = String>,
        vars: impl Fn(&str) -> Option<String>,
    ) -> AppResult<Self> {
        let config_path =
            vars("RESUME_ANALYZER_CONFIG").unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let config = if Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| AppError::file_read_failed(&config_path, e))?;
            Self::from_toml_str(&content, &config_path)?
        } else {
            Self::default()
        };

        config.with_vars(&vars)?.with_args(args).validated()
    }

    /// 在默认值基础上应用 TOML 内容
    pub fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        let file: FileConfig =
            toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.to_string(),
                source,
            })?;

        let default = Self::default();
        Ok(Self {
            resume_folder: file.resume_folder.unwrap_or(default.resume_folder),
            output_file: file.output_file.unwrap_or(default.output_file),
            ner_backend: file.ner_backend.unwrap_or(default.ner_backend),
            ner_model_dir: file.ner_model_dir.unwrap_or(default.ner_model_dir),
            max_concurrent_resumes: file
                .max_concurrent_resumes
                .unwrap_or(default.max_concurrent_resumes),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
            failure_log_file: file.failure_log_file.unwrap_or(default.failure_log_file),
        })
    }

    /// 应用环境变量（由 `vars` 查询）
    pub fn with_vars(self, vars: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        Ok(Self {
            resume_folder: vars("RESUME_FOLDER").unwrap_or(self.resume_folder),
            output_file: vars("OUTPUT_FILE").unwrap_or(self.output_file),
            ner_backend: parse_var(&vars, "NER_BACKEND", "onnx | disabled")?
                .unwrap_or(self.ner_backend),
            ner_model_dir: vars("NER_MODEL_DIR").unwrap_or(self.ner_model_dir),
            max_concurrent_resumes: parse_var(&vars, "MAX_CONCURRENT_RESUMES", "usize")?
                .unwrap_or(self.max_concurrent_resumes),
            verbose_logging: parse_flag(&vars, "VERBOSE_LOGGING")?
                .unwrap_or(self.verbose_logging),
            failure_log_file: vars("FAILURE_LOG_FILE").unwrap_or(self.failure_log_file),
        })
    }

    /// 应用位置参数：第一个为输入目录，第二个为输出文件
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        let mut args = args.into_iter();
        if let Some(folder) = args.next() {
            self.resume_folder = folder;
        }
        if let Some(output) = args.next() {
            self.output_file = output;
        }
        self
    }

    /// 校验取值范围
    pub fn validated(self) -> AppResult<Self> {
        if self.max_concurrent_resumes == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_concurrent_resumes".to_string(),
                reason: "必须大于 0".to_string(),
            }
            .into());
        }
        if self.output_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "output_file".to_string(),
                reason: "不能为空".to_string(),
            }
            .into());
        }
        // 输出格式在启动时确定，避免处理完才发现写不了
        ReportFormat::from_path(Path::new(&self.output_file))?;
        Ok(self)
    }
}

/// 读取并解析环境变量；未设置时返回 `None`
fn parse_var<T: FromStr>(
    vars: impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
) -> AppResult<Option<T>> {
    match vars(var_name) {
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        None => Ok(None),
    }
}

/// 布尔开关：接受 true/false、1/0、yes/no、on/off（不区分大小写）
fn parse_flag(vars: impl Fn(&str) -> Option<String>, var_name: &str) -> AppResult<Option<bool>> {
    let Some(value) = vars(var_name) else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: "bool (true/false/1/0)".to_string(),
        }
        .into()),
    }
}
