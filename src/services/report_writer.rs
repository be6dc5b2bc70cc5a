//! 报表写入服务 - 业务能力层
//!
//! 只负责把结果集写成表格文件，不关心流程

use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::models::candidate::{CandidateRecord, Column};
use crate::models::result_set::ResultSet;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 输出格式（由文件扩展名决定）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ReportFormat {
    /// 按扩展名（不区分大小写）选择格式，不认识的扩展名直接拒绝
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("xlsx") => Ok(ReportFormat::Xlsx),
            Some("csv") => Ok(ReportFormat::Csv),
            Some("json") => Ok(ReportFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                name: "output_file".to_string(),
                reason: format!(
                    "不支持的输出格式: {}（可选 .xlsx / .csv / .json）",
                    path.display()
                ),
            }),
        }
    }
}

/// 报表写入服务
///
/// 职责：
/// - 表头固定为 11 列，顺序不变
/// - 写入失败直接返回错误，由调用方终止运行
pub struct ReportWriter {
    output_path: String,
    format: ReportFormat,
}

impl ReportWriter {
    pub fn new(output_path: impl Into<String>) -> AppResult<Self> {
        let output_path = output_path.into();
        let format = ReportFormat::from_path(Path::new(&output_path))?;
        Ok(Self {
            output_path,
            format,
        })
    }

    /// 写入全部记录
    pub fn write(&self, result: &ResultSet) -> AppResult<()> {
        debug!(
            "写入报表: {} ({:?}, {} 行)",
            self.output_path,
            self.format,
            result.records.len()
        );

        match self.format {
            ReportFormat::Xlsx => self
                .write_xlsx(result)
                .map_err(|e| BoxError::from(e.to_string())),
            ReportFormat::Csv => self.write_csv(result),
            ReportFormat::Json => self.write_json(result),
        }
        .map_err(|source| {
            AppError::File(FileError::WriteFailed {
                path: self.output_path.clone(),
                source,
            })
        })?;

        info!("✓ 数据已保存至 {}", self.output_path);
        Ok(())
    }

    /// 首行加粗表头，两列分数写为数字单元格
    fn write_xlsx(&self, result: &ResultSet) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Resumes")?;

        for (col, column) in Column::ALL.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, column.header(), &header_format)?;
        }

        for (idx, record) in result.records.iter().enumerate() {
            let row = idx as u32 + 1;
            for (col, column) in Column::ALL.iter().enumerate() {
                let col = col as u16;
                match score_cell(record, *column) {
                    Some(score) => sheet.write_number(row, col, score)?,
                    None => sheet.write_string(row, col, record.value(*column))?,
                };
            }
        }

        sheet.autofit();
        workbook.save(&self.output_path)
    }

    fn write_csv(&self, result: &ResultSet) -> Result<(), BoxError> {
        let mut writer = csv::Writer::from_path(&self.output_path)?;
        writer.write_record(Column::headers())?;
        for record in &result.records {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_json(&self, result: &ResultSet) -> Result<(), BoxError> {
        let file = File::create(&self.output_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &result.records)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

fn score_cell(record: &CandidateRecord, column: Column) -> Option<f64> {
    match column {
        Column::GenAiExperienceScore => Some(f64::from(record.scores.gen_ai.value())),
        Column::AiMlExperienceScore => Some(f64::from(record.scores.ai_ml.value())),
        _ => None,
    }
}
