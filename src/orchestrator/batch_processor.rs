//! 批量简历处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量简历的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：加载实体识别模型，模型不可用时直接终止
//! 2. **批量加载**：扫描目录下所有 PDF（`Vec<ResumeDocument>`）
//! 3. **分批并发**：每批最多 `max_concurrent` 份同时解析，整批完成后再开始下一批
//! 4. **结果汇总**：结果按输入顺序汇总，失败文档单独记录
//! 5. **输出报表**：写入表格文件与失败清单

use crate::config::Config;
use crate::error::{AppResult, DocumentError};
use crate::infrastructure::{build_recognizer, PdfTextExtractor};
use crate::models::candidate::CandidateRecord;
use crate::models::document::{DocumentFailure, ResumeDocument};
use crate::models::result_set::ResultSet;
use crate::orchestrator::resume_processor;
use crate::services::{FailureLog, ReportWriter};
use crate::utils::logging;
use crate::workflow::{ResumeCtx, ResumeFlow};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    flow: Arc<ResumeFlow>,
    failure_log: FailureLog,
}

impl App {
    /// 初始化应用
    ///
    /// 识别模型加载失败是致命错误，此时不会处理任何文档。
    pub async fn initialize(config: Config) -> AppResult<Self> {
        logging::log_startup(&config);

        info!("🧠 正在加载实体识别模型 ({:?})...", config.ner_backend);
        let recognizer = build_recognizer(&config)?;
        info!("✓ 实体识别模型就绪");

        let flow = ResumeFlow::new(Arc::new(PdfTextExtractor::new()), recognizer);
        Ok(Self::with_flow(config, flow))
    }

    /// 使用现成的流程创建（便于替换抽取器或识别器）
    pub fn with_flow(config: Config, flow: ResumeFlow) -> Self {
        let failure_log = FailureLog::with_path(&config.failure_log_file);
        Self {
            config,
            flow: Arc::new(flow),
            failure_log,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<ResultSet> {
        self.failure_log.init()?;

        let documents = self.load_resumes().await?;
        if documents.is_empty() {
            warn!("⚠️ 没有找到待处理的PDF文件，将输出只有表头的报表");
        } else {
            logging::log_resumes_loaded(documents.len(), self.config.max_concurrent_resumes);
        }

        let result = process_resumes(
            self.flow.clone(),
            documents,
            self.config.max_concurrent_resumes,
            self.config.verbose_logging,
        )
        .await;

        for failure in &result.failures {
            warn!("⚠️ 已跳过 {}: {}", failure.file_name, failure.reason);
            self.failure_log.append(failure)?;
        }

        ReportWriter::new(&self.config.output_file)?.write(&result)?;

        logging::print_final_stats(
            result.success_count(),
            result.failed_count(),
            result.total(),
            &self.config.output_file,
            self.failure_log.path(),
        );

        Ok(result)
    }

    async fn load_resumes(&self) -> AppResult<Vec<ResumeDocument>> {
        info!("\n📁 正在扫描待处理的简历...");
        crate::models::load_all_resumes(&self.config.resume_folder).await
    }
}

/// 批量处理简历
///
/// 批大小即并发上限；返回的记录顺序与 `documents` 一致，
/// 失败的文档记入 `failures` 后跳过。
pub async fn process_resumes(
    flow: Arc<ResumeFlow>,
    documents: Vec<ResumeDocument>,
    max_concurrent: usize,
    verbose: bool,
) -> ResultSet {
    let max_concurrent = max_concurrent.max(1);
    let total = documents.len();
    let total_batches = total.div_ceil(max_concurrent);
    let progress = new_progress_bar(total);
    let mut result = ResultSet::default();

    // 分批处理
    for batch_start in (0..total).step_by(max_concurrent) {
        let batch_end = (batch_start + max_concurrent).min(total);
        let batch_num = batch_start / max_concurrent + 1;

        logging::log_batch_start(batch_num, total_batches, batch_start + 1, batch_end, total);

        let outcomes = process_batch(
            &flow,
            &documents[batch_start..batch_end],
            batch_start,
            total,
            verbose,
        )
        .await;

        let mut batch_success = 0;
        let mut batch_failed = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(record) => {
                    batch_success += 1;
                    result.records.push(record);
                }
                Err(failure) => {
                    batch_failed.push(failure.file_name.clone());
                    result.failures.push(failure);
                }
            }
            progress.inc(1);
        }

        logging::log_batch_complete(
            batch_num,
            batch_success,
            batch_end - batch_start,
            &batch_failed,
        );
    }

    progress.finish_and_clear();
    result
}

/// 处理单个批次，结果按批内顺序返回
async fn process_batch(
    flow: &Arc<ResumeFlow>,
    batch: &[ResumeDocument],
    batch_start: usize,
    total: usize,
    verbose: bool,
) -> Vec<Result<CandidateRecord, DocumentFailure>> {
    let mut batch_handles = Vec::with_capacity(batch.len());

    for (idx, doc) in batch.iter().enumerate() {
        let ctx = ResumeCtx::new(batch_start + idx + 1, total, &doc.file_name);
        let flow = flow.clone();
        let doc = doc.clone();
        let task_ctx = ctx.clone();

        // PDF 解析是 CPU 密集的同步调用
        let handle = tokio::task::spawn_blocking(move || {
            resume_processor::process_resume(&flow, &doc, &task_ctx, verbose)
        });
        batch_handles.push((ctx, handle));
    }

    // 等待本批所有任务完成
    let mut outcomes = Vec::with_capacity(batch_handles.len());

    for (ctx, handle) in batch_handles {
        let outcome = match handle.await {
            Ok(Ok(record)) => Ok(record),
            Ok(Err(e)) => Err(failure_of(&ctx, &e)),
            Err(join_error) => {
                error!("{} 任务执行失败: {}", ctx, join_error);
                let aborted = DocumentError::WorkerAborted {
                    path: ctx.file_name.clone(),
                    message: join_error.to_string(),
                };
                Err(failure_of(&ctx, &aborted))
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}

fn failure_of(ctx: &ResumeCtx, error: &DocumentError) -> DocumentFailure {
    DocumentFailure {
        file_name: ctx.file_name.clone(),
        reason: error.to_string(),
    }
}

fn new_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    progress.set_message("简历");
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{FixedRecognizer, TextExtractor};
    use crate::error::AppError;
    use crate::models::entity::EntitySpan;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// 以文件名为文本；文件名含 "broken" 时抽取失败，含 "panic" 时直接 panic
    struct FileNameExtractor;

    impl TextExtractor for FileNameExtractor {
        fn extract(&self, path: &Path) -> Result<String, DocumentError> {
            let name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            if name.contains("panic") {
                panic!("parser blew up");
            }
            if name.contains("broken") {
                return Err(DocumentError::ExtractionFailed {
                    path: name,
                    source: "bad xref table".into(),
                });
            }
            Ok(format!("{} CGPA: 7.5", name))
        }
    }

    fn flow() -> Arc<ResumeFlow> {
        Arc::new(ResumeFlow::new(
            Arc::new(FileNameExtractor),
            Arc::new(FixedRecognizer::new(vec![EntitySpan::person("Jane Doe", 0)])),
        ))
    }

    fn docs(names: &[&str]) -> Vec<ResumeDocument> {
        names.iter().map(|n| ResumeDocument::new(*n)).collect()
    }

    #[tokio::test]
    async fn test_preserves_input_order() {
        let names = ["a 2021.pdf", "b 2022.pdf", "c 2023.pdf", "d 2024.pdf", "e 2025.pdf"];
        let result = process_resumes(flow(), docs(&names), 2, false).await;

        let years: Vec<_> = result
            .records
            .iter()
            .map(|r| r.year_of_study.clone().unwrap())
            .collect();
        assert_eq!(years, vec!["2021", "2022", "2023", "2024", "2025"]);
        assert_eq!(result.failed_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_document_is_skipped() {
        let names = ["ok.pdf", "broken.pdf", "fine.pdf"];
        let result = process_resumes(flow(), docs(&names), 1, false).await;

        assert_eq!(result.success_count(), 2);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].file_name, "broken.pdf");
        assert!(result.failures[0].reason.contains("bad xref table"));
    }

    #[tokio::test]
    async fn test_worker_panic_becomes_failure() {
        let result = process_resumes(flow(), docs(&["panic.pdf", "ok.pdf"]), 2, false).await;

        assert_eq!(result.success_count(), 1);
        assert_eq!(result.failures[0].file_name, "panic.pdf");
    }

    /// 记录同时处于抽取中的文档数峰值
    struct PeakExtractor {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl TextExtractor for PeakExtractor {
        fn extract(&self, _path: &Path) -> Result<String, DocumentError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_batch_size_bounds_parallelism() {
        let extractor = Arc::new(PeakExtractor {
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let flow = Arc::new(ResumeFlow::new(
            extractor.clone(),
            Arc::new(FixedRecognizer::new(Vec::new())),
        ));

        let names = ["1.pdf", "2.pdf", "3.pdf", "4.pdf", "5.pdf"];
        let result = process_resumes(flow, docs(&names), 2, false).await;

        assert_eq!(result.success_count(), 5);
        let peak = extractor.peak.load(Ordering::SeqCst);
        assert!((1..=2).contains(&peak), "peak = {}", peak);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let result = process_resumes(flow(), Vec::new(), 4, false).await;
        assert_eq!(result.total(), 0);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_treated_as_one() {
        let result = process_resumes(flow(), docs(&["a.pdf"]), 0, false).await;
        assert_eq!(result.success_count(), 1);
    }

    #[tokio::test]
    async fn test_app_run_writes_report_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join("jane.pdf"), b"%PDF").unwrap();
        std::fs::write(input.join("broken.pdf"), b"%PDF").unwrap();
        std::fs::write(input.join("notes.txt"), b"skip me").unwrap();

        let output = dir.path().join("out.csv");
        let failures = dir.path().join("failed.txt");
        let config = Config {
            resume_folder: input.to_string_lossy().to_string(),
            output_file: output.to_string_lossy().to_string(),
            failure_log_file: failures.to_string_lossy().to_string(),
            ..Default::default()
        };
        let flow = ResumeFlow::new(
            Arc::new(FileNameExtractor),
            Arc::new(FixedRecognizer::new(Vec::new())),
        );

        let result = App::with_flow(config, flow).run().await.unwrap();

        assert_eq!(result.success_count(), 1);
        assert_eq!(std::fs::read_to_string(&output).unwrap().lines().count(), 2);
        assert!(std::fs::read_to_string(&failures)
            .unwrap()
            .contains("broken.pdf | "));
    }

    #[tokio::test]
    async fn test_missing_folder_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            resume_folder: dir.path().join("nope").to_string_lossy().to_string(),
            output_file: dir.path().join("out.csv").to_string_lossy().to_string(),
            failure_log_file: dir.path().join("f.txt").to_string_lossy().to_string(),
            ..Default::default()
        };
        let flow = ResumeFlow::new(
            Arc::new(FileNameExtractor),
            Arc::new(FixedRecognizer::new(Vec::new())),
        );

        let result = App::with_flow(config, flow).run().await;
        assert!(matches!(result, Err(AppError::File(_))));
    }
}
