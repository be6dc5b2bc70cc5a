//! # Resume Analyzer
//!
//! 批量分析 PDF 简历并输出固定 11 列表格的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（PDF 解析库、识别模型），只暴露能力
//! - `TextExtractor` - 把 PDF 变成纯文本
//! - `EntityRecognizer` - 从文本中识别人名 / 机构等实体
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能抽取什么"，每个抽取器只看一段文本
//! - `patterns` - 正则规则与关键词表
//! - `contact` / `education` / `skills` / `identity` - 字段抽取
//! - `experience_scorer` - 经验打分
//! - `ReportWriter` / `FailureLog` - 写报表、写失败清单
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份简历"的完整处理流程
//! - `ResumeCtx` - 上下文封装（序号 + 文件名）
//! - `ResumeFlow` - 流程编排（抽取文本 → 识别实体 → 字段抽取 → 打分）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量简历处理器，管理并发与输出
//! - `orchestrator/resume_processor` - 单份简历处理器
//!
//! ## 实体识别后端与 `onnx-ner` 特性
//!
//! 默认配置 `NER_BACKEND=onnx` 需要编译时开启 `onnx-ner` 特性：
//!
//! ```text
//! cargo run --release --features onnx-ner -- resumes extracted_resume_data.xlsx
//! ```
//!
//! 未开启该特性时，启动阶段返回 `RecognizerError::Unavailable` 并终止，
//! 错误信息会给出上面的编译参数。只需要正则字段时可设置
//! `NER_BACKEND=disabled`，此时姓名与学校两列恒为 `Not found`。
//!
//! ## 输出格式
//!
//! 按输出文件扩展名选择：`.xlsx`（默认）、`.csv`、`.json`，其余扩展名在启动时报错。
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, NerBackend};
pub use error::{AppError, AppResult};
pub use infrastructure::{EntityRecognizer, TextExtractor};
pub use models::{CandidateRecord, Column, ResultSet, ResumeDocument};
pub use orchestrator::{process_resumes, App};
pub use workflow::{ResumeCtx, ResumeFlow};
