//! 实体识别器 - 基础设施层
//!
//! 持有唯一的模型资源（进程启动时加载一次），只暴露 `recognize()` 能力。
//! 模型输出是近似结果，调用方必须容忍零个实体。

use crate::config::{Config, NerBackend};
use crate::error::RecognizerError;
use crate::models::entity::{EntitySpan, EntityTag, TagBoundary};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// 实体识别器
///
/// 实现必须支持并发的只读调用（`&self`）。
pub trait EntityRecognizer: Send + Sync {
    /// 返回按原文位置排序的实体片段
    fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, RecognizerError>;
}

/// 带标签的单个 token（字节偏移）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedToken {
    /// `None` 表示 `O` 或未知标签
    pub tag: Option<EntityTag>,
    pub start: usize,
    pub end: usize,
    /// WordPiece 续接片段（`##xx`）
    pub is_continuation: bool,
}

/// 把逐 token 标签合并为实体片段
///
/// - `B-X` 开启新实体，紧随其后的 `I-X` 并入该实体
/// - 续接片段总是并入当前实体
/// - 没有对应开头的 `I-X`、`O` 以及未知标签都会被忽略
pub fn decode_spans(text: &str, tokens: &[TaggedToken]) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut current: Option<(EntityTag, usize, usize)> = None;

    for token in tokens {
        if token.is_continuation {
            if let Some((_, _, end)) = current.as_mut() {
                *end = token.end;
            }
            continue;
        }

        match token.tag {
            Some(tag) if tag.boundary == TagBoundary::Begin => {
                flush_span(text, current.take(), &mut spans);
                current = Some((tag, token.start, token.end));
            }
            Some(tag) => {
                let continues = matches!(current, Some((open, _, _)) if open.label == tag.label);
                if continues {
                    if let Some((_, _, end)) = current.as_mut() {
                        *end = token.end;
                    }
                } else {
                    flush_span(text, current.take(), &mut spans);
                }
            }
            None => flush_span(text, current.take(), &mut spans),
        }
    }
    flush_span(text, current, &mut spans);

    spans
}

fn flush_span(text: &str, open: Option<(EntityTag, usize, usize)>, spans: &mut Vec<EntitySpan>) {
    let Some((tag, start, end)) = open else {
        return;
    };
    if let Some(slice) = text.get(start..end) {
        let trimmed = slice.trim();
        if !trimmed.is_empty() {
            spans.push(EntitySpan::new(trimmed, tag.label, start));
        }
    }
}

// ========== 模型输出解析 ==========

/// HuggingFace `config.json` 中用到的部分
#[cfg_attr(not(feature = "onnx-ner"), allow(dead_code))]
#[derive(Debug, Deserialize)]
struct ModelConfig {
    id2label: HashMap<String, String>,
}

/// 把 `id2label` 转换为按下标排列的标签表
#[cfg_attr(not(feature = "onnx-ner"), allow(dead_code))]
fn parse_labels(raw_config: &str) -> Result<Vec<Option<EntityTag>>, RecognizerError> {
    let config: ModelConfig = serde_json::from_str(raw_config)
        .map_err(|e| RecognizerError::ModelInit(format!("config.json: {e}")))?;

    let mut labels = vec![None; config.id2label.len()];
    for (id, label) in &config.id2label {
        let index: usize = id
            .parse()
            .map_err(|_| RecognizerError::ModelInit(format!("非法标签下标: {id}")))?;
        if index >= labels.len() {
            labels.resize(index + 1, None);
        }
        labels[index] = EntityTag::parse(label);
    }
    Ok(labels)
}

/// 最大 logit 的下标
#[cfg_attr(not(feature = "onnx-ner"), allow(dead_code))]
fn argmax(row: &[f32]) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best, best_score), (idx, &score)| {
            if score > best_score {
                (idx, score)
            } else {
                (best, best_score)
            }
        })
        .0
}

/// 返回固定实体列表的识别器（用于测试或离线回放）
#[derive(Debug, Clone, Default)]
pub struct FixedRecognizer {
    spans: Vec<EntitySpan>,
}

impl FixedRecognizer {
    pub fn new(spans: Vec<EntitySpan>) -> Self {
        Self { spans }
    }
}

impl EntityRecognizer for FixedRecognizer {
    fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, RecognizerError> {
        Ok(self.spans.clone())
    }
}

/// 显式关闭实体识别：姓名与学校始终为"未找到"
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRecognizer;

impl EntityRecognizer for DisabledRecognizer {
    fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, RecognizerError> {
        Ok(Vec::new())
    }
}

/// 按配置构建识别器，失败即终止（在批处理开始前）
pub fn build_recognizer(config: &Config) -> Result<Arc<dyn EntityRecognizer>, RecognizerError> {
    match config.ner_backend {
        NerBackend::Disabled => {
            info!("实体识别已关闭，姓名与学校列将为 Not found");
            Ok(Arc::new(DisabledRecognizer))
        }
        NerBackend::Onnx => load_onnx(Path::new(&config.ner_model_dir)),
    }
}

#[cfg(feature = "onnx-ner")]
fn load_onnx(model_dir: &Path) -> Result<Arc<dyn EntityRecognizer>, RecognizerError> {
    Ok(Arc::new(onnx::OnnxEntityRecognizer::load(model_dir)?))
}

#[cfg(not(feature = "onnx-ner"))]
fn load_onnx(model_dir: &Path) -> Result<Arc<dyn EntityRecognizer>, RecognizerError> {
    Err(RecognizerError::Unavailable(format!(
        "未启用 onnx-ner 特性，无法加载 {}；请使用 --features onnx-ner 重新编译，或设置 NER_BACKEND=disabled",
        model_dir.display()
    )))
}

// ═══════════════════════════════════════════════════════════
// ONNX 识别器：需要 `onnx-ner` 特性
// ═══════════════════════════════════════════════════════════

#[cfg(feature = "onnx-ner")]
pub use onnx::OnnxEntityRecognizer;

#[cfg(feature = "onnx-ner")]
mod onnx {
    use super::{argmax, decode_spans, parse_labels, EntityRecognizer, TaggedToken};
    use crate::error::RecognizerError;
    use crate::models::entity::{EntitySpan, EntityTag};
    use ort::session::Session;
    use std::path::Path;
    use std::sync::Mutex;

    /// BERT 的最大序列长度
    const MAX_SEQUENCE_LEN: usize = 512;

    /// 基于 ONNX Runtime 的 token 分类模型（CoNLL-03 标签体系）
    ///
    /// 模型目录需要包含：
    /// - `model.onnx`：导出的模型权重
    /// - `tokenizer.json`：HuggingFace 分词器
    /// - `config.json`：含 `id2label` 映射
    ///
    /// `Session::run` 需要 `&mut self`，因此用 Mutex 包裹以支持共享调用。
    pub struct OnnxEntityRecognizer {
        session: Mutex<Session>,
        tokenizer: tokenizers::Tokenizer,
        labels: Vec<Option<EntityTag>>,
    }

    impl OnnxEntityRecognizer {
        /// 从模型目录加载
        pub fn load(model_dir: &Path) -> Result<Self, RecognizerError> {
            let model_path = model_dir.join("model.onnx");
            let tokenizer_path = model_dir.join("tokenizer.json");
            let config_path = model_dir.join("config.json");

            for path in [&model_path, &tokenizer_path, &config_path] {
                if !path.exists() {
                    return Err(RecognizerError::ModelNotFound(path.to_path_buf()));
                }
            }

            let session = Session::builder()
                .map_err(|e: ort::Error| RecognizerError::ModelInit(e.to_string()))?
                .with_intra_threads(2)
                .map_err(|e: ort::Error| RecognizerError::ModelInit(e.to_string()))?
                .commit_from_file(&model_path)
                .map_err(|e: ort::Error| {
                    RecognizerError::ModelInit(format!("ONNX load failed: {e}"))
                })?;

            let mut tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| RecognizerError::ModelInit(format!("Tokenizer load failed: {e}")))?;
            tokenizer
                .with_truncation(Some(tokenizers::TruncationParams {
                    max_length: MAX_SEQUENCE_LEN,
                    ..Default::default()
                }))
                .map_err(|e| RecognizerError::ModelInit(format!("Truncation setup failed: {e}")))?;

            let raw_config = std::fs::read_to_string(&config_path)
                .map_err(|e| RecognizerError::ModelInit(format!("config.json: {e}")))?;
            let labels = parse_labels(&raw_config)?;

            tracing::info!(
                "实体识别模型已加载: {} ({} 个标签)",
                model_dir.display(),
                labels.len()
            );

            Ok(Self {
                session: Mutex::new(session),
                tokenizer,
                labels,
            })
        }

        fn tag_tokens(&self, text: &str) -> Result<Vec<TaggedToken>, RecognizerError> {
            use ort::value::TensorRef;

            let encoding = self
                .tokenizer
                .encode(text, true)
                .map_err(|e| RecognizerError::Tokenization(e.to_string()))?;

            let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
            let attention_mask: Vec<i64> = encoding
                .get_attention_mask()
                .iter()
                .map(|&m| m as i64)
                .collect();
            let token_type_ids: Vec<i64> = encoding
                .get_type_ids()
                .iter()
                .map(|&t| t as i64)
                .collect();
            let seq_len = input_ids.len();

            let ids_array = ndarray::Array2::from_shape_vec((1, seq_len), input_ids)
                .map_err(|e| RecognizerError::Inference(e.to_string()))?;
            let mask_array = ndarray::Array2::from_shape_vec((1, seq_len), attention_mask)
                .map_err(|e| RecognizerError::Inference(e.to_string()))?;
            let type_array = ndarray::Array2::from_shape_vec((1, seq_len), token_type_ids)
                .map_err(|e| RecognizerError::Inference(e.to_string()))?;

            let ids_tensor = TensorRef::from_array_view(&ids_array)
                .map_err(|e| RecognizerError::Inference(e.to_string()))?;
            let mask_tensor = TensorRef::from_array_view(&mask_array)
                .map_err(|e| RecognizerError::Inference(e.to_string()))?;
            let type_tensor = TensorRef::from_array_view(&type_array)
                .map_err(|e| RecognizerError::Inference(e.to_string()))?;

            let mut session = self
                .session
                .lock()
                .map_err(|_| RecognizerError::Inference("Session lock poisoned".to_string()))?;

            let outputs = session
                .run(ort::inputs![ids_tensor, mask_tensor, type_tensor])
                .map_err(|e| RecognizerError::Inference(format!("ONNX inference failed: {e}")))?;

            // 输出形状: [1, seq_len, num_labels]
            let (shape, logits) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| RecognizerError::Inference(format!("Output extraction: {e}")))?;

            if shape.len() != 3 || shape[1] as usize != seq_len {
                return Err(RecognizerError::Inference(format!(
                    "Unexpected output shape: {shape:?}, expected [1, {seq_len}, num_labels]"
                )));
            }
            let num_labels = shape[2] as usize;

            let special = encoding.get_special_tokens_mask();
            let offsets = encoding.get_offsets();
            let pieces = encoding.get_tokens();

            let mut tagged = Vec::with_capacity(seq_len);
            for token_idx in 0..seq_len {
                if special.get(token_idx).copied().unwrap_or(0) == 1 {
                    continue;
                }
                let row = &logits[token_idx * num_labels..(token_idx + 1) * num_labels];
                let best = argmax(row);
                let (start, end) = offsets[token_idx];
                tagged.push(TaggedToken {
                    tag: self.labels.get(best).copied().flatten(),
                    start,
                    end,
                    is_continuation: pieces[token_idx].starts_with("##"),
                });
            }

            Ok(tagged)
        }
    }

    impl EntityRecognizer for OnnxEntityRecognizer {
        fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, RecognizerError> {
            let tagged = self.tag_tokens(text)?;
            Ok(decode_spans(text, &tagged))
        }
    }
}
