//! 基础设施层
//!
//! 持有稀缺资源（PDF 解析库、实体识别模型），只暴露能力，不认识简历字段。

pub mod entity_recognizer;
pub mod text_extractor;

pub use entity_recognizer::{
    build_recognizer, decode_spans, DisabledRecognizer, EntityRecognizer, FixedRecognizer,
    TaggedToken,
};
#[cfg(feature = "onnx-ner")]
pub use entity_recognizer::OnnxEntityRecognizer;
pub use text_extractor::{PdfTextExtractor, TextExtractor};
