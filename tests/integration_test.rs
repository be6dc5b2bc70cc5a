use resume_analyzer::error::{ConfigError, DocumentError};
use resume_analyzer::infrastructure::{FixedRecognizer, TextExtractor};
use resume_analyzer::models::{Column, EntitySpan};
use resume_analyzer::{App, AppError, Config, NerBackend, ResumeFlow};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// 按文件名返回预置文本，模拟 PDF 抽取
struct CannedExtractor {
    texts: HashMap<&'static str, &'static str>,
}

impl TextExtractor for CannedExtractor {
    fn extract(&self, path: &Path) -> Result<String, DocumentError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.texts
            .get(name)
            .map(|t| t.to_string())
            .ok_or_else(|| DocumentError::ExtractionFailed {
                path: name.to_string(),
                source: "no text layer".into(),
            })
    }
}

fn config_for(dir: &Path, output: &str) -> Config {
    Config {
        resume_folder: dir.join("resumes").to_string_lossy().to_string(),
        output_file: dir.join(output).to_string_lossy().to_string(),
        failure_log_file: dir.join("failed.txt").to_string_lossy().to_string(),
        ner_backend: NerBackend::Disabled,
        ..Default::default()
    }
}

fn write_inputs(dir: &Path, names: &[&str]) {
    let resumes = dir.join("resumes");
    std::fs::create_dir_all(&resumes).unwrap();
    for name in names {
        std::fs::write(resumes.join(name), b"%PDF-1.4").unwrap();
    }
}

#[tokio::test]
async fn test_end_to_end_csv_report() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), &["jane.pdf", "raj.PDF", "scan.pdf", "cover.docx"]);

    let extractor = CannedExtractor {
        texts: HashMap::from([
            (
                "jane.pdf",
                "Jane Doe\njane@x.com (555) 123-4567\nB.Tech 2024\nCGPA: 9.2\n\
                 Generative AI, RAG pipelines, Deep Learning\nAWS Certified",
            ),
            (
                "raj.PDF",
                "Raj Kumar\nMaster of Science 2019\nScored 78.5% overall\nExcel",
            ),
        ]),
    };
    let recognizer = FixedRecognizer::new(vec![
        EntitySpan::person("Jane Doe", 0),
        EntitySpan::organization("IIT Bombay", 20),
    ]);
    let flow = ResumeFlow::new(Arc::new(extractor), Arc::new(recognizer));

    let config = config_for(dir.path(), "report.csv");
    let result = App::with_flow(config, flow).run().await.unwrap();

    assert_eq!(result.success_count(), 2);
    assert_eq!(result.failed_count(), 1);
    assert_eq!(result.failures[0].file_name, "scan.pdf");

    let mut reader = csv::Reader::from_path(dir.path().join("report.csv")).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, Column::headers().to_vec());

    // 行顺序取决于目录遍历顺序，按 CGPA 列区分
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    let jane = rows.iter().find(|r| &r[6] == "9.2").unwrap();
    let raj = rows.iter().find(|r| &r[6] == "78.5%").unwrap();

    assert_eq!(&jane[1], "Email: jane@x.com, Phone: (555) 123-4567");
    assert_eq!(&jane[3], "2024");
    assert_eq!(&jane[4], "B.Tech");
    assert_eq!(&jane[8], "3");
    assert_eq!(&jane[9], "3");
    assert_eq!(&jane[10], "Certified");

    assert_eq!(&raj[1], "Email: Not found, Phone: Not found");
    assert_eq!(&raj[3], "2019");
    assert_eq!(&raj[4], "Master");
    assert_eq!(&raj[8], "1");
    assert_eq!(&raj[10], "Not found");

    let failures = std::fs::read_to_string(dir.path().join("failed.txt")).unwrap();
    assert!(failures.contains("scan.pdf | "));
}

#[tokio::test]
async fn test_json_report() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), &["only.pdf"]);

    let extractor = CannedExtractor {
        texts: HashMap::from([("only.pdf", "hands-on machine learning project")]),
    };
    let flow = ResumeFlow::new(Arc::new(extractor), Arc::new(FixedRecognizer::new(Vec::new())));

    App::with_flow(config_for(dir.path(), "report.json"), flow)
        .run()
        .await
        .unwrap();

    let content = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let row = &value.as_array().unwrap()[0];
    assert_eq!(row["Name"], "Not found");
    assert_eq!(row["Gen AI Experience Score"], 2);
    assert_eq!(row["AI/ML Experience Score"], 2);
    assert_eq!(row["Supporting Information"], "project");
}

#[tokio::test]
async fn test_default_xlsx_report() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), &["only.pdf"]);

    let extractor = CannedExtractor {
        texts: HashMap::from([("only.pdf", "RAG chatbot, deep learning")]),
    };
    let flow = ResumeFlow::new(Arc::new(extractor), Arc::new(FixedRecognizer::new(Vec::new())));

    let output = Config::default().output_file;
    assert!(output.ends_with(".xlsx"));
    let result = App::with_flow(config_for(dir.path(), &output), flow)
        .run()
        .await
        .unwrap();

    assert_eq!(result.success_count(), 1);
    let bytes = std::fs::read(dir.path().join(&output)).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn test_unsupported_output_extension_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), &[]);

    let app = App::initialize(config_for(dir.path(), "report.txt"))
        .await
        .unwrap();
    let result = app.run().await;

    assert!(matches!(
        result,
        Err(AppError::Config(ConfigError::InvalidValue { .. }))
    ));
    assert!(!dir.path().join("report.txt").exists());
}

#[tokio::test]
async fn test_empty_folder_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), &[]);

    let config = config_for(dir.path(), "report.csv");
    let app = App::initialize(config).await.unwrap();
    let result = app.run().await.unwrap();

    assert_eq!(result.total(), 0);
    let content = std::fs::read_to_string(dir.path().join("report.csv")).unwrap();
    assert_eq!(content.lines().count(), 1);
}

#[tokio::test]
async fn test_unparseable_pdf_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), &["garbage.pdf"]);

    let app = App::initialize(config_for(dir.path(), "report.csv"))
        .await
        .unwrap();
    let result = app.run().await.unwrap();

    assert_eq!(result.success_count(), 0);
    assert_eq!(result.failed_count(), 1);
}

#[cfg(not(feature = "onnx-ner"))]
#[tokio::test]
async fn test_onnx_backend_without_feature_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        ner_backend: NerBackend::Onnx,
        ..config_for(dir.path(), "report.csv")
    };

    assert!(App::initialize(config).await.is_err());
}
