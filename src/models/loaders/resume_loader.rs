use crate::error::{AppError, AppResult, FileError};
use crate::models::document::ResumeDocument;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 判断路径是否为 PDF（扩展名不区分大小写）
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// 扫描文件夹中的所有 PDF 简历
///
/// 返回顺序即目录遍历顺序，不同文件系统之间不保证一致。
pub async fn load_all_resumes(folder_path: &str) -> AppResult<Vec<ResumeDocument>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut resumes = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if !is_pdf(&path) {
            tracing::debug!("跳过非 PDF 文件: {}", path.display());
            continue;
        }

        match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => {
                tracing::debug!("跳过目录: {}", path.display());
            }
            Ok(_) => resumes.push(ResumeDocument::new(path)),
            Err(e) => {
                tracing::warn!("无法读取文件类型 {}: {}", path.display(), e);
            }
        }
    }

    tracing::info!("在 {} 中找到 {} 份简历", folder_path, resumes.len());
    Ok(resumes)
}
