use crate::error::{AppError, AppResult, FileError, LogError};
use crate::models::eval_log::EvalLog;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 评测日志扩展名
pub const LOG_EXTENSION: &str = "json";

/// 从 JSON 文件加载评测日志
pub async fn load_eval_log(log_path: &Path) -> AppResult<EvalLog> {
    let path_str = log_path.display().to_string();

    if !log_path.is_file() {
        return Err(FileError::NotFound { path: path_str }.into());
    }
    if log_path.extension().and_then(|s| s.to_str()) != Some(LOG_EXTENSION) {
        return Err(FileError::InvalidExtension {
            path: path_str,
            expected: LOG_EXTENSION.to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(log_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let log: EvalLog = serde_json::from_str(&content).map_err(|source| LogError::ParseFailed {
        path: path_str,
        source,
    })?;

    Ok(log)
}

/// 列出目录中的所有评测日志（按文件名排序）
pub async fn list_log_files(folder: &Path) -> AppResult<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder.display().to_string(),
        }
        .into());
    }

    let mut log_files = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder.display().to_string(), e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder.display().to_string(), e))?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some(LOG_EXTENSION) {
            log_files.push(path);
        }
    }

    log_files.sort();
    Ok(log_files)
}

/// 加载目录中的所有评测日志，无法解析的文件跳过
pub async fn load_all_logs(folder: &Path) -> AppResult<Vec<(PathBuf, EvalLog)>> {
    let mut logs = Vec::new();

    for path in list_log_files(folder).await? {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_eval_log(&path).await {
            Ok(log) => {
                tracing::info!("成功加载 {} 条样本记录", log.samples.len());
                logs.push((path, log));
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(logs)
}
