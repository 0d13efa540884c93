//! 评测日志写入服务 - 业务能力层
//!
//! 只负责"写评测日志"能力，不关心流程

use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult, LogError};
use crate::models::eval_log::EvalLog;

/// 评测日志写入服务
pub struct LogWriter {
    log_dir: PathBuf,
}

impl LogWriter {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    /// 写入评测日志，返回文件路径
    pub async fn write(&self, log: &EvalLog) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.log_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.log_dir.display().to_string(), e))?;

        let path = self.log_dir.join(log.file_name());
        let content = serde_json::to_string_pretty(log).map_err(LogError::SerializeFailed)?;

        debug!(
            "写入评测日志: {} | 样本记录: {}",
            path.display(),
            log.samples.len()
        );

        fs::write(&path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        Ok(path)
    }
}
