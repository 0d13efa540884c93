//! 样本处理上下文
//!
//! 封装"我正在处理第几个样本的第几轮"这一信息

use std::fmt::Display;

/// 样本处理上下文
#[derive(Debug, Clone)]
pub struct SampleCtx {
    /// 样本ID（从1开始）
    pub sample_id: usize,

    /// 轮次（从1开始）
    pub epoch: usize,

    /// 总轮数（仅用于日志显示）
    pub total_epochs: usize,
}

impl SampleCtx {
    pub fn new(sample_id: usize, epoch: usize, total_epochs: usize) -> Self {
        Self {
            sample_id,
            epoch,
            total_epochs,
        }
    }
}

impl Display for SampleCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[样本 #{} 轮次 {}/{}]",
            self.sample_id, self.epoch, self.total_epochs
        )
    }
}
