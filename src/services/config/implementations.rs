// 設定管理の具象実装

use crate::core::{BatchConfig, ProcessingError, ProcessingResult};
use std::time::Duration;

/// デフォルト設定実装
///
/// 既定値はタイムアウトなし・バッファ1（無バッファに最も近い挙動）
#[derive(Debug, Clone)]
pub struct DefaultBatchConfig {
    task_timeout: Option<Duration>,
    status_buffer_size: usize,
    enable_progress: bool,
}

impl DefaultBatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    pub fn with_status_buffer_size(mut self, buffer_size: usize) -> Self {
        self.status_buffer_size = buffer_size;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }

    /// 設定値の検証
    pub fn validate(&self) -> ProcessingResult<()> {
        if self.task_timeout == Some(Duration::ZERO) {
            return Err(ProcessingError::configuration(
                "タスクの制限時間は0より大きい必要があります",
            ));
        }

        if self.status_buffer_size == 0 {
            return Err(ProcessingError::configuration(
                "ステータスバッファサイズは1以上である必要があります",
            ));
        }

        Ok(())
    }
}

impl Default for DefaultBatchConfig {
    fn default() -> Self {
        Self {
            task_timeout: None,
            status_buffer_size: 1,
            enable_progress: true,
        }
    }
}

impl BatchConfig for DefaultBatchConfig {
    fn task_timeout(&self) -> Option<Duration> {
        self.task_timeout
    }

    fn status_buffer_size(&self) -> usize {
        self.status_buffer_size
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}
