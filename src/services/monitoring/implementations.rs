// 進捗監視の具象実装

use crate::core::{
    format_duration, BatchSummary, FetchTiming, OutcomeSink, ProgressReporter, TaskOutcome,
};
use async_trait::async_trait;
use std::sync::Arc;

/// tracingによるログ出力の進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct LogReporter {
    quiet: bool,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[async_trait]
impl ProgressReporter for LogReporter {
    async fn report_started(&self, total_items: usize) {
        if !self.quiet {
            tracing::info!(total_items, "starting batch of {total_items} items");
        }
    }

    async fn report_timing(&self, timing: &FetchTiming) {
        if !self.quiet {
            tracing::info!(
                body_bytes = timing.body_bytes,
                "{:?} - {}",
                timing.url,
                format_duration(timing.elapsed)
            );
        }
    }

    async fn report_status(&self, outcome: &TaskOutcome) {
        if !self.quiet {
            tracing::info!("File {}: {}", outcome.item_id, outcome.status_label());
        }
    }

    async fn report_error(&self, item: &str, error: &str) {
        if !self.quiet {
            tracing::error!(item, "{error}");
        }
    }

    async fn report_completed(&self, summary: &BatchSummary) {
        if !self.quiet {
            tracing::info!(
                outcomes = summary.outcomes,
                errors = summary.errors,
                "{} items in {:?}",
                summary.total_items,
                summary.elapsed
            );
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_items: usize) {}

    async fn report_timing(&self, _timing: &FetchTiming) {}

    async fn report_status(&self, _outcome: &TaskOutcome) {}

    async fn report_error(&self, _item: &str, _error: &str) {}

    async fn report_completed(&self, _summary: &BatchSummary) {}
}

/// 計測結果をレポーターへ流すだけの受け取り口
///
/// URL取得バッチは呼び出し元へ値を返さず、ログ行のみを残す
pub struct TimingLog<R> {
    reporter: Arc<R>,
}

impl<R> TimingLog<R> {
    pub fn new(reporter: Arc<R>) -> Self {
        Self { reporter }
    }
}

#[async_trait]
impl<R> OutcomeSink<FetchTiming> for TimingLog<R>
where
    R: ProgressReporter + 'static,
{
    async fn record(&self, outcome: FetchTiming) {
        self.reporter.report_timing(&outcome).await;
    }
}
