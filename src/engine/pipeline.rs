// Pipeline - ファンアウト、完了バリア、ファンインのオーケストレーション

use super::{
    aggregator::SharedAggregator,
    barrier::CompletionBarrier,
    dispatcher::{spawn_fan_out, DispatchCounters, TaskContext},
};
use crate::core::{
    BatchConfig, BatchSummary, ClassificationReport, OutcomeSink, ProcessingResult,
    ProgressReporter, TaskOutcome, UnitOfWork,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// 起動済みバッチの追跡情報
struct LaunchedBatch {
    barrier: CompletionBarrier,
    counters: DispatchCounters,
    total_items: usize,
    started_at: Instant,
}

impl LaunchedBatch {
    fn summary(&self) -> BatchSummary {
        BatchSummary {
            total_items: self.total_items,
            finished_tasks: self.barrier.finished(),
            outcomes: self.counters.outcomes(),
            errors: self.counters.errors(),
            elapsed: self.started_at.elapsed(),
        }
    }
}

/// 処理単位1種類に対するバッチパイプライン
pub struct BatchPipeline<U> {
    unit: Arc<U>,
}

impl<U> BatchPipeline<U>
where
    U: UnitOfWork + 'static,
{
    /// 新しいパイプラインを作成
    pub fn new(unit: Arc<U>) -> Self {
        Self { unit }
    }

    /// 全アイテムを処理し、全タスクの終了後にサマリーを返す
    ///
    /// アイテム単位の失敗はレポーターに渡されるだけで、バッチは失敗しない
    pub async fn execute<S, C, R>(
        &self,
        items: Vec<U::Item>,
        sink: Arc<S>,
        config: &C,
        reporter: Arc<R>,
    ) -> BatchSummary
    where
        S: OutcomeSink<U::Outcome> + 'static,
        C: BatchConfig,
        R: ProgressReporter + 'static,
    {
        let batch = self.launch(items, sink, config, Arc::clone(&reporter)).await;
        batch.barrier.wait().await;

        let summary = batch.summary();
        if config.enable_progress_reporting() {
            reporter.report_completed(&summary).await;
        }
        summary
    }

    async fn launch<S, C, R>(
        &self,
        items: Vec<U::Item>,
        sink: Arc<S>,
        config: &C,
        reporter: Arc<R>,
    ) -> LaunchedBatch
    where
        S: OutcomeSink<U::Outcome> + 'static,
        C: BatchConfig,
        R: ProgressReporter + 'static,
    {
        let total_items = items.len();
        if config.enable_progress_reporting() {
            reporter.report_started(total_items).await;
        }

        let batch = LaunchedBatch {
            barrier: CompletionBarrier::new(),
            counters: DispatchCounters::new(),
            total_items,
            started_at: Instant::now(),
        };

        let context = TaskContext {
            unit: Arc::clone(&self.unit),
            sink,
            reporter,
            counters: batch.counters.clone(),
            task_timeout: config.task_timeout(),
        };
        spawn_fan_out(items, &context, &batch.barrier);

        batch
    }
}

impl<U> BatchPipeline<U>
where
    U: UnitOfWork<Outcome = TaskOutcome> + 'static,
{
    /// 全アイテムを一致・不一致に分類する
    ///
    /// 結果はタスク完了ごとにステータスとしてレポーターへ流れ、
    /// チャンネルが閉じた後に集計結果を返す
    pub async fn classify<C, R>(
        &self,
        items: Vec<U::Item>,
        config: &C,
        reporter: Arc<R>,
    ) -> ProcessingResult<ClassificationReport>
    where
        C: BatchConfig,
        R: ProgressReporter + 'static,
    {
        let (status_tx, mut status_rx) = mpsc::channel(config.status_buffer_size().max(1));
        let aggregator = Arc::new(SharedAggregator::with_status_channel(status_tx));

        let batch = self
            .launch(items, Arc::clone(&aggregator), config, Arc::clone(&reporter))
            .await;

        let closer = spawn_status_closer(batch.barrier.clone(), Arc::clone(&aggregator));

        // チャンネルが閉じるまで読み切る
        while let Some(outcome) = status_rx.recv().await {
            reporter.report_status(&outcome).await;
        }
        closer.await?;

        let report = aggregator.take_report().await;
        if config.enable_progress_reporting() {
            reporter.report_completed(&batch.summary()).await;
        }
        Ok(report)
    }
}

/// バリア解放後にステータスチャンネルを閉じる後始末タスク
///
/// 全送信側の終了より前に閉じると結果を取りこぼし、
/// 閉じなければ受信ループが終わらない
pub fn spawn_status_closer(
    barrier: CompletionBarrier,
    aggregator: Arc<SharedAggregator>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        barrier.wait().await;
        aggregator.close_status_channel().await;
    })
}
