// BatchEngine - 依存性注入によるバッチ実行エンジン
// 処理単位・設定・レポーターをコンストラクタで注入する

use super::pipeline::BatchPipeline;
use crate::core::{
    BatchConfig, BatchSummary, ClassificationReport, FetchTiming, OutcomeSink, ProcessingResult,
    ProgressReporter, TaskOutcome, UnitOfWork,
};
use crate::services::TimingLog;
use std::sync::Arc;

/// 依存性注入によるバッチ実行エンジン
///
/// 並列タスク間で共有される依存関係は初期からArcで管理する
pub struct BatchEngine<U, C, R> {
    unit: Arc<U>,
    config: Arc<C>,
    reporter: Arc<R>,
}

impl<U, C, R> BatchEngine<U, C, R>
where
    U: UnitOfWork + 'static,
    C: BatchConfig,
    R: ProgressReporter + 'static,
{
    /// 新しいエンジンを作成
    pub fn new(unit: U, config: C, reporter: R) -> Self {
        Self {
            unit: Arc::new(unit),
            config: Arc::new(config),
            reporter: Arc::new(reporter),
        }
    }

    /// 任意の受け取り口を使ってアイテムリストを処理
    pub async fn run<S>(&self, items: Vec<U::Item>, sink: Arc<S>) -> BatchSummary
    where
        S: OutcomeSink<U::Outcome> + 'static,
    {
        self.pipeline()
            .execute(items, sink, self.config.as_ref(), Arc::clone(&self.reporter))
            .await
    }

    fn pipeline(&self) -> BatchPipeline<U> {
        BatchPipeline::new(Arc::clone(&self.unit))
    }

    /// 処理単位への参照を取得
    pub fn unit(&self) -> &U {
        &self.unit
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &C {
        &self.config
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}

impl<U, C, R> BatchEngine<U, C, R>
where
    U: UnitOfWork<Item = String, Outcome = FetchTiming> + 'static,
    C: BatchConfig,
    R: ProgressReporter + 'static,
{
    /// 全URLの応答時間を並列に計測する
    ///
    /// 計測結果はログ行としてのみ残り、最も遅いURLの完了後に戻る
    pub async fn time_urls(&self, urls: Vec<String>) -> BatchSummary {
        let sink = Arc::new(TimingLog::new(Arc::clone(&self.reporter)));
        self.run(urls, sink).await
    }
}

impl<U, C, R> BatchEngine<U, C, R>
where
    U: UnitOfWork<Outcome = TaskOutcome> + 'static,
    C: BatchConfig,
    R: ProgressReporter + 'static,
{
    /// 全レコードの署名を並列に検証し、一致・不一致に分類する
    ///
    /// ダイジェスト計算に失敗したレコードはどちらの系列にも含まれない
    pub async fn validate_signatures(
        &self,
        records: Vec<U::Item>,
    ) -> ProcessingResult<ClassificationReport> {
        self.pipeline()
            .classify(records, self.config.as_ref(), Arc::clone(&self.reporter))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{traits::MockHttpTransport, Digester, FetchResponse, SignedRecord};
    use crate::engine::aggregator::SharedAggregator;
    use crate::services::{
        DefaultBatchConfig, NoOpProgressReporter, Sha1Digester, SignatureCheck, TimedFetch,
    };
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_time_urls_with_mock_transport() {
        let mut transport = MockHttpTransport::new();
        transport.expect_get().times(3).returning(|url| {
            let status = if url.ends_with("/500") { 500 } else { 200 };
            Ok(FetchResponse {
                status,
                status_text: String::new(),
                body: futures_util::stream::iter(vec![Ok(bytes::Bytes::from_static(b"ok"))])
                    .boxed(),
            })
        });

        let engine = BatchEngine::new(
            TimedFetch::new(transport),
            DefaultBatchConfig::default(),
            NoOpProgressReporter::new(),
        );

        let summary = engine
            .time_urls(vec![
                "http://h/200".to_string(),
                "http://h/100".to_string(),
                "http://h/500".to_string(),
            ])
            .await;

        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.finished_tasks, 3);
        assert_eq!(summary.outcomes, 2);
        assert_eq!(summary.errors, 1);
    }

    #[tokio::test]
    async fn test_validate_signatures() {
        let engine = BatchEngine::new(
            SignatureCheck::new(Sha1Digester::new()),
            DefaultBatchConfig::default(),
            NoOpProgressReporter::new(),
        );

        let report = engine
            .validate_signatures(vec![
                SignedRecord::new("file1.txt", "content1", "signature1"),
                SignedRecord::new("file2.txt", "content1", "signature1"),
            ])
            .await
            .unwrap();

        assert!(report.matched.is_empty());
        let mut mismatched = report.mismatched.clone();
        mismatched.sort();
        assert_eq!(mismatched, vec!["file1.txt", "file2.txt"]);
    }

    #[tokio::test]
    async fn test_run_with_custom_sink() {
        let engine = BatchEngine::new(
            SignatureCheck::new(Sha1Digester::new()),
            DefaultBatchConfig::default(),
            NoOpProgressReporter::new(),
        );
        let aggregator = Arc::new(SharedAggregator::new());

        let summary = engine
            .run(
                vec![SignedRecord::new("a", "x", "nope")],
                Arc::clone(&aggregator),
            )
            .await;

        assert_eq!(summary.outcomes, 1);
        assert_eq!(aggregator.take_report().await.mismatched, vec!["a"]);
    }

    #[test]
    fn test_engine_accessors() {
        let engine = BatchEngine::new(
            SignatureCheck::new(Sha1Digester::new()),
            DefaultBatchConfig::default().with_status_buffer_size(4),
            NoOpProgressReporter::new(),
        );

        assert_eq!(engine.config().status_buffer_size(), 4);
        assert_eq!(engine.unit().digester().algorithm(), "sha1");
    }
}
