// バッチ実行システムのトレイト定義
// 全ての抽象化インターフェースを定義

use super::error::ProcessingResult;
use super::types::{BatchSummary, FetchTiming, TaskOutcome};
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use mockall::automock;
use std::time::Duration;

/// 1アイテムを消費し、0個または1個の結果を生成する処理単位
///
/// `Err` は「結果なし」を意味し、呼び出し元へは伝播しない
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Item: Send + 'static;
    type Outcome: Send + 'static;

    /// エラー表示に使うアイテムの識別子
    fn label(&self, item: &Self::Item) -> String;

    /// アイテムを1件処理
    async fn run(&self, item: Self::Item) -> ProcessingResult<Self::Outcome>;
}

/// タスク結果の受け取り口
#[async_trait]
pub trait OutcomeSink<O: Send + 'static>: Send + Sync {
    async fn record(&self, outcome: O);
}

/// バッチ実行の設定を抽象化するトレイト
#[automock]
pub trait BatchConfig: Send + Sync {
    /// タスク1件あたりの制限時間（Noneなら無制限）
    fn task_timeout(&self) -> Option<Duration>;

    /// ステータスチャンネルのバッファサイズ
    fn status_buffer_size(&self) -> usize;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

// BatchConfig for Box<dyn BatchConfig>
impl BatchConfig for Box<dyn BatchConfig> {
    fn task_timeout(&self) -> Option<Duration> {
        self.as_ref().task_timeout()
    }

    fn status_buffer_size(&self) -> usize {
        self.as_ref().status_buffer_size()
    }

    fn enable_progress_reporting(&self) -> bool {
        self.as_ref().enable_progress_reporting()
    }
}

/// 進捗・ステータス報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// バッチ開始時の報告
    async fn report_started(&self, total_items: usize);

    /// URL取得1件の計測結果の報告
    async fn report_timing(&self, timing: &FetchTiming);

    /// 検証1件のステータスの報告
    async fn report_status(&self, outcome: &TaskOutcome);

    /// タスク失敗時の報告
    async fn report_error(&self, item: &str, error: &str);

    /// バッチ完了時の報告
    async fn report_completed(&self, summary: &BatchSummary);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_items: usize) {
        self.as_ref().report_started(total_items).await
    }

    async fn report_timing(&self, timing: &FetchTiming) {
        self.as_ref().report_timing(timing).await
    }

    async fn report_status(&self, outcome: &TaskOutcome) {
        self.as_ref().report_status(outcome).await
    }

    async fn report_error(&self, item: &str, error: &str) {
        self.as_ref().report_error(item, error).await
    }

    async fn report_completed(&self, summary: &BatchSummary) {
        self.as_ref().report_completed(summary).await
    }
}

/// レスポンスボディのチャンクストリーム
pub type BodyStream = BoxStream<'static, Result<Bytes>>;

/// GETリクエストの応答
pub struct FetchResponse {
    pub status: u16,
    pub status_text: String,
    pub body: BodyStream,
}

impl std::fmt::Debug for FetchResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchResponse")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .finish_non_exhaustive()
    }
}

/// ネットワーク通信の抽象化トレイト
#[automock]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// URLへGETを発行し、ステータスとボディストリームを返す
    async fn get(&self, url: &str) -> Result<FetchResponse>;
}

/// コンテンツダイジェストの抽象化トレイト
#[automock]
pub trait Digester: Send + Sync {
    /// アルゴリズム名
    fn algorithm(&self) -> &'static str;

    /// 小文字16進表記のダイジェストを計算
    fn digest_hex(&self, data: &[u8]) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[test]
    fn test_batch_config_trait() {
        let mut mock_config = MockBatchConfig::new();

        mock_config
            .expect_task_timeout()
            .return_const(Some(Duration::from_secs(2)));
        mock_config.expect_status_buffer_size().return_const(1usize);
        mock_config.expect_enable_progress_reporting().return_const(false);

        let config: Box<dyn BatchConfig> = Box::new(mock_config);
        assert_eq!(config.task_timeout(), Some(Duration::from_secs(2)));
        assert_eq!(config.status_buffer_size(), 1);
        assert!(!config.enable_progress_reporting());
    }

    #[tokio::test]
    async fn test_progress_reporter_trait() {
        let mut mock_reporter = MockProgressReporter::new();

        mock_reporter
            .expect_report_started()
            .with(eq(3))
            .times(1)
            .returning(|_| ());
        mock_reporter
            .expect_report_error()
            .with(eq("http://x"), eq("boom"))
            .times(1)
            .returning(|_, _| ());

        let reporter: Box<dyn ProgressReporter> = Box::new(mock_reporter);
        reporter.report_started(3).await;
        reporter.report_error("http://x", "boom").await;
    }

    #[test]
    fn test_digester_trait() {
        let mut mock_digester = MockDigester::new();
        mock_digester
            .expect_digest_hex()
            .returning(|data| Ok(hex::encode(data)));

        assert_eq!(mock_digester.digest_hex(b"\x01\xff").unwrap(), "01ff");
    }

    #[test]
    fn test_fetch_response_debug_hides_body() {
        let response = FetchResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: Box::pin(futures_util::stream::empty()),
        };

        let debug_str = format!("{response:?}");
        assert!(debug_str.contains("status: 200"));
        assert!(debug_str.contains(".."));
    }
}
