// SharedAggregator - 全タスクから共有される分類結果の集計器

use crate::core::{ClassificationReport, OutcomeSink, TaskOutcome};
use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

#[derive(Debug, Default)]
struct AggregatorState {
    matched: Vec<String>,
    mismatched: Vec<String>,
    status_tx: Option<mpsc::Sender<TaskOutcome>>,
}

/// 一致・不一致の2系列を1つのロックで保護する集計器
///
/// ロックは追記とステータス送信の間ずっと保持されるため、
/// 系列への追記とチャンネルへの送信は同じ順序になる。
/// 受信側が遅いと他タスクの追記も待たされる
#[derive(Debug, Default)]
pub struct SharedAggregator {
    state: Mutex<AggregatorState>,
}

impl SharedAggregator {
    /// ステータスチャンネルなしの集計器を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ステータスチャンネル付きの集計器を作成
    pub fn with_status_channel(status_tx: mpsc::Sender<TaskOutcome>) -> Self {
        Self {
            state: Mutex::new(AggregatorState {
                status_tx: Some(status_tx),
                ..AggregatorState::default()
            }),
        }
    }

    /// 結果を1件記録する
    pub async fn record_outcome(&self, outcome: TaskOutcome) {
        let mut state = self.state.lock().await;

        if outcome.succeeded {
            state.matched.push(outcome.item_id.clone());
        } else {
            state.mismatched.push(outcome.item_id.clone());
        }

        if let Some(status_tx) = &state.status_tx {
            // 受信側が既に閉じていても集計結果は保持する
            let _ = status_tx.send(outcome).await;
        }
    }

    /// ステータスチャンネルを閉じる
    ///
    /// 全タスク終了後にのみ呼ぶこと。以降の記録は送信されない
    pub async fn close_status_channel(&self) {
        self.state.lock().await.status_tx.take();
    }

    /// 集計結果を取り出し、内部の系列を空にする
    pub async fn take_report(&self) -> ClassificationReport {
        let mut state = self.state.lock().await;
        ClassificationReport {
            matched: std::mem::take(&mut state.matched),
            mismatched: std::mem::take(&mut state.mismatched),
        }
    }
}

#[async_trait]
impl OutcomeSink<TaskOutcome> for SharedAggregator {
    async fn record(&self, outcome: TaskOutcome) {
        self.record_outcome(outcome).await;
    }
}
