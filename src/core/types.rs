// バッチ実行に関連するデータ型定義

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 署名検証の入力レコード
///
/// タスクに渡された後は読み取り専用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRecord {
    pub name: String,
    pub content: Vec<u8>,
    pub expected_signature: String,
}

impl SignedRecord {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
        expected_signature: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            expected_signature: expected_signature.into(),
        }
    }
}

/// 検証タスク1件分の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub item_id: String,
    pub succeeded: bool,
}

impl TaskOutcome {
    /// ログ用のステータス表記
    pub fn status_label(&self) -> &'static str {
        if self.succeeded {
            "OK"
        } else {
            "Mismatch"
        }
    }
}

/// URL取得タスク1件分の計測結果
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTiming {
    pub url: String,
    pub elapsed: Duration,
    pub body_bytes: u64,
}

/// 経過時間を小数点以下4桁の秒数で表す
pub fn format_duration(elapsed: Duration) -> String {
    format!("{:.4} seconds", elapsed.as_secs_f64())
}

/// バッチ全体のサマリー
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total_items: usize,
    pub finished_tasks: usize,
    pub outcomes: usize,
    pub errors: usize,
    pub elapsed: Duration,
}

/// 検証バッチの集計結果
///
/// 完了バリアが解放されるまでは集計器が排他的に所有する
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ClassificationReport {
    pub matched: Vec<String>,
    pub mismatched: Vec<String>,
}

impl ClassificationReport {
    /// 分類済みアイテムの総数
    pub fn classified(&self) -> usize {
        self.matched.len() + self.mismatched.len()
    }
}
