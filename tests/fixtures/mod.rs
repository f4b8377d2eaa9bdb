// テストユーティリティ
// 報告内容を記録するレポーターとテストデータのヘルパー

#![allow(dead_code)]

use async_trait::async_trait;
use batch_fanout::core::{
    BatchSummary, Digester, FetchTiming, ProgressReporter, SignedRecord, TaskOutcome,
};
use batch_fanout::services::Sha1Digester;
use std::sync::Mutex;

/// 受け取った報告を全て保持するレポーター
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub started: Mutex<Vec<usize>>,
    pub timings: Mutex<Vec<FetchTiming>>,
    pub statuses: Mutex<Vec<TaskOutcome>>,
    pub errors: Mutex<Vec<(String, String)>>,
    pub completed: Mutex<Vec<BatchSummary>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timings(&self) -> Vec<FetchTiming> {
        self.timings.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<TaskOutcome> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().unwrap().clone()
    }

    pub fn completed(&self) -> Vec<BatchSummary> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressReporter for RecordingReporter {
    async fn report_started(&self, total_items: usize) {
        self.started.lock().unwrap().push(total_items);
    }

    async fn report_timing(&self, timing: &FetchTiming) {
        self.timings.lock().unwrap().push(timing.clone());
    }

    async fn report_status(&self, outcome: &TaskOutcome) {
        self.statuses.lock().unwrap().push(outcome.clone());
    }

    async fn report_error(&self, item: &str, error: &str) {
        self.errors
            .lock()
            .unwrap()
            .push((item.to_string(), error.to_string()));
    }

    async fn report_completed(&self, summary: &BatchSummary) {
        self.completed.lock().unwrap().push(summary.clone());
    }
}

/// SHA-1の16進ダイジェスト
pub fn sha1_hex(data: &[u8]) -> String {
    Sha1Digester::new().digest_hex(data).unwrap()
}

/// 偶数番目は正しい署名、奇数番目は誤った署名を持つレコード群
pub fn alternating_records(count: usize) -> Vec<SignedRecord> {
    (0..count)
        .map(|i| {
            let content = format!("content-{i}");
            let signature = if i % 2 == 0 {
                sha1_hex(content.as_bytes())
            } else {
                "0".repeat(40)
            };
            SignedRecord::new(format!("file{i}"), content, signature)
        })
        .collect()
}
