// 独立した作業アイテムを並列に実行し、結果を集約するバッチ実行ライブラリ
//
// core     - トレイト・型・エラー
// services - 処理単位・通信・ダイジェスト・設定・報告の具象実装
// engine   - ファンアウト、完了バリア、集計器、ステータスチャンネル
// cli      - コマンドラインインターフェース

pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

pub use crate::core::{
    BatchSummary, ClassificationReport, FetchTiming, ProcessingError, ProcessingResult,
    SignedRecord, TaskOutcome,
};
pub use engine::{BatchEngine, SharedAggregator};
