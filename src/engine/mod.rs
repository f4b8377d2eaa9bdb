// エンジン層 - ファンアウト、完了バリア、集計のオーケストレーション
// サービス層を組み合わせて高レベルな処理を提供

pub mod aggregator;
pub mod api;
pub mod barrier;
pub mod dispatcher;
mod pipeline;
pub mod processing_engine;

// 公開API - 主要エンジンクラス
pub use aggregator::SharedAggregator;
pub use api::{create_fetch_engine, create_validation_engine, time_urls, validate_signatures};
pub use barrier::{CompletionBarrier, CompletionGuard};
pub use dispatcher::{spawn_fan_out, DispatchCounters, TaskContext};
pub use pipeline::{spawn_status_closer, BatchPipeline};
pub use processing_engine::BatchEngine;
