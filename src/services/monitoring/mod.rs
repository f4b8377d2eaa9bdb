// 進捗監視機能
// タスク単位のステータス、エラー、バッチ完了の報告

pub mod implementations;

// 公開API
pub use implementations::{LogReporter, NoOpProgressReporter, TimingLog};
