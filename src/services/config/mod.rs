// 設定管理機能
// タスク制限時間、ステータスチャンネル、進捗報告の設定

pub mod implementations;

// 公開API
pub use implementations::DefaultBatchConfig;
