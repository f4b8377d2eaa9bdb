// サービス層 - 機能別の具象実装
// 各サービスは特定の責任を持ち、疎結合で設計されている

pub mod config;
pub mod digest;
pub mod monitoring;
pub mod processing;
pub mod transport;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::DefaultBatchConfig;
pub use digest::{Sha1Digester, Sha256Digester};
pub use monitoring::{LogReporter, NoOpProgressReporter, TimingLog};
pub use processing::{SignatureCheck, TimedFetch};
pub use transport::ReqwestTransport;
