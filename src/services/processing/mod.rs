// タスク単位の処理機能
// URLの取得時間計測と、コンテンツ署名の検証

pub mod fetch;
pub mod signature;

// 公開API
pub use fetch::TimedFetch;
pub use signature::SignatureCheck;
