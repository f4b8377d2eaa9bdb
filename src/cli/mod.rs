// CLI層 - コマンドライン引数の定義と処理
// ユーザーインターフェースとアプリケーションロジックの橋渡し

pub mod args;
pub mod commands;
pub mod manifest;

// 公開API
pub use args::*;
pub use commands::*;
pub use manifest::{load_manifest, parse_manifest};
