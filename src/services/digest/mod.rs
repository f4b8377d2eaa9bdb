// コンテンツダイジェスト機能
// バイト列から固定長の暗号学的ハッシュを16進文字列で生成

pub mod implementations;

// 公開API
pub use implementations::{Sha1Digester, Sha256Digester};
