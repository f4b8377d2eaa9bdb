// ネットワーク通信機能
// GETリクエストの発行とボディストリームの受け渡し

pub mod reqwest_transport;

// 公開API
pub use reqwest_transport::ReqwestTransport;
