// バッチ実行用のカスタムエラー型定義
// 個々のタスクの失敗とバッチ全体の失敗を区別する

use std::time::Duration;
use thiserror::Error;

/// バッチ実行固有のエラー型
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("{url:?} - {source}")]
    TransportError {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{url:?} - bad status - {status} {status_text}")]
    BadStatusError {
        url: String,
        status: u16,
        status_text: String,
    },

    #[error("{url:?} - body read failed - {source}")]
    BodyReadError {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("digest failed for {item} - {source}")]
    DigestError {
        item: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{item} - timed out after {limit:?}")]
    TimeoutError { item: String, limit: Duration },

    #[error("{item} - task panicked - {message}")]
    PanicError { item: String, message: String },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("マニフェストエラー: {path} - {reason}")]
    ManifestError { path: String, reason: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("内部エラー: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl ProcessingError {
    /// 通信エラーの作成
    pub fn transport(url: impl Into<String>, source: anyhow::Error) -> Self {
        Self::TransportError {
            url: url.into(),
            source,
        }
    }

    /// 200以外のステータスによるエラーの作成
    pub fn bad_status(url: impl Into<String>, status: u16, status_text: impl Into<String>) -> Self {
        Self::BadStatusError {
            url: url.into(),
            status,
            status_text: status_text.into(),
        }
    }

    /// レスポンスボディ読み込みエラーの作成
    pub fn body_read(url: impl Into<String>, source: anyhow::Error) -> Self {
        Self::BodyReadError {
            url: url.into(),
            source,
        }
    }

    /// ダイジェスト計算エラーの作成
    pub fn digest(item: impl Into<String>, source: anyhow::Error) -> Self {
        Self::DigestError {
            item: item.into(),
            source,
        }
    }

    /// タイムアウトエラーの作成
    pub fn timeout(item: impl Into<String>, limit: Duration) -> Self {
        Self::TimeoutError {
            item: item.into(),
            limit,
        }
    }

    /// タスク内パニックのエラー作成
    pub fn panicked(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PanicError {
            item: item.into(),
            message: message.into(),
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// マニフェスト読み込みエラーの作成
    pub fn manifest(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ManifestError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// 内部エラーの作成
    pub fn internal(source: anyhow::Error) -> Self {
        Self::InternalError { source }
    }

    /// 単一アイテムに閉じた失敗かどうか
    ///
    /// trueの場合は兄弟タスクやバッチ全体に影響しない
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::TransportError { .. }
            | Self::BadStatusError { .. }
            | Self::BodyReadError { .. }
            | Self::DigestError { .. }
            | Self::TimeoutError { .. }
            | Self::PanicError { .. } => true,
            Self::ConfigurationError { .. }
            | Self::ManifestError { .. }
            | Self::TaskError { .. }
            | Self::InternalError { .. } => false,
        }
    }
}

/// バッチ実行の結果型
pub type ProcessingResult<T> = std::result::Result<T, ProcessingError>;

impl From<anyhow::Error> for ProcessingError {
    fn from(error: anyhow::Error) -> Self {
        ProcessingError::InternalError { source: error }
    }
}

impl From<tokio::task::JoinError> for ProcessingError {
    fn from(error: tokio::task::JoinError) -> Self {
        ProcessingError::TaskError { source: error }
    }
}
