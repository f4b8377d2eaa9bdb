// reqwestによるHttpTransport実装

use crate::core::{FetchResponse, HttpTransport};
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use std::time::Duration;

/// reqwestクライアントを使うHTTP通信実装
///
/// クライアントは内部でコネクションプールを共有するため、
/// タスク間ではArc経由で1インスタンスを使い回す
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// 制限時間なしのクライアントを作成
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// 既存のクライアントから作成
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<FetchResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;

        let status = response.status();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(anyhow::Error::from))
            .boxed();

        Ok(FetchResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// ReqwestTransportのビルダー
#[derive(Debug, Default, Clone)]
pub struct ReqwestTransportBuilder {
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ReqwestTransportBuilder {
    /// リクエスト全体（ボディ読み込みを含む）の制限時間
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<ReqwestTransport> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().context("HTTPクライアントの作成に失敗しました")?;
        Ok(ReqwestTransport::with_client(client))
    }
}
