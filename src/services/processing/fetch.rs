// TimedFetch - URL 1件の応答時間計測

use crate::core::{FetchTiming, HttpTransport, ProcessingError, ProcessingResult, UnitOfWork};
use async_trait::async_trait;
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Instant;

/// URLの取得にかかる時間を計測する処理単位
///
/// 200以外のステータスは失敗として扱う
pub struct TimedFetch<T> {
    transport: Arc<T>,
}

impl<T> TimedFetch<T>
where
    T: HttpTransport,
{
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// 1件のURLを取得し、ボディを読み切るまでの時間を返す
    pub async fn time_url(&self, url: &str) -> ProcessingResult<FetchTiming> {
        let start = Instant::now();

        let response = self
            .transport
            .get(url)
            .await
            .map_err(|e| ProcessingError::transport(url, e))?;

        if response.status != 200 {
            return Err(ProcessingError::bad_status(
                url,
                response.status,
                response.status_text,
            ));
        }

        // コネクション再利用と正確な計測のため、ボディは最後まで読む
        let mut body = response.body;
        let mut body_bytes = 0u64;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| ProcessingError::body_read(url, e))?;
            body_bytes += chunk.len() as u64;
        }

        Ok(FetchTiming {
            url: url.to_string(),
            elapsed: start.elapsed(),
            body_bytes,
        })
    }
}

#[async_trait]
impl<T> UnitOfWork for TimedFetch<T>
where
    T: HttpTransport + 'static,
{
    type Item = String;
    type Outcome = FetchTiming;

    fn label(&self, item: &String) -> String {
        item.clone()
    }

    async fn run(&self, item: String) -> ProcessingResult<FetchTiming> {
        self.time_url(&item).await
    }
}
