// 高レベル公開API
// BatchEngineを簡単に使用できるようにするための便利な関数

use super::BatchEngine;
use crate::{
    core::{
        BatchSummary, ClassificationReport, Digester, HttpTransport, ProcessingError,
        ProcessingResult, SignedRecord,
    },
    services::{
        DefaultBatchConfig, LogReporter, ReqwestTransport, Sha1Digester, SignatureCheck,
        TimedFetch,
    },
};

/// URL計測用エンジン作成のヘルパー関数
pub fn create_fetch_engine<T>(
    transport: T,
) -> BatchEngine<TimedFetch<T>, DefaultBatchConfig, LogReporter>
where
    T: HttpTransport + 'static,
{
    BatchEngine::new(
        TimedFetch::new(transport),
        DefaultBatchConfig::default(),
        LogReporter::new(),
    )
}

/// 署名検証用エンジン作成のヘルパー関数
pub fn create_validation_engine<D>(
    digester: D,
) -> BatchEngine<SignatureCheck<D>, DefaultBatchConfig, LogReporter>
where
    D: Digester + 'static,
{
    BatchEngine::new(
        SignatureCheck::new(digester),
        DefaultBatchConfig::default(),
        LogReporter::new(),
    )
}

/// 既定のHTTPクライアントで全URLの応答時間を計測
pub async fn time_urls(urls: Vec<String>) -> ProcessingResult<BatchSummary> {
    let transport = ReqwestTransport::new().map_err(ProcessingError::internal)?;
    Ok(create_fetch_engine(transport).time_urls(urls).await)
}

/// SHA-1で全レコードの署名を検証
pub async fn validate_signatures(
    records: Vec<SignedRecord>,
) -> ProcessingResult<ClassificationReport> {
    create_validation_engine(Sha1Digester::new())
        .validate_signatures(records)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BatchConfig;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_create_fetch_engine_defaults() {
        let engine = create_fetch_engine(ReqwestTransport::new().unwrap());

        assert_eq!(engine.config().task_timeout(), None);
        assert!(!engine.reporter().is_quiet());
    }

    #[tokio::test]
    async fn test_time_urls_against_local_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("body"))
            .expect(2)
            .mount(&server)
            .await;

        let summary = time_urls(vec![
            format!("{}/100", server.uri()),
            format!("{}/50", server.uri()),
        ])
        .await
        .unwrap();

        assert_eq!(summary.outcomes, 2);
        assert_eq!(summary.errors, 0);
    }

    #[tokio::test]
    async fn test_validate_signatures_scenario() {
        let report = validate_signatures(vec![
            SignedRecord::new("a", "x", "11f6ad8ec52a2984abaafd7c3b516503785c2072"),
            SignedRecord::new("b", "y", "deadbeef"),
        ])
        .await
        .unwrap();

        assert_eq!(report.matched, vec!["a"]);
        assert_eq!(report.mismatched, vec!["b"]);
    }
}
