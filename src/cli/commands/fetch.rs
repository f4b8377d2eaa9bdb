use crate::{
    core::ProcessingError,
    engine::BatchEngine,
    services::{DefaultBatchConfig, LogReporter, ReqwestTransport, TimedFetch},
};
use anyhow::Result;
use std::time::Duration;

/// fetchコマンドの設定
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub urls: Vec<String>,
    pub request_timeout: Option<f64>,
    pub task_timeout: Option<f64>,
    pub user_agent: Option<String>,
    pub quiet: bool,
}

/// 秒数指定を Duration に変換
pub fn seconds_to_duration(field: &str, seconds: Option<f64>) -> Result<Option<Duration>> {
    seconds
        .map(|secs| {
            Duration::try_from_secs_f64(secs).map_err(|e| {
                anyhow::Error::from(ProcessingError::configuration(format!(
                    "{field} must be a non-negative number of seconds: {e}"
                )))
            })
        })
        .transpose()
}

/// quiet指定に応じたレポーターを選ぶ
pub fn reporter_for(quiet: bool) -> LogReporter {
    if quiet {
        LogReporter::quiet()
    } else {
        LogReporter::new()
    }
}

/// 全URLの応答時間を並列に計測
pub async fn execute_fetch(options: FetchOptions) -> Result<()> {
    let mut transport = ReqwestTransport::builder()
        .request_timeout(seconds_to_duration("--timeout", options.request_timeout)?);
    if let Some(user_agent) = options.user_agent {
        transport = transport.user_agent(user_agent);
    }

    let config = DefaultBatchConfig::new()
        .with_task_timeout(seconds_to_duration("--task-timeout", options.task_timeout)?);
    config.validate()?;

    let engine = BatchEngine::new(
        TimedFetch::new(transport.build()?),
        config,
        reporter_for(options.quiet),
    );

    let url_count = options.urls.len();
    let summary = engine.time_urls(options.urls).await;

    println!(
        "{url_count} URLs in {:?} ({} ok, {} failed)",
        summary.elapsed, summary.outcomes, summary.errors
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_seconds_to_duration() {
        assert_eq!(seconds_to_duration("--t", None).unwrap(), None);
        assert_eq!(
            seconds_to_duration("--t", Some(0.25)).unwrap(),
            Some(Duration::from_millis(250))
        );
        assert!(seconds_to_duration("--t", Some(-1.0)).is_err());
        assert!(seconds_to_duration("--t", Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_reporter_for_quiet_flag() {
        assert!(reporter_for(true).is_quiet());
        assert!(!reporter_for(false).is_quiet());
    }

    #[tokio::test]
    async fn test_execute_fetch_completes_with_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fail"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = execute_fetch(FetchOptions {
            urls: vec![format!("{}/ok", server.uri()), format!("{}/fail", server.uri())],
            request_timeout: Some(5.0),
            quiet: true,
            ..FetchOptions::default()
        })
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_execute_fetch_rejects_zero_task_timeout() {
        let result = execute_fetch(FetchOptions {
            urls: vec!["http://127.0.0.1:1/".to_string()],
            task_timeout: Some(0.0),
            ..FetchOptions::default()
        })
        .await;

        assert!(result.is_err());
    }
}
