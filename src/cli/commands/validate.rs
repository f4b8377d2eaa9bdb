use super::fetch::{reporter_for, seconds_to_duration};
use crate::{
    cli::{args::DigestAlgorithm, manifest::load_manifest},
    core::{ClassificationReport, Digester},
    engine::BatchEngine,
    services::{
        DefaultBatchConfig, LogReporter, Sha1Digester, Sha256Digester, SignatureCheck,
    },
};
use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;

/// validateコマンドの設定
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub manifest: PathBuf,
    pub algorithm: DigestAlgorithm,
    pub task_timeout: Option<f64>,
    pub json: bool,
    pub quiet: bool,
}

/// マニフェストに列挙された全レコードの署名を並列に検証
pub async fn execute_validate(options: ValidateOptions) -> Result<ClassificationReport> {
    let records = load_manifest(&options.manifest)?;
    let config = DefaultBatchConfig::new()
        .with_task_timeout(seconds_to_duration("--task-timeout", options.task_timeout)?);
    config.validate()?;

    let reporter = reporter_for(options.quiet);

    let start = Instant::now();
    let report = match options.algorithm {
        DigestAlgorithm::Sha1 => {
            run_validation(Sha1Digester::new(), records, config, reporter).await?
        }
        DigestAlgorithm::Sha256 => {
            run_validation(Sha256Digester::new(), records, config, reporter).await?
        }
    };
    let elapsed = start.elapsed();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} files in {elapsed:?}", report.classified());
        println!("ok: {:?}", report.matched);
        println!("bad: {:?}", report.mismatched);
    }

    Ok(report)
}

async fn run_validation<D>(
    digester: D,
    records: Vec<crate::core::SignedRecord>,
    config: DefaultBatchConfig,
    reporter: LogReporter,
) -> Result<ClassificationReport>
where
    D: Digester + 'static,
{
    let engine = BatchEngine::new(SignatureCheck::new(digester), config, reporter);
    Ok(engine.validate_signatures(records).await?)
}
