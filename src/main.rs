use anyhow::Result;
use batch_fanout::cli::{execute_fetch, execute_validate, Cli, Commands, FetchOptions, ValidateOptions};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            urls,
            timeout,
            task_timeout,
            user_agent,
        } => {
            execute_fetch(FetchOptions {
                urls,
                request_timeout: timeout,
                task_timeout,
                user_agent,
                quiet: cli.quiet,
            })
            .await?;
        }
        Commands::Validate {
            manifest,
            algorithm,
            task_timeout,
            json,
        } => {
            execute_validate(ValidateOptions {
                manifest,
                algorithm,
                task_timeout,
                json,
                quiet: cli.quiet,
            })
            .await?;
        }
    }

    Ok(())
}

// RUST_LOG が未設定なら info レベルで出力
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
