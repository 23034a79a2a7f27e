use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use http_proxy_exporter::cli::{Cli, version_text};
use http_proxy_exporter::config::load_config;
use http_proxy_exporter::probe::Orchestrator;
use http_proxy_exporter::proxy_client::ReqwestProxyClient;
use http_proxy_exporter::report::{Verdict, report};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cli: &Cli) -> anyhow::Result<Verdict> {
    let config = load_config(&cli.config_path).context("error reading configuration")?;

    let orchestrator = Orchestrator::new(ReqwestProxyClient::new(), config);
    let result = orchestrator.run().await;

    Ok(report(&result))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Best effort: a missing .env is normal.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if cli.version {
        print!("{}", version_text());
        return ExitCode::SUCCESS;
    }

    init_tracing();

    match run(&cli).await {
        Ok(verdict) => verdict.exit_code(),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
