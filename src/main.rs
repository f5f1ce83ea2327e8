mod cli;
mod config_doc;
mod infra;
mod logging;
mod pipeline;
mod shared;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use infra::github::OctocrabClient;
use pipeline::PipelineOutcome;
use shared::env_var::EnvVars;
use shared::token::{EnvTokenSource, TokenSource};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("image update failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let request = cli.into_request()?;
    let env = EnvVars::load();
    let token = EnvTokenSource::new(&env).token()?;
    let client = OctocrabClient::with_base_url(&env.api_url, &token)?;

    match pipeline::run(&request, &env.server_url, &token, &client).await? {
        PipelineOutcome::AlreadySet { document, key } => {
            tracing::info!(
                document = %document.display(),
                %key,
                "already up to date"
            );
        }
        PipelineOutcome::Published { pr, comment } => {
            tracing::info!(
                pr = %pr.url,
                comment = comment.as_ref().map(|c| c.url.as_str()),
                commented_sha = comment.as_ref().map(|c| c.sha.as_str()),
                "update published"
            );
        }
    }
    Ok(())
}
