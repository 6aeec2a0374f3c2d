use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use scheduler_core::client::HttpBundleClient;
use scheduler_core::config::{Config, DEFAULT_BUNDLE_API_URL, DEFAULT_SERVICE_TOKEN};
use scheduler_core::publisher::Publisher;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "bundle-scheduler",
    about = "Publish approved bundles whose scheduled release time has passed",
    version
)]
struct Cli {
    /// Base URL of the bundle API
    #[arg(long, env = "BUNDLES_API_URL", default_value = DEFAULT_BUNDLE_API_URL)]
    bundle_api_url: String,

    /// Service auth token for the bundle API
    #[arg(
        long,
        env = "BUNDLES_API_SERVICE_TOKEN",
        hide_env_values = true,
        default_value = DEFAULT_SERVICE_TOKEN
    )]
    service_token: String,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::new(cli.bundle_api_url, cli.service_token);
    info!(?config, "starting scheduled bundle publication");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let client = HttpBundleClient::new(&config.bundle_api_url)
            .context("failed to construct bundle API client")?;
        let publisher = Publisher::new(config, Arc::new(client));

        // The pass runs on its own task so this one stays free to watch for
        // an interrupt; whichever completes first decides the outcome. On
        // interrupt the in-flight pass is abandoned, not awaited, and dies
        // with the runtime.
        let pass = tokio::spawn(async move { publisher.run().await });

        tokio::select! {
            joined = pass => {
                let result = joined.context("publish pass panicked")??;
                let failed = result.failed_ids();
                if failed.is_empty() {
                    info!(published = result.outcomes.len(), "publish pass complete");
                } else {
                    warn!(?failed, "publish pass complete with failures");
                }
                Ok(())
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, abandoning publish pass");
                Ok(())
            }
        }
    })
}
