//! Staybook development proxy
//!
//! Forwards `/api`-prefixed requests from a local frontend dev server to the
//! booking backend so the browser talks to a single origin during
//! development. TLS verification toward the backend is relaxed by default;
//! this is a development convenience, not a production component.

mod cli;
mod proxy;

use std::process;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use url::Url;

use cli::Cli;
use proxy::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse_args();
    init_logging(&cli);

    if let Err(err) = run(cli).await {
        tracing::error!("{err:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let backend = Url::parse(&cli.backend)
        .with_context(|| format!("invalid backend origin: {}", cli.backend))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(
            staybook_client::config::DEFAULT_TIMEOUT_SECS,
        ))
        .danger_accept_invalid_certs(!cli.verify_tls)
        .build()
        .context("failed to create upstream HTTP client")?;

    let state = AppState {
        client,
        backend: backend.clone(),
        path_prefix: cli.path_prefix.clone(),
    };

    let listener = TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("cannot listen on {}", cli.listen))?;

    tracing::info!(
        listen = %cli.listen,
        backend = %backend,
        prefix = %cli.path_prefix,
        tls_verification = cli.verify_tls,
        "devproxy up"
    );

    axum::serve(listener, proxy::router(state))
        .await
        .context("server error")?;

    Ok(())
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
