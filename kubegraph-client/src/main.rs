use std::sync::Arc;

use anyhow::anyhow;
use clap::Parser;
use tracing::{error, info};

use kubegraph_client::{
    config::{self, Args},
    logging, server, KubeProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::setup_logger(args.log_dir.as_deref(), &args.otlp_endpoint)
        .map_err(|e| anyhow!("failed to set up logging: {e}"))?;

    let result = serve(&args).await;
    if let Err(e) = &result {
        error!(error = %e, "kubegraph stopped");
    }

    logging::shutdown();
    result
}

async fn serve(args: &Args) -> anyhow::Result<()> {
    let client = config::build_client(args.context.clone()).await?;
    let state = server::AppState::new(Arc::new(KubeProvider::new(client)));

    let addr = args.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "kubegraph listening");

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
