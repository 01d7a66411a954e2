use std::path::PathBuf;

use clap::Parser;
use kube::{config::KubeConfigOptions, Client, Config};

use crate::error::ProviderError;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "kubegraph",
    version,
    about = "Serve a live DOT map of a cluster's namespaces and pods"
)]
pub struct Args {
    /// Port to listen on
    #[arg(long, env = "KUBEGRAPH_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "KUBEGRAPH_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Kubeconfig context; in-cluster or current-context config when unset
    #[arg(long, env = "KUBEGRAPH_CONTEXT")]
    pub context: Option<String>,

    /// Directory for kubegraph.log; stderr only when unset
    #[arg(long, env = "KUBEGRAPH_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// OTLP collector, used when built with the `telemetry` feature
    #[arg(long, env = "KUBEGRAPH_OTLP_ENDPOINT", default_value = "http://localhost:4317")]
    pub otlp_endpoint: String,
}

impl Args {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[tracing::instrument]
pub async fn build_client(context: Option<String>) -> Result<Client, ProviderError> {
    let config = match context {
        Some(context) => {
            let options = KubeConfigOptions {
                context: Some(context),
                cluster: None,
                user: None,
            };
            Config::from_kubeconfig(&options).await?
        }
        None => Config::infer().await?,
    };

    Ok(Client::try_from(config)?)
}
