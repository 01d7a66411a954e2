// lib.rs
pub mod config;
pub mod dao;
pub mod error;
pub mod graph;
pub mod server;

cfg_if::cfg_if! {
    if #[cfg(feature = "telemetry")] {
        pub use kubegraph_telemetry as logging;
    } else {
        pub mod log;
        pub use self::log as logging;
    }
}

pub use dao::{ClusterProvider, KubeProvider};
pub use error::{GraphError, ProviderError};
pub use graph::{load_pods, load_service, DotGraph};
