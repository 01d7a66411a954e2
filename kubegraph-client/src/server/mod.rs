//! HTTP surface: HTML viewer pages and their JSON counterparts.
//!
//! Routes:
//! - GET /view/:service      - service graph page (404 when it cannot be built)
//! - GET /pods               - cluster pods graph page
//! - GET /api/view/:service  - service graph as JSON
//! - GET /api/pods           - cluster pods graph as JSON
//! - GET /health             - liveness

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::dao::ClusterProvider;

pub mod pages;
pub mod routes;

/// Collaborators shared by every request. Read-only.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ClusterProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ClusterProvider>) -> Self {
        Self { provider }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/view/:service", get(routes::view_service))
        .route("/pods", get(routes::view_pods))
        .route("/api/view/:service", get(routes::service_json))
        .route("/api/pods", get(routes::pods_json))
        .with_state(state)
}
