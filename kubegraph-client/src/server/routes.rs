use axum::{
    extract::{Path, State},
    response::{Html, Json},
};
use http::StatusCode;
use tracing::{error, info};

use super::{pages, AppState};
use crate::graph::{load_pods, load_service, DotGraph};

pub async fn health() -> &'static str {
    "ok"
}

#[tracing::instrument]
pub async fn view_service(Path(service): Path<String>) -> Result<Html<String>, StatusCode> {
    let graph = service_graph(&service)?;
    info!(template = "view", graph = %graph.name, service = %service, "serving page");
    Ok(Html(pages::view_page(&service, &graph)))
}

#[tracing::instrument(skip(state))]
pub async fn view_pods(State(state): State<AppState>) -> Html<String> {
    let graph = load_pods(state.provider.as_ref()).await;
    info!(template = "pods", graph = %graph.name, "serving page");
    Html(pages::view_page("all pods", &graph))
}

#[tracing::instrument]
pub async fn service_json(Path(service): Path<String>) -> Result<Json<DotGraph>, StatusCode> {
    service_graph(&service).map(Json)
}

#[tracing::instrument(skip(state))]
pub async fn pods_json(State(state): State<AppState>) -> Json<DotGraph> {
    Json(load_pods(state.provider.as_ref()).await)
}

fn service_graph(service: &str) -> Result<DotGraph, StatusCode> {
    load_service(service).map_err(|e| {
        error!(error = %e, service = %service, "could not load service graph");
        StatusCode::NOT_FOUND
    })
}
