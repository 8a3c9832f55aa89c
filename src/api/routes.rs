use crate::api::api_error::APIError;
use crate::api::model::{
    GenerateConfigRequest, GenerateConfigResult, NetworkConfigRequest, NetworkConfigResult,
    TargetInput, TestDnsResult,
};
use crate::api::server::AppState;
use crate::error::Error;
use crate::zone::{generator, network};
use crate::{diagnostics, zone};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/generate-dns-config", post(generate_dns_config))
        .route("/test-dns", post(test_dns))
        .route("/network-config", post(network_config))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "healthy", "service": "DNS Configuration API"}))
}

#[allow(clippy::unused_async)]
async fn generate_dns_config(
    WithRejection(Json(payload), _): WithRejection<Json<GenerateConfigRequest>, APIError>,
) -> Result<Json<GenerateConfigResult>, APIError> {
    let req = payload.target.to_request()?;
    let artifacts = zone::generate_today(&req)?;
    tracing::info!(
        "generated configuration for {} ({} / {})",
        req.domain(),
        artifacts.forward_zone_file,
        artifacts.reverse_zone_file
    );
    let commands = generator::permission_commands(&req);
    Ok(Json(GenerateConfigResult::new(payload, artifacts, commands)))
}

async fn test_dns(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<TargetInput>, APIError>,
) -> Result<Json<TestDnsResult>, APIError> {
    let req = payload.to_request()?;
    tracing::info!("running diagnostics for {}", req.domain());
    let report = diagnostics::run(state.executor.clone(), &req, state.config.probe_timeout).await;
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(Error::from)?;
    Ok(Json(TestDnsResult::new(payload, report, timestamp)))
}

#[allow(clippy::unused_async)]
async fn network_config(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<NetworkConfigRequest>, APIError>,
) -> Result<Json<NetworkConfigResult>, APIError> {
    if payload.dns_ip.trim().is_empty() || payload.domain.trim().is_empty() {
        return Err(Error::MissingFields.into());
    }
    let interface = payload
        .interface
        .as_deref()
        .unwrap_or(&state.config.default_interface);
    Ok(Json(NetworkConfigResult {
        success: true,
        network_commands: network::network_commands(&payload.dns_ip, &payload.domain, interface)?,
        firewall_commands: network::firewall_commands(),
    }))
}
