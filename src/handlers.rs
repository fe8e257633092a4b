use crate::errors::AppError;
use crate::models::{iso_timestamp, HealthResponse, VoteAck, VoteRecord, VoteRequest};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::{header::USER_AGENT, HeaderMap},
    response::{Html, Redirect},
    Json,
};
use chrono::Utc;
use std::net::SocketAddr;
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.page.to_string())
}

/// The `?t=` cache buster the page appends is ignored.
pub async fn random_dog(State(state): State<AppState>) -> Redirect {
    let image = state.catalog.pick_random();
    debug!(image, "redirecting to random dog");
    Redirect::to(image)
}

pub async fn vote(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Json<VoteAck>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let now = Utc::now();
    let (vote, timestamp) = request.validate(now)?;

    let record = VoteRecord {
        vote,
        timestamp,
        ip: client_ip(connect_info),
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        received_at: iso_timestamp(now),
    };

    state.votes.append(&record).await?;
    info!(vote = %record.vote, ip = %record.ip, "vote recorded");
    Ok(Json(VoteAck::recorded()))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: iso_timestamp(Utc::now()),
    })
}

fn client_ip(connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
