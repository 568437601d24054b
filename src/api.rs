use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::client::LedgerClient;
use crate::config::Config;
use crate::error::Error;
use crate::investigation::{self, Investigation, InvestigationParams};
use crate::layout::LayoutConfig;

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Clone)]
pub struct ApiState {
    pub client: Arc<LedgerClient>,
    pub layout: LayoutConfig,
}

impl ApiState {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            client: Arc::new(LedgerClient::new(cfg.api_url.clone())),
            layout: cfg.layout,
        }
    }
}

/// Investigation failures as HTTP responses. The server keeps serving.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Fetch(_) | Error::Parse(_) => StatusCode::BAD_GATEWAY,
            Error::EmptyDataset => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Investigation failed: {}", self.0);
        } else {
            warn!("Investigation rejected: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "ok"
}

async fn investigate(
    State(state): State<ApiState>,
    params: Result<Query<InvestigationParams>, QueryRejection>,
) -> Result<Json<Investigation>, ApiError> {
    let Query(params) = params.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    let result = investigation::run(&state.client, &params, Utc::now(), &state.layout).await?;
    Ok(Json(result))
}

pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/investigate", get(investigate))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(cfg: Config) -> eyre::Result<()> {
    let app = router(ApiState::from_config(&cfg));

    let addr = SocketAddr::from(([127, 0, 0, 1], cfg.port));
    info!("Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
