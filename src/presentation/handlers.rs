// HTTP request handlers
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Deserialize)]
pub struct RenderQuery {
    pub url: Option<String>,
    pub token: Option<String>,
}

/// Request-level error taxonomy. Missing credentials are the caller's
/// problem and are reported before any upstream fetch; upstream failures
/// propagate as a failed render with no retry and no cached page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(
        "Error: Missing Nightscout URL. Add it to the address \
         (?url=https%3A%2F%2Fexample.com) or set nightscout.default_url \
         in the server configuration."
    )]
    MissingUrl,
    #[error(
        "Error: Missing Nightscout token. Add it to the address \
         (?token=secret-12345) or set nightscout.default_token \
         in the server configuration."
    )]
    MissingToken,
    #[error("Upstream fetch failed: {0:#}")]
    Upstream(#[from] anyhow::Error),
}

impl RenderError {
    fn status(&self) -> StatusCode {
        match self {
            RenderError::MissingUrl | RenderError::MissingToken => StatusCode::BAD_REQUEST,
            RenderError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        if let RenderError::Upstream(error) = &self {
            tracing::error!("render failed: {:#}", error);
        }
        (self.status(), self.to_string()).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render one dashboard page. Credentials come from the query string with
/// configured defaults as fallback.
pub async fn render_page(
    Query(query): Query<RenderQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, RenderError> {
    let url = query
        .url
        .filter(|u| !u.is_empty())
        .or_else(|| state.nightscout_defaults.default_url.clone())
        .ok_or(RenderError::MissingUrl)?;
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .or_else(|| state.nightscout_defaults.default_token.clone())
        .ok_or(RenderError::MissingToken)?;

    let html = state.render_service.render_page(&url, &token).await?;
    Ok(Html(html))
}
