/// API request handlers

use super::responses::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use onionalias_common::AliasError;
use onionalias_core::{AliasRegistry, AliasResolver};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<AliasRegistry>,
    pub resolver: AliasResolver,
}

impl AppState {
    pub fn new(registry: Arc<AliasRegistry>) -> Self {
        Self {
            resolver: AliasResolver::new(registry.clone()),
            registry,
        }
    }
}

/// Handler for GET /api/aliases
pub async fn list_aliases(State(state): State<AppState>) -> Json<AliasListResponse> {
    debug!("API: GET /api/aliases");

    let mut aliases: Vec<AliasEntry> = state
        .registry
        .list()
        .into_iter()
        .map(|(alias, address)| AliasEntry {
            alias: alias.into(),
            address: address.into(),
        })
        .collect();
    aliases.sort_by(|a, b| a.alias.cmp(&b.alias));

    let total = aliases.len();
    Json(AliasListResponse { aliases, total })
}

/// Handler for GET /api/aliases/:alias
pub async fn get_alias(
    State(state): State<AppState>,
    Path(alias): Path<String>,
) -> Result<Json<AliasEntry>, AppError> {
    debug!("API: GET /api/aliases/{}", alias);

    match state.registry.resolve(&alias) {
        Some(address) => Ok(Json(AliasEntry {
            alias,
            address: address.into(),
        })),
        None => Err(AppError::not_found(format!("Unknown alias: {}", alias))),
    }
}

/// Handler for PUT /api/aliases/:alias
pub async fn set_alias(
    State(state): State<AppState>,
    Path(alias): Path<String>,
    Json(request): Json<SetAliasRequest>,
) -> Result<Json<AliasEntry>, AppError> {
    debug!("API: PUT /api/aliases/{}", alias);

    state.registry.set(alias.clone(), &request.address)?;

    Ok(Json(AliasEntry {
        alias,
        address: request.address,
    }))
}

/// Handler for DELETE /api/aliases/:alias
pub async fn remove_alias(
    State(state): State<AppState>,
    Path(alias): Path<String>,
) -> Json<RemoveAliasResponse> {
    debug!("API: DELETE /api/aliases/{}", alias);

    let removed = state.registry.remove(&alias);
    Json(RemoveAliasResponse { alias, removed })
}

/// Handler for DELETE /api/aliases
pub async fn clear_aliases(State(state): State<AppState>) -> Json<ClearAliasesResponse> {
    debug!("API: DELETE /api/aliases");

    let removed = state.registry.clear();
    Json(ClearAliasesResponse { removed })
}

/// Handler for GET /api/resolve/:host
pub async fn resolve_host(
    State(state): State<AppState>,
    Path(host): Path<String>,
) -> Json<ResolveResponse> {
    debug!("API: GET /api/resolve/{}", host);

    let (resolved, aliased) = match state.resolver.rewrite_host(&host) {
        Cow::Owned(address) => (address, true),
        Cow::Borrowed(unchanged) => (unchanged.to_string(), false),
    };

    Json(ResolveResponse {
        host,
        resolved,
        aliased,
    })
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    debug!("API: GET /health");
    (StatusCode::OK, "OK")
}

/// Application error type
#[derive(Debug)]
pub struct AppError {
    message: String,
    status_code: StatusCode,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::NOT_FOUND,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!("API request rejected: {}", self.message);

        let body = Json(ErrorResponse::new(self.message, self.status_code.as_u16()));

        (self.status_code, body).into_response()
    }
}

impl From<AliasError> for AppError {
    fn from(err: AliasError) -> Self {
        match err {
            AliasError::InvalidInput(_) => AppError::bad_request(err.to_string()),
        }
    }
}
