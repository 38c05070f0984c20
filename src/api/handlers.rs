//! API endpoint handlers
//!
//! Each handler converts wire indices, calls one store or query-service
//! operation, and shapes the JSON response. Store calls that may write run on
//! the blocking pool, since every write ends in an fsync and a rename.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{debug, warn};

use super::types::{
    AddUrlRequest, DeleteUrlRequest, ErrorResponse, QueryRequest, QueryResponse,
    RenameUrlSetRequest, UrlSetResponse,
};
use super::AppState;
use crate::store::{checked_index, IndexKind, Store, StoreError, StoreResult};

/// Handler failure mapped onto an HTTP response
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),

    /// A blocking store call panicked or was cancelled
    Task(JoinError),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}

impl From<JoinError> for ApiError {
    fn from(error: JoinError) -> Self {
        Self::Task(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Store(e @ StoreError::IndexOutOfRange { .. }) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            Self::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::Task(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Store task failed: {}", e),
            ),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        } else {
            warn!("Rejected request: {}", message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Runs `op` against the store on the blocking pool
async fn blocking_store<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&Store) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    Ok(tokio::task::spawn_blocking(move || op(&store)).await??)
}

/// POST /api/ - Run a query and save its URL into a column
///
/// The fragment is degraded in-band when the upstream fetch or the
/// extraction fails; only store errors produce an error status.
pub async fn run_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<(StatusCode, Json<QueryResponse>), ApiError> {
    debug!(
        "Query request: set {} column {} url {}",
        request.set_index, request.column_index, request.search_url
    );
    let set_index = checked_index(request.set_index, IndexKind::Set)?;
    let column_index = checked_index(request.column_index, IndexKind::Column)?;

    let report = state
        .queries
        .run_query(set_index, column_index, &request.search_url)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(QueryResponse {
            response: report.outcome.into_fragment().into_html(),
            urls: report.urls,
        }),
    ))
}

/// GET /api/ - Names of all sets in index order
pub async fn list_url_set_names(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.url_set_names())
}

/// GET /api/{setIndex} - Slots of one set, creating it at the next free index
pub async fn get_url_set(
    State(state): State<AppState>,
    Path(set_index): Path<i64>,
) -> Result<Json<UrlSetResponse>, ApiError> {
    let set_index = checked_index(set_index, IndexKind::Set)?;
    let urls = blocking_store(&state, move |store| store.get_or_create_url_set(set_index)).await?;
    Ok(Json(UrlSetResponse { urls }))
}

/// POST /api/{setIndex} - Rename a set, answering with all set names
pub async fn rename_url_set(
    State(state): State<AppState>,
    Path(set_index): Path<i64>,
    Json(request): Json<RenameUrlSetRequest>,
) -> Result<(StatusCode, Json<Vec<String>>), ApiError> {
    let set_index = checked_index(set_index, IndexKind::Set)?;
    let names = blocking_store(&state, move |store| {
        store.update_url_set_name(set_index, &request.name)?;
        Ok(store.url_set_names())
    })
    .await?;
    Ok((StatusCode::CREATED, Json(names)))
}

/// DELETE /api/ - Remove one column, shifting later columns left
pub async fn delete_url(
    State(state): State<AppState>,
    Json(request): Json<DeleteUrlRequest>,
) -> Result<Json<UrlSetResponse>, ApiError> {
    let set_index = checked_index(request.set_index, IndexKind::Set)?;
    let column_index = checked_index(request.column_index, IndexKind::Column)?;
    let urls =
        blocking_store(&state, move |store| store.delete_url_at(set_index, column_index)).await?;
    Ok(Json(UrlSetResponse { urls }))
}

/// PUT /api/ - Append an unset column to a set
pub async fn add_url(
    State(state): State<AppState>,
    Json(request): Json<AddUrlRequest>,
) -> Result<(StatusCode, Json<UrlSetResponse>), ApiError> {
    let set_index = checked_index(request.set_index, IndexKind::Set)?;
    let urls = blocking_store(&state, move |store| store.add_url(set_index)).await?;
    Ok((StatusCode::CREATED, Json(UrlSetResponse { urls })))
}
