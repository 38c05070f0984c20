//! HTTP boundary for the URL store and the query service
//!
//! Routes:
//! - `POST   /api/`           run a query and save it
//! - `GET    /api/`           list set names
//! - `GET    /api/{setIndex}` get one set (auto-created at the next index)
//! - `POST   /api/{setIndex}` rename a set
//! - `DELETE /api/`           delete a column
//! - `PUT    /api/`           append a column

mod handlers;
mod types;

pub use handlers::ApiError;
pub use types::{
    AddUrlRequest, DeleteUrlRequest, ErrorResponse, QueryRequest, QueryResponse,
    RenameUrlSetRequest, UrlSetResponse,
};

use crate::config::{validate, Config};
use crate::query::QueryService;
use crate::store::Store;
use axum::{
    routing::{get, MethodRouter},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub queries: Arc<QueryService>,
}

impl AppState {
    /// Builds state around a query service; the store is the service's own
    pub fn new(queries: QueryService) -> Self {
        Self {
            store: Arc::clone(queries.store()),
            queries: Arc::new(queries),
        }
    }
}

/// Builds the API router
///
/// When `static_dir` is given, its files are served under `/static` and its
/// `images/` subdirectory under `/images`.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let collection: MethodRouter<AppState> = get(handlers::list_url_set_names)
        .post(handlers::run_query)
        .delete(handlers::delete_url)
        .put(handlers::add_url);
    let single: MethodRouter<AppState> =
        get(handlers::get_url_set).post(handlers::rename_url_set);

    let mut router = Router::new()
        .route("/api", collection.clone())
        .route("/api/", collection)
        .route("/api/:set_index", single)
        .with_state(state);

    if let Some(dir) = static_dir {
        router = router
            .nest_service("/static", ServeDir::new(dir))
            .nest_service("/images", ServeDir::new(dir.join("images")));
    }

    router.layer(TraceLayer::new_for_http())
}

/// Wires a complete application from configuration
///
/// Opens the URL store (a corrupt store is an error, never replaced),
/// builds the query service and the router.
///
/// # Returns
///
/// * `Ok((Router, Arc<Store>))` - Router ready to serve, plus the shared store
/// * `Err(ScoutError)` - Invalid config, unreadable store, or HTTP client failure
pub fn build_app(config: &Config) -> crate::Result<(Router, Arc<Store>)> {
    validate(config)?;

    let store = Arc::new(Store::open(&config.store.path)?);
    let queries = QueryService::from_config(&config.fetcher, Arc::clone(&store))?;
    if config.fetcher.offline {
        tracing::warn!("Offline mode: queries return synthetic documents");
    }

    let router = create_router(AppState::new(queries), config.server.static_dir.as_deref());
    Ok((router, store))
}
