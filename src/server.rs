use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower::Layer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::catalog::CatalogRepo;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogRepo>,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<CatalogRepo>) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut routes = Router::new()
        .route("/movies", get(crate::api::list_movies))
        .route("/movies/id/:imdb_id", get(crate::api::get_movie_by_id))
        .route("/movies/name/:name", get(crate::api::get_movie_by_name))
        .route("/movies/:id", put(crate::api::update_movie_state))
        .route("/facets", get(crate::api::get_facets))
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        routes = routes.fallback_service(ServeDir::new(appdir));
    }

    // Path rewriting has to happen before routing, so it wraps the routed
    // service instead of being added with Router::layer.
    let routes = axum::middleware::from_fn(crate::middleware::normalize_path)
        .layer(routes.with_state(state));

    Router::new()
        .fallback_service(routes)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
