use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::types::UpdateMovieState;
use crate::catalog::{FacetGroup, FilterParams, MovieRecord};
use crate::server::AppState;
use crate::util::QueryParams;

pub async fn list_movies(
    State(state): State<AppState>,
    params: Option<Query<QueryParams>>,
) -> Json<Vec<MovieRecord>> {
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let filter = FilterParams::from_query(&params);

    Json(state.catalog.filter(&filter).await)
}

pub async fn get_movie_by_id(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> Json<Vec<MovieRecord>> {
    let movie = state.catalog.get_by_imdb_id(&imdb_id).await;
    Json(movie.into_iter().collect())
}

pub async fn get_movie_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<Vec<MovieRecord>> {
    let movie = state.catalog.get_by_title(&name).await;
    Json(movie.into_iter().collect())
}

pub async fn update_movie_state(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
    body: Bytes,
) -> StatusCode {
    let Some((field, value)) = UpdateMovieState::from_body(&body).mutation() else {
        return StatusCode::PRECONDITION_FAILED;
    };

    if state.catalog.set_flag(&imdb_id, field, value).await {
        StatusCode::OK
    } else {
        StatusCode::PRECONDITION_FAILED
    }
}

pub async fn get_facets(State(state): State<AppState>) -> Json<Vec<FacetGroup>> {
    Json(state.catalog.facets().await)
}
