//! Movie catalog routes (read-only)

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    store::movies::{self, Director, Genre, Movie},
};

/// `GET /movies`
pub async fn list_movies(State(state): State<AppState>) -> ApiResult<Json<Vec<Movie>>> {
    let all = movies::find_all(&state.pool).await?;
    Ok(Json(all))
}

/// `GET /movies/{Title}`
pub async fn get_movie(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<Json<Movie>> {
    let movie = movies::find_by_title(&state.pool, &title)
        .await?
        .ok_or(ApiError::NotFound("movie"))?;
    Ok(Json(movie))
}

/// `GET /genres/{Name}`
pub async fn get_genre(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Genre>> {
    let genre = movies::find_genre(&state.pool, &name)
        .await?
        .ok_or(ApiError::NotFound("genre"))?;
    Ok(Json(genre))
}

/// `GET /directors/{Name}`
pub async fn get_director(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Director>> {
    let director = movies::find_director(&state.pool, &name)
        .await?
        .ok_or(ApiError::NotFound("director"))?;
    Ok(Json(director))
}
