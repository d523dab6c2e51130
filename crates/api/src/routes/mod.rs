//! HTTP surface
//!
//! All routes hang off the root router; the auth gate runs on every
//! request and applies the public-route policy itself, so gating changes
//! are policy edits rather than router rewiring.

pub mod auth;
pub mod movies;
pub mod users;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{auth::require_auth, state::AppState};

async fn root() -> &'static str {
    "Welcome to the myFlix movie API"
}

pub fn create_router(state: AppState) -> Router {
    let auth_state = state.auth_state();

    Router::new()
        .route("/", get(root))
        .route("/login", post(auth::login))
        .route("/users", post(users::register).get(users::list_users))
        .route(
            "/users/{Username}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/{Username}/movies/{MovieID}",
            post(users::add_favorite).delete(users::remove_favorite),
        )
        .route("/movies", get(movies::list_movies))
        .route("/movies/{Title}", get(movies::get_movie))
        .route("/genres/{Name}", get(movies::get_genre))
        .route("/directors/{Name}", get(movies::get_director))
        .layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(state)
}
