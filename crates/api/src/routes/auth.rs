//! Login: the token issuer's HTTP face

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    auth::password,
    error::{ApiError, ApiResult},
    state::AppState,
    store::users::{self, User},
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// `POST /login`
///
/// Both failure paths, unknown username and wrong password, run a full
/// digest verification and answer with the same 401, so a caller cannot
/// tell which half of the credentials was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = users::find_by_username(&state.pool, &body.username).await?;

    let Some(user) = user else {
        let _ = password::verify_password(&body.password, state.dummy_hash());
        tracing::info!(username = %body.username, "login failed: unknown username");
        return Err(ApiError::InvalidCredentials);
    };

    if !password::verify_password(&body.password, &user.password_hash)? {
        tracing::info!(username = %body.username, "login failed: wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let (token, jti) = state
        .jwt_manager
        .generate_token(&user.username)
        .map_err(|e| ApiError::Internal(e.into()))?;

    tracing::info!(username = %user.username, jti = %jti, "login succeeded, token issued");

    Ok(Json(LoginResponse { user, token }))
}
