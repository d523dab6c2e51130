//! User registration, profile, and favorites routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use time::Date;
use uuid::Uuid;

use crate::{
    auth::password,
    error::{ApiError, ApiResult, FieldError},
    state::AppState,
    store::users::{self, User, UserInput},
};

const MIN_USERNAME_LEN: usize = 5;

/// Body for registration and profile update. Field names match the wire
/// format clients have always sent.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", default)]
    pub birthday: Option<Date>,
}

/// Field-level validation, all checks reported at once.
fn validate(body: &UserRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    if body.username.len() < MIN_USERNAME_LEN {
        errors.push(FieldError {
            field: "Username",
            message: "Username must be at least 5 characters",
        });
    }
    if !body.username.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(FieldError {
            field: "Username",
            message: "Username contains non alphanumeric characters - not allowed",
        });
    }
    if body.password.is_empty() {
        errors.push(FieldError {
            field: "Password",
            message: "Password is required",
        });
    }
    if !is_valid_email(&body.email) {
        errors.push(FieldError {
            field: "Email",
            message: "Email does not appear to be valid",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn hashed_input(body: UserRequest) -> ApiResult<UserInput> {
    let password_hash = password::hash_password(&body.password)?;
    Ok(UserInput {
        username: body.username,
        password_hash,
        email: body.email,
        birthday: body.birthday,
    })
}

/// `POST /users`: register. 201 with the created record, 422 on bad
/// input, 400 when the username is taken (decided by the database's
/// unique constraint, so racing registrations cannot both win).
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<UserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    validate(&body)?;

    let input = hashed_input(body)?;
    let user = users::create(&state.pool, input).await?;

    tracing::info!(username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let all = users::find_all(&state.pool).await?;
    Ok(Json(all))
}

/// `GET /users/{Username}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<User>> {
    let user = users::find_by_username(&state.pool, &username)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user))
}

/// `PUT /users/{Username}`: full profile replacement with the same
/// validation as registration; the password is re-hashed every time.
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<UserRequest>,
) -> ApiResult<Json<User>> {
    validate(&body)?;

    let input = hashed_input(body)?;
    let user = users::update(&state.pool, &username, input)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    tracing::info!(username = %user.username, "user profile updated");
    Ok(Json(user))
}

/// `DELETE /users/{Username}`: deregister. Unknown usernames answer 400,
/// as this endpoint always has.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Value>> {
    if !users::delete(&state.pool, &username).await? {
        return Err(ApiError::BadRequest(format!("{username} was not found")));
    }

    tracing::info!(username = %username, "user deleted");
    Ok(Json(json!({ "message": format!("{username} was deleted.") })))
}

/// `POST /users/{Username}/movies/{MovieID}`: add a favorite.
pub async fn add_favorite(
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<User>> {
    let user = users::add_favorite(&state.pool, &username, movie_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user))
}

/// `DELETE /users/{Username}/movies/{MovieID}`: remove a favorite.
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<User>> {
    let user = users::remove_favorite(&state.pool, &username, movie_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user))
}
