//! User records (the credential store)
//!
//! Username uniqueness is enforced by the `users_username_key` constraint;
//! a racing duplicate registration loses at the database, not in
//! application code. Favorites are a Postgres array: `array_append`
//! preserves insertion order and permits duplicates, `array_remove` drops
//! every occurrence of the id.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::error::ApiResult;

/// A stored user. Serialized with the wire field names clients have
/// always seen; the password hash never serializes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: Uuid,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday")]
    pub birthday: Option<Date>,
    #[serde(rename = "FavoriteMovies")]
    pub favorite_movies: Vec<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Validated input for creating or replacing a user record.
#[derive(Debug)]
pub struct UserInput {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub birthday: Option<Date>,
}

pub async fn find_all(pool: &PgPool) -> ApiResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT * FROM users ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> ApiResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Insert a new user. A duplicate username surfaces as
/// `ApiError::Conflict` via the unique-violation mapping.
pub async fn create(pool: &PgPool, input: UserInput) -> ApiResult<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash, email, birthday)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&input.username)
    .bind(&input.password_hash)
    .bind(&input.email)
    .bind(input.birthday)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Replace the profile fields of an existing user. Returns `None` if no
/// user with that username exists.
pub async fn update(pool: &PgPool, username: &str, input: UserInput) -> ApiResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET username = $2,
            password_hash = $3,
            email = $4,
            birthday = $5,
            updated_at = NOW()
        WHERE username = $1
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(&input.username)
    .bind(&input.password_hash)
    .bind(&input.email)
    .bind(input.birthday)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Delete a user by username. Returns whether a record was removed.
pub async fn delete(pool: &PgPool, username: &str) -> ApiResult<bool> {
    let rows_affected = sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(rows_affected > 0)
}

/// Append a movie id to a user's favorites. Duplicates are allowed.
pub async fn add_favorite(
    pool: &PgPool,
    username: &str,
    movie_id: Uuid,
) -> ApiResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET favorite_movies = array_append(favorite_movies, $2),
            updated_at = NOW()
        WHERE username = $1
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(movie_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Remove every occurrence of a movie id from a user's favorites.
pub async fn remove_favorite(
    pool: &PgPool,
    username: &str,
    movie_id: Uuid,
) -> ApiResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET favorite_movies = array_remove(favorite_movies, $2),
            updated_at = NOW()
        WHERE username = $1
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(movie_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "jdoe1".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            email: "j@x.com".to_string(),
            birthday: None,
            favorite_movies: vec![],
            created_at: datetime!(2024-01-01 00:00:00 UTC),
            updated_at: datetime!(2024-01-01 00:00:00 UTC),
        }
    }

    #[test]
    fn password_hash_never_serializes() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("Password").is_none());
    }

    #[test]
    fn wire_field_names_are_stable() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["Username"], "jdoe1");
        assert_eq!(json["Email"], "j@x.com");
        assert!(json["FavoriteMovies"].is_array());
        assert!(json["Birthday"].is_null());
    }
}
