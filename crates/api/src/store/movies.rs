//! Movie catalog queries
//!
//! Read-only over HTTP; rows are stored flat and re-nested into the
//! genre/director shape clients expect.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

use crate::error::ApiResult;

#[derive(Debug, Clone, Serialize)]
pub struct Genre {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Director {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Bio")]
    pub bio: String,
    #[serde(rename = "Birth")]
    pub birth: Option<Date>,
    #[serde(rename = "Death")]
    pub death: Option<Date>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    pub id: Uuid,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Genre")]
    pub genre: Genre,
    #[serde(rename = "Director")]
    pub director: Director,
    #[serde(rename = "Actors")]
    pub actors: Vec<String>,
    #[serde(rename = "ImagePath")]
    pub image_path: Option<String>,
    #[serde(rename = "Featured")]
    pub featured: bool,
}

/// Flat database row; nested into `Movie` before leaving the store.
#[derive(Debug, FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    description: String,
    genre_name: String,
    genre_description: String,
    director_name: String,
    director_bio: String,
    director_birth: Option<Date>,
    director_death: Option<Date>,
    actors: Vec<String>,
    image_path: Option<String>,
    featured: bool,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            description: row.description,
            genre: Genre {
                name: row.genre_name,
                description: row.genre_description,
            },
            director: Director {
                name: row.director_name,
                bio: row.director_bio,
                birth: row.director_birth,
                death: row.director_death,
            },
            actors: row.actors,
            image_path: row.image_path,
            featured: row.featured,
        }
    }
}

pub async fn find_all(pool: &PgPool) -> ApiResult<Vec<Movie>> {
    let rows = sqlx::query_as::<_, MovieRow>("SELECT * FROM movies ORDER BY title ASC")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Movie::from).collect())
}

pub async fn find_by_title(pool: &PgPool, title: &str) -> ApiResult<Option<Movie>> {
    let row = sqlx::query_as::<_, MovieRow>("SELECT * FROM movies WHERE title = $1")
        .bind(title)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Movie::from))
}

/// Look up a genre by name via any movie carrying it.
pub async fn find_genre(pool: &PgPool, name: &str) -> ApiResult<Option<Genre>> {
    let row = sqlx::query_as::<_, MovieRow>("SELECT * FROM movies WHERE genre_name = $1 LIMIT 1")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| Genre {
        name: r.genre_name,
        description: r.genre_description,
    }))
}

/// Look up a director by name via any movie they directed.
pub async fn find_director(pool: &PgPool, name: &str) -> ApiResult<Option<Director>> {
    let row =
        sqlx::query_as::<_, MovieRow>("SELECT * FROM movies WHERE director_name = $1 LIMIT 1")
            .bind(name)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|r| Director {
        name: r.director_name,
        bio: r.director_bio,
        birth: r.director_birth,
        death: r.director_death,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn sample_row() -> MovieRow {
        MovieRow {
            id: Uuid::new_v4(),
            title: "The Third Man".to_string(),
            description: "A pulp novelist investigates a friend's death in postwar Vienna."
                .to_string(),
            genre_name: "Film Noir".to_string(),
            genre_description: "Stylized crime dramas of the 1940s and 50s.".to_string(),
            director_name: "Carol Reed".to_string(),
            director_bio: "British film director.".to_string(),
            director_birth: Some(date!(1906 - 12 - 30)),
            director_death: Some(date!(1976 - 04 - 25)),
            actors: vec!["Joseph Cotten".to_string(), "Orson Welles".to_string()],
            image_path: None,
            featured: true,
        }
    }

    #[test]
    fn row_nests_into_wire_shape() {
        let movie = Movie::from(sample_row());
        let json = serde_json::to_value(&movie).unwrap();

        assert_eq!(json["Title"], "The Third Man");
        assert_eq!(json["Genre"]["Name"], "Film Noir");
        assert_eq!(json["Director"]["Name"], "Carol Reed");
        assert_eq!(json["Director"]["Death"], "1976-04-25");
        assert_eq!(json["Featured"], true);
        assert_eq!(json["Actors"][1], "Orson Welles");
    }
}
