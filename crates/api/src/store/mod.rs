//! Database access
//!
//! Query functions over the shared `PgPool`. The user store exclusively
//! owns user records; auth reads them, the request gate never touches
//! them.

pub mod movies;
pub mod users;
