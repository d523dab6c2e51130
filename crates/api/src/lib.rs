// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! myFlix API Library
//!
//! CRUD REST backend for the myFlix movie catalog: movie/genre/director
//! reads, user registration and profile management, per-user favorites,
//! all behind a stateless JWT request gate.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
