//! Authentication module for the myFlix API

#[cfg(test)]
mod edge_case_tests;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtError, JwtManager};
pub use middleware::{require_auth, AuthState, AuthUser};
pub use password::{generate_impossible_hash, hash_password, verify_password};
