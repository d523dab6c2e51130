//! Password hashing (Argon2id)
//!
//! Digests are PHC strings with a random per-password salt. Verification
//! goes through the argon2 verifier, which compares in constant time, so
//! a mismatch never short-circuits on a digest prefix.

use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, rand_core::RngCore, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};

/// Hash a plaintext password for storage.
///
/// A hashing failure is not recoverable at the call site; it surfaces as
/// an internal server error.
pub fn hash_password(plaintext: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {e}"))?;
    Ok(digest.to_string())
}

/// Check a plaintext password against a stored digest.
///
/// Returns an error only if the stored digest is not a valid PHC string;
/// a wrong password is `Ok(false)`.
pub fn verify_password(plaintext: &str, digest: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(digest).map_err(|e| anyhow!("malformed password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}

/// Produce a digest of 32 random bytes that no password will ever match.
///
/// Login verifies against this when the username is unknown, so the
/// unknown-user path does the same amount of work as the wrong-password
/// path.
pub fn generate_impossible_hash() -> anyhow::Result<String> {
    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(&secret, &salt)
        .map_err(|e| anyhow!("password hashing failed: {e}"))?;
    Ok(digest.to_string())
}
