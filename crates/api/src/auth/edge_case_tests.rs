//! Edge case tests for the authentication core
//!
//! Boundary conditions around token expiry, claim integrity, and the
//! login timing-equalization digest.

#[cfg(test)]
mod expiry_boundary_tests {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use super::super::jwt::{Claims, JwtManager};

    const SECRET: &str = "test-jwt-secret-key-for-testing-only";

    fn sign_with_exp(exp: OffsetDateTime) -> String {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: "jdoe1".to_string(),
            iat: (now - Duration::hours(1)).unix_timestamp(),
            exp: exp.unix_timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn token_valid_before_expiry() {
        let manager = JwtManager::new(SECRET, 24);
        let token = sign_with_exp(OffsetDateTime::now_utc() + Duration::minutes(5));
        assert!(manager.validate_token(&token).is_ok());
    }

    #[test]
    fn token_rejected_after_expiry() {
        let manager = JwtManager::new(SECRET, 24);
        let token = sign_with_exp(OffsetDateTime::now_utc() - Duration::minutes(5));
        assert!(manager.validate_token(&token).is_err());
    }

    #[test]
    fn no_leeway_grace_window() {
        // With the default 60-second leeway a token 30 seconds past expiry
        // would still validate. The manager runs at zero leeway, so it
        // must not.
        let manager = JwtManager::new(SECRET, 24);
        let token = sign_with_exp(OffsetDateTime::now_utc() - Duration::seconds(30));
        assert!(manager.validate_token(&token).is_err());
    }

    #[test]
    fn token_without_expiry_rejected() {
        // A claims object missing `exp` must never validate.
        #[derive(serde::Serialize)]
        struct NoExpiry {
            sub: String,
            iat: i64,
            jti: String,
        }
        let claims = NoExpiry {
            sub: "jdoe1".to_string(),
            iat: OffsetDateTime::now_utc().unix_timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let manager = JwtManager::new(SECRET, 24);
        assert!(manager.validate_token(&token).is_err());
    }

    #[test]
    fn algorithm_none_rejected() {
        // An unsigned token with alg=none must not pass, regardless of
        // payload.
        let header = r#"{"alg":"none","typ":"JWT"}"#;
        let payload = format!(
            r#"{{"sub":"jdoe1","iat":0,"exp":{},"jti":"x"}}"#,
            (OffsetDateTime::now_utc() + Duration::hours(1)).unix_timestamp()
        );
        let token = format!(
            "{}.{}.",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(&payload)
        );

        let manager = JwtManager::new(SECRET, 24);
        assert!(manager.validate_token(&token).is_err());
    }
}

#[cfg(test)]
mod issue_verify_tests {
    use super::super::jwt::JwtManager;
    use super::super::password::{generate_impossible_hash, hash_password, verify_password};

    #[test]
    fn issued_token_accepted_by_same_manager() {
        // The issuer/verifier pair shares one secret: everything issued
        // must verify.
        let manager = JwtManager::new("test-jwt-secret-key-for-testing-only", 168);
        for username in ["jdoe1", "alice99", "B0b1234"] {
            let (token, _) = manager.generate_token(username).unwrap();
            let claims = manager.validate_token(&token).unwrap();
            assert_eq!(claims.sub, username);
        }
    }

    #[test]
    fn unknown_user_path_does_real_verification_work() {
        // The login handler verifies against the impossible hash when the
        // username is unknown. That digest must be verifiable (no error
        // short-circuit) while matching nothing.
        let digest = generate_impossible_hash().unwrap();
        for guess in ["Secr3t!", "password", ""] {
            assert!(!verify_password(guess, &digest).unwrap());
        }
    }

    #[test]
    fn hash_verify_disagreement_on_close_passwords() {
        let digest = hash_password("Secr3t!").unwrap();
        assert!(verify_password("Secr3t!", &digest).unwrap());
        assert!(!verify_password("Secr3t! ", &digest).unwrap());
        assert!(!verify_password("Secr3t", &digest).unwrap());
    }
}
