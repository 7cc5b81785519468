use crate::constants::{COOKIE_NAME, JWT_SECRET_KEY};
use crate::types::models::user::role::Role;
use actix_web::cookie::{Cookie, SameSite, time::Duration};
use argon2::{
    Argon2,
    password_hash::{Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User email.
    pub sub: String,
    pub name: String,
    pub role: Role,
    pub exp: usize,
}

impl Claims {
    pub fn new(name: &str, email: &str, role: Role) -> Self {
        let exp = (Utc::now() + chrono::Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize;
        Self {
            sub: email.to_string(),
            name: name.to_string(),
            role,
            exp,
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(err) => Err(err),
    }
}

fn sign_claims(claims: &Claims, secret: &str) -> jsonwebtoken::errors::Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn decode_claims(token: &str, secret: &str) -> jsonwebtoken::errors::Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

pub fn generate_jwt(name: &str, email: &str, role: Role) -> jsonwebtoken::errors::Result<String> {
    sign_claims(&Claims::new(name, email, role), &JWT_SECRET_KEY)
}

pub fn validate_jwt(token: &str) -> jsonwebtoken::errors::Result<Claims> {
    decode_claims(token, &JWT_SECRET_KEY)
}

pub fn generate_cookie(token: String) -> Cookie<'static> {
    Cookie::build((*COOKIE_NAME).clone(), token)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(Duration::days(TOKEN_TTL_DAYS))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("S3cret!pass").unwrap();
        assert!(verify_password("S3cret!pass", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn hashing_salts_every_call() {
        let first = hash_password("S3cret!pass").unwrap();
        let second = hash_password("S3cret!pass").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn jwt_round_trip_preserves_claims() {
        let claims = Claims::new("Ada", "ada@example.com", Role::Admin);
        let token = sign_claims(&claims, "test-secret").unwrap();
        let decoded = decode_claims(&token, "test-secret").unwrap();

        assert_eq!(decoded.sub, "ada@example.com");
        assert_eq!(decoded.name, "Ada");
        assert_eq!(decoded.role, Role::Admin);
    }

    #[test]
    fn jwt_rejects_a_different_secret() {
        let claims = Claims::new("Ada", "ada@example.com", Role::User);
        let token = sign_claims(&claims, "test-secret").unwrap();
        assert!(decode_claims(&token, "other-secret").is_err());
    }
}
