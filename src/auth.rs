//! Admin login and the signed bearer token that gates the admin API.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::config::AdminConfig;
use crate::error::Error;
use crate::routes::AppState;

pub const TOKEN_TTL: Duration = Duration::days(7);
const ADMIN_ROLE: &str = "admin";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn check_credentials(admin: &AdminConfig, email: &str, password: &str) -> bool {
    admin.email == email && admin.password == password
}

pub fn issue_token(admin: &AdminConfig) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: admin.email.clone(),
        role: ADMIN_ROLE.to_string(),
        iat: now.unix_timestamp(),
        exp: (now + TOKEN_TTL).unix_timestamp(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(admin.token_secret.as_bytes()),
    )?)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    if data.claims.role != ADMIN_ROLE {
        return Err(Error::Unauthorized);
    }
    Ok(data.claims)
}

/// Extractor for admin routes: a valid `Authorization: Bearer` token with
/// the admin role, or a 401.
pub struct AdminToken(pub Claims);

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminToken {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(Error::Unauthorized)?;
        let token = header.strip_prefix("Bearer ").ok_or(Error::Unauthorized)?;
        let claims = verify_token(token, &state.config.admin.token_secret)?;
        Ok(AdminToken(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminConfig {
        AdminConfig {
            email: "admin@richpress.example".to_string(),
            password: "hunter2".to_string(),
            token_secret: "secret".to_string(),
        }
    }

    #[test]
    fn credentials_must_match_exactly() {
        let config = admin();
        assert!(check_credentials(&config, "admin@richpress.example", "hunter2"));
        assert!(!check_credentials(&config, "admin@richpress.example", "wrong"));
        assert!(!check_credentials(&config, "someone@else.example", "hunter2"));
    }

    #[test]
    fn token_round_trips() {
        let config = admin();
        let token = issue_token(&config).expect("issue");
        let claims = verify_token(&token, &config.token_secret).expect("verify");
        assert_eq!(claims.sub, config.email);
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = admin();
        let token = issue_token(&config).expect("issue");
        assert!(verify_token(&token, "other secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = admin();
        let past = OffsetDateTime::now_utc() - Duration::hours(2);
        let claims = Claims {
            sub: config.email.clone(),
            role: "admin".to_string(),
            iat: past.unix_timestamp(),
            exp: (past + Duration::hours(1)).unix_timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.token_secret.as_bytes()),
        )
        .expect("encode");
        assert!(verify_token(&token, &config.token_secret).is_err());
    }

    #[test]
    fn non_admin_role_is_rejected() {
        let config = admin();
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: config.email.clone(),
            role: "reader".to_string(),
            iat: now.unix_timestamp(),
            exp: (now + Duration::hours(1)).unix_timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.token_secret.as_bytes()),
        )
        .expect("encode");
        assert!(matches!(
            verify_token(&token, &config.token_secret),
            Err(Error::Unauthorized)
        ));
    }
}
