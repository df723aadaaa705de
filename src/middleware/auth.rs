use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::Claims;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_access_token;

/// Extractor that validates the bearer token and exposes the caller's claims.
///
/// The role travels inside the token, so authorization checks need no
/// database round-trip. Identity is passed explicitly into services from
/// here; there is no ambient request context.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Missing authorization header"))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
        })?;

        let claims = verify_access_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims_for(role: UserRole) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            username: "reader1".to_string(),
            role,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_user_id_round_trip() {
        let user_id = Uuid::new_v4();
        let mut claims = claims_for(UserRole::Student);
        claims.sub = user_id.to_string();
        assert_eq!(AuthUser(claims).user_id().unwrap(), user_id);
    }

    #[test]
    fn test_user_id_rejects_garbage_sub() {
        let mut claims = claims_for(UserRole::Student);
        claims.sub = "not-a-uuid".to_string();
        assert!(AuthUser(claims).user_id().is_err());
    }

    #[test]
    fn test_role_accessor() {
        assert_eq!(AuthUser(claims_for(UserRole::Teacher)).role(), UserRole::Teacher);
    }
}
