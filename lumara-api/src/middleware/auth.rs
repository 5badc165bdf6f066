use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lumara_core::repository::UserRepository;
use lumara_core::user::Role;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

// ============================================================================
// Authenticated-user extractor
// ============================================================================

/// The caller behind a verified bearer token, resolved against the identity
/// store. A token whose subject no longer exists is rejected the same way a
/// bad signature is.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. Extract token from Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::AuthenticationError("Missing bearer token".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::AuthenticationError("Invalid Authorization header".to_string()))?;

        // 2. Decode and validate JWT
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.auth.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::AuthenticationError(format!("Invalid token: {}", e)))?;

        // 3. Resolve the subject against the identity store
        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|_| AppError::AuthenticationError("Invalid subject in token".to_string()))?;

        let user = state
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))?
            .ok_or_else(|| AppError::AuthenticationError("User not found".to_string()))?;

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
            role: user.role,
        })
    }
}

// ============================================================================
// Admin guard
// ============================================================================

/// Same as [`CurrentUser`] but refuses anyone whose role is not admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;

        if user.role != Role::Admin {
            return Err(AppError::AuthorizationError("Admin access required".to_string()));
        }

        Ok(AdminUser(user))
    }
}
