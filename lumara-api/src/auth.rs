use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use lumara_core::repository::UserRepository;
use lumara_core::user::{DuplicateEmail, Role, User};

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct SignupRequest {
    email: String,
    password: String,
    full_name: String,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct UserSummary {
    id: uuid::Uuid,
    email: String,
    full_name: String,
    role: Role,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    access_token: String,
    token_type: &'static str,
    user: UserSummary,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let existing = state
        .users
        .find_by_email(&req.email)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    if existing.is_some() {
        return Err(AppError::ConflictError("Email already registered".to_string()));
    }

    let user = User::new(
        req.email,
        hash_password(&req.password)?,
        req.full_name,
        req.phone,
        Role::User,
    );

    // The find-then-insert check above can race a concurrent signup; the
    // store reports the unique-index loser as a typed error.
    state.users.create(&user).await.map_err(|e| {
        if e.downcast_ref::<DuplicateEmail>().is_some() {
            AppError::ConflictError("Email already registered".to_string())
        } else {
            AppError::InternalServerError(e.to_string())
        }
    })?;

    tracing::info!("New signup: {}", user.id);
    let token = issue_token(&state, &user)?;
    Ok(Json(auth_response(token, user)))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state
        .users
        .find_by_email(&req.email)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::AuthenticationError("Invalid credentials".to_string()))?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::AuthenticationError("Invalid credentials".to_string()));
    }

    let token = issue_token(&state, &user)?;
    Ok(Json(auth_response(token, user)))
}

fn auth_response(token: String, user: User) -> AuthResponse {
    AuthResponse {
        access_token: token,
        token_type: "bearer",
        user: UserSummary {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        },
    }
}

pub fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, MemoryUsers};
    use async_trait::async_trait;
    use axum::extract::State;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use uuid::Uuid;

    fn signup_request(email: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: "s3cret".to_string(),
            full_name: "Test Traveller".to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn signup_issues_a_token_that_resolves_to_the_created_user() {
        let state = test_state();

        let Json(resp) = signup(State(state.clone()), Json(signup_request("new@example.com")))
            .await
            .unwrap();

        assert_eq!(resp.token_type, "bearer");
        assert_eq!(resp.user.email, "new@example.com");

        let data = decode::<Claims>(
            &resp.access_token,
            &DecodingKey::from_secret(state.auth.secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();
        let subject = Uuid::parse_str(&data.claims.sub).unwrap();

        let stored = state.users.find_by_id(subject).await.unwrap().unwrap();
        assert_eq!(stored.id, resp.user.id);
        assert_eq!(stored.role, Role::User);
    }

    #[tokio::test]
    async fn reusing_an_email_is_a_conflict() {
        let state = test_state();

        signup(State(state.clone()), Json(signup_request("taken@example.com"))).await.unwrap();

        let again =
            signup(State(state), Json(signup_request("taken@example.com"))).await;
        assert!(matches!(again, Err(AppError::ConflictError(_))));
    }

    #[tokio::test]
    async fn login_verifies_the_password() {
        let state = test_state();
        signup(State(state.clone()), Json(signup_request("jo@example.com"))).await.unwrap();

        let ok = login(
            State(state.clone()),
            Json(LoginRequest { email: "jo@example.com".to_string(), password: "s3cret".to_string() }),
        )
        .await;
        assert!(ok.is_ok());

        let wrong = login(
            State(state.clone()),
            Json(LoginRequest { email: "jo@example.com".to_string(), password: "wrong".to_string() }),
        )
        .await;
        assert!(matches!(wrong, Err(AppError::AuthenticationError(_))));

        let unknown = login(
            State(state),
            Json(LoginRequest { email: "ghost@example.com".to_string(), password: "s3cret".to_string() }),
        )
        .await;
        assert!(matches!(unknown, Err(AppError::AuthenticationError(_))));
    }

    /// Identity store where the pre-insert email lookup always misses, the
    /// way it does for the loser of two simultaneous signups.
    #[derive(Default)]
    struct BlindLookupUsers {
        inner: MemoryUsers,
    }

    #[async_trait]
    impl UserRepository for BlindLookupUsers {
        async fn find_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(None)
        }

        async fn find_by_id(
            &self,
            id: Uuid,
        ) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>> {
            self.inner.find_by_id(id).await
        }

        async fn create(
            &self,
            user: &User,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.inner.create(user).await
        }

        async fn set_role(
            &self,
            id: Uuid,
            role: Role,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.inner.set_role(id, role).await
        }

        async fn count_by_role(
            &self,
            role: Role,
        ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> {
            self.inner.count_by_role(role).await
        }
    }

    #[tokio::test]
    async fn signups_racing_past_the_email_check_still_conflict() {
        let mut state = test_state();
        state.users = std::sync::Arc::new(BlindLookupUsers::default());

        signup(State(state.clone()), Json(signup_request("raced@example.com"))).await.unwrap();

        // Second insert loses to the unique constraint, not the lookup.
        let loser = signup(State(state), Json(signup_request("raced@example.com"))).await;
        assert!(matches!(loser, Err(AppError::ConflictError(_))));
    }

    #[test]
    fn hashed_passwords_verify_and_reject() {
        let hash = hash_password("s3cret").unwrap();
        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("s3cret", "not-a-phc-string"));
    }

    #[test]
    fn issued_tokens_decode_back_to_the_subject() {
        let state = crate::test_support::test_state();
        let user = User::new(
            "jo@example.com".to_string(),
            "hash".to_string(),
            "Jo".to_string(),
            None,
            Role::User,
        );

        let token = issue_token(&state, &user).unwrap();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(state.auth.secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, user.id.to_string());
        assert_eq!(data.claims.email, "jo@example.com");
    }
}
