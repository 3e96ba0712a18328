//! Signup, login, and session resolution

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::auth::jwt::JwtKeys;
use crate::models::{User, UserRole};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("session is not valid")]
    InvalidSession,
    #[error(transparent)]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("password hashing failed")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 2, max = 80))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 7, max = 20))]
    pub phone_number: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Profile plus access token, returned by signup and login
#[derive(Debug, Serialize)]
pub struct AuthTokenResponse {
    pub user: User,
    pub token: String,
}

/// Authentication service over the `users` table
pub struct AuthService {
    pool: PgPool,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(pool: PgPool, keys: JwtKeys) -> Self {
        Self { pool, keys }
    }

    /// Create a profile row and issue a token for it
    pub async fn signup(&self, request: SignupRequest) -> Result<AuthTokenResponse, AuthError> {
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(&request.email)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, phone_number, password_hash, is_owner, role,
                               upload_credits, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, false, $6, 0, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone_number)
        .bind(&password_hash)
        .bind(UserRole::User)
        .fetch_one(&self.pool)
        .await?;

        let token = self.keys.generate_token(user.id)?;
        Ok(AuthTokenResponse { user, token })
    }

    /// Verify credentials and issue a token
    pub async fn login(&self, request: LoginRequest) -> Result<AuthTokenResponse, AuthError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(&request.email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !bcrypt::verify(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.keys.generate_token(user.id)?;
        Ok(AuthTokenResponse { user, token })
    }

    /// Resolve a bearer token to the current profile row
    pub async fn resolve_session(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.keys.verify_token(token)?;

        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(claims.sub)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::InvalidSession)
    }
}
