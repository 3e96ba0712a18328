//! Profile operations

use anyhow::Result;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::User;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 80))]
    pub name: Option<String>,
    #[validate(length(min = 7, max = 20))]
    pub phone_number: Option<String>,
}

pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn update(&self, user_id: Uuid, request: UpdateProfileRequest) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE($1, name),
                phone_number = COALESCE($2, phone_number),
                updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(request.name)
        .bind(request.phone_number)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Self-service elevation to property owner
    pub async fn become_owner(&self, user_id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET is_owner = true, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn set_profile_image(&self, user_id: Uuid, url: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET profile_image = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(url)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
