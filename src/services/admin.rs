//! Admin dashboard aggregates

use anyhow::Result;
use sqlx::PgPool;

use crate::models::{DashboardStats, Payment};

const RECENT_PAYMENTS_LIMIT: i64 = 10;

pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let (total_users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        let (total_owners,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_owner")
                .fetch_one(&self.pool)
                .await?;
        let (total_properties,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM properties")
            .fetch_one(&self.pool)
            .await?;
        let (total_booked_properties,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM properties WHERE status = 'booked'")
                .fetch_one(&self.pool)
                .await?;
        let (pending_approvals,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM properties WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await?;
        let (total_payments,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM payments WHERE payment_status = 'completed'")
                .fetch_one(&self.pool)
                .await?;

        let recent_payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments WHERE payment_status = 'completed'
            ORDER BY created_at DESC LIMIT $1
            "#,
        )
        .bind(RECENT_PAYMENTS_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardStats {
            total_users,
            total_owners,
            total_properties,
            total_booked_properties,
            total_payments,
            pending_approvals,
            recent_payments,
        })
    }
}
