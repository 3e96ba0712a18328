//! Subscription gate
//!
//! The "current" subscription is the most recently created row for the
//! principal that is still flagged active and whose end date is in the
//! future. Expiry is re-validated in the query itself, so a stale active
//! flag never unblurs content.

use anyhow::Result;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{PlanType, Subscription};

const WEEKLY_PLAN_DAYS: i64 = 7;
const MONTHLY_PLAN_DAYS: i64 = 30;

/// How long a plan's access window lasts
pub fn plan_duration(plan: PlanType) -> Duration {
    match plan {
        PlanType::Weekly => Duration::days(WEEKLY_PLAN_DAYS),
        PlanType::Monthly => Duration::days(MONTHLY_PLAN_DAYS),
    }
}

pub struct SubscriptionService {
    pool: PgPool,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recent active, unexpired subscription for the principal
    pub async fn current_subscription(&self, user_id: Uuid) -> Result<Option<Subscription>> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            SELECT * FROM subscriptions
            WHERE user_id = $1 AND is_active AND end_date > NOW()
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscription)
    }

    pub async fn has_active_subscription(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.current_subscription(user_id).await?.is_some())
    }

    /// Create a subscription after a verified payment
    pub async fn grant(&self, user_id: Uuid, plan: PlanType, amount: i64) -> Result<Subscription> {
        let start = Utc::now();
        let end = start + plan_duration(plan);

        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (id, user_id, plan_type, amount, start_date, end_date,
                                       is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, true, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(plan)
        .bind(amount)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(subscription)
    }

    /// Clear the active flag on rows whose window has passed
    pub async fn deactivate_expired(&self) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE subscriptions SET is_active = false WHERE is_active AND end_date < NOW()",
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_plan_lasts_seven_days() {
        assert_eq!(plan_duration(PlanType::Weekly), Duration::days(7));
    }

    #[test]
    fn monthly_plan_lasts_thirty_days() {
        assert_eq!(plan_duration(PlanType::Monthly), Duration::days(30));
    }
}
