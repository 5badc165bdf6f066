use async_trait::async_trait;
use sqlx::PgPool;

use lumara_core::repository::TripPlanRepository;
use lumara_core::trip::TripPlan;

pub struct PgTripPlanRepository {
    pool: PgPool,
}

impl PgTripPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripPlanRepository for PgTripPlanRepository {
    async fn create(
        &self,
        plan: &TripPlan,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO trip_plans (id, user_query, destinations, duration_days, budget, itinerary, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(plan.id)
        .bind(&plan.user_query)
        .bind(serde_json::to_value(&plan.destinations)?)
        .bind(plan.duration_days)
        .bind(plan.budget)
        .bind(&plan.itinerary)
        .bind(plan.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
