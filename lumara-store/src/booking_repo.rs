use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use lumara_core::booking::{Booking, BookingStatus, PaymentStatus};
use lumara_core::listing::ServiceKind;
use lumara_core::repository::BookingRepository;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    service_type: String,
    service_id: Uuid,
    service_name: String,
    booking_date: chrono::DateTime<chrono::Utc>,
    start_date: chrono::DateTime<chrono::Utc>,
    end_date: Option<chrono::DateTime<chrono::Utc>>,
    guests: i32,
    total_price: f64,
    payment_status: String,
    payment_intent_id: Option<String>,
    provider_payment_id: Option<String>,
    status: String,
    special_requests: Option<String>,
}

impl BookingRow {
    // A row that no longer decodes is a data-integrity error, surfaced
    // rather than coerced.
    fn into_booking(self) -> Result<Booking, Box<dyn std::error::Error + Send + Sync>> {
        let service_type = ServiceKind::parse(&self.service_type).ok_or_else(|| {
            format!("unknown service type '{}' on booking {}", self.service_type, self.id)
        })?;
        let payment_status = PaymentStatus::parse(&self.payment_status).ok_or_else(|| {
            format!("unknown payment status '{}' on booking {}", self.payment_status, self.id)
        })?;
        let status = BookingStatus::parse(&self.status)
            .ok_or_else(|| format!("unknown status '{}' on booking {}", self.status, self.id))?;

        Ok(Booking {
            id: self.id,
            user_id: self.user_id,
            service_type,
            service_id: self.service_id,
            service_name: self.service_name,
            booking_date: self.booking_date,
            start_date: self.start_date,
            end_date: self.end_date,
            guests: self.guests,
            total_price: self.total_price,
            payment_status,
            payment_intent_id: self.payment_intent_id,
            provider_payment_id: self.provider_payment_id,
            status,
            special_requests: self.special_requests,
        })
    }
}

const BOOKING_COLUMNS: &str = "id, user_id, service_type, service_id, service_name, booking_date, \
     start_date, end_date, guests, total_price, payment_status, payment_intent_id, \
     provider_payment_id, status, special_requests";

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(
        &self,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, service_type, service_id, service_name,
                booking_date, start_date, end_date, guests, total_price,
                payment_status, payment_intent_id, provider_payment_id, status, special_requests)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.service_type.as_str())
        .bind(booking.service_id)
        .bind(&booking.service_name)
        .bind(booking.booking_date)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.guests)
        .bind(booking.total_price)
        .bind(booking.payment_status.as_str())
        .bind(&booking.payment_intent_id)
        .bind(&booking.provider_payment_id)
        .bind(booking.status.as_str())
        .bind(&booking.special_requests)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE id = $1",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookingRow::into_booking).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE user_id = $1 ORDER BY booking_date DESC LIMIT $2",
            BOOKING_COLUMNS
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn list_all(
        &self,
        limit: i64,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings ORDER BY booking_date DESC LIMIT $1",
            BOOKING_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn set_payment_intent(
        &self,
        booking_id: Uuid,
        intent_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("UPDATE bookings SET payment_intent_id = $1 WHERE id = $2")
            .bind(intent_id)
            .bind(booking_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn mark_paid(
        &self,
        booking_id: Uuid,
        provider_payment_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            "UPDATE bookings SET payment_status = 'paid', provider_payment_id = $1 WHERE id = $2",
        )
        .bind(provider_payment_id)
        .bind(booking_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count(&self) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
