//! `rates` collection

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Rate, UpdateRate},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatesRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Rate>>;

    /// Insert or replace the rate for one accommodation
    async fn upsert(&self, accommodation: String, rate: UpdateRate) -> AppResult<Rate>;
}

#[derive(FromRow)]
struct RateRow {
    accommodation: String,
    price_per_night: i32,
    capacity: i32,
    updated_at: Option<DateTime<Utc>>,
}

impl From<RateRow> for Rate {
    fn from(row: RateRow) -> Self {
        Self {
            accommodation: row.accommodation,
            price_per_night: row.price_per_night,
            capacity: row.capacity,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgRatesRepository {
    pool: Pool<Postgres>,
}

impl PgRatesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatesRepository for PgRatesRepository {
    async fn list(&self) -> AppResult<Vec<Rate>> {
        let rows = sqlx::query_as::<_, RateRow>(
            "SELECT accommodation, price_per_night, capacity, updated_at FROM rates ORDER BY accommodation",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Rate::from).collect())
    }

    async fn upsert(&self, accommodation: String, rate: UpdateRate) -> AppResult<Rate> {
        let row = sqlx::query_as::<_, RateRow>(
            r#"
            INSERT INTO rates (accommodation, price_per_night, capacity, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (accommodation) DO UPDATE
                SET price_per_night = EXCLUDED.price_per_night,
                    capacity = EXCLUDED.capacity,
                    updated_at = EXCLUDED.updated_at
            RETURNING accommodation, price_per_night, capacity, updated_at
            "#,
        )
        .bind(&accommodation)
        .bind(rate.price_per_night)
        .bind(rate.capacity)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
