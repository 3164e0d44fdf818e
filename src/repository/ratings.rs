//! `ratings` collection

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{NewRating, Rating, RatingStatus},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingsRepository: Send + Sync {
    async fn create(&self, rating: NewRating) -> AppResult<Rating>;

    /// All ratings in insertion order
    async fn list(&self) -> AppResult<Vec<Rating>>;

    /// Equality query on `status`
    async fn list_by_status(&self, status: RatingStatus) -> AppResult<Vec<Rating>>;

    async fn update_status(&self, id: Uuid, status: RatingStatus) -> AppResult<()>;
}

#[derive(FromRow)]
struct RatingRow {
    id: Uuid,
    name: String,
    place: String,
    state: String,
    rating: f32,
    description: String,
    status: String,
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<RatingRow> for Rating {
    type Error = AppError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        Ok(Rating {
            id: row.id,
            name: row.name,
            place: row.place,
            state: row.state,
            rating: row.rating,
            description: row.description,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone)]
pub struct PgRatingsRepository {
    pool: Pool<Postgres>,
}

impl PgRatingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingsRepository for PgRatingsRepository {
    async fn create(&self, rating: NewRating) -> AppResult<Rating> {
        let row = sqlx::query_as::<_, RatingRow>(
            r#"
            INSERT INTO ratings (id, name, place, state, rating, description, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING id, name, place, state, rating, description, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&rating.name)
        .bind(&rating.place)
        .bind(&rating.state)
        .bind(rating.rating)
        .bind(&rating.description)
        .bind(rating.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list(&self) -> AppResult<Vec<Rating>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, name, place, state, rating, description, status, created_at
            FROM ratings
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Rating::try_from).collect()
    }

    async fn list_by_status(&self, status: RatingStatus) -> AppResult<Vec<Rating>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, name, place, state, rating, description, status, created_at
            FROM ratings
            WHERE status = $1
            ORDER BY seq
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Rating::try_from).collect()
    }

    async fn update_status(&self, id: Uuid, status: RatingStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE ratings SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Rating with id {} not found", id)));
        }

        Ok(())
    }
}
