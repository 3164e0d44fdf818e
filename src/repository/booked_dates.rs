//! `booked_dates` collection

use async_trait::async_trait;
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BlockedDate, NewBlockedDate},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookedDatesRepository: Send + Sync {
    /// All blocked days, optionally for one accommodation
    async fn list(&self, cottage: Option<String>) -> AppResult<Vec<BlockedDate>>;

    /// Write all rows or none
    async fn insert_batch(&self, rows: Vec<NewBlockedDate>) -> AppResult<Vec<BlockedDate>>;

    /// Rows with `cottage` equal and `date` in `dates`.
    ///
    /// Stores may cap how many values one lookup can match; callers chunk.
    async fn find_by_cottage_and_dates(
        &self,
        cottage: &str,
        dates: &[String],
    ) -> AppResult<Vec<BlockedDate>>;

    /// Delete all rows or none; returns the number removed
    async fn delete_batch(&self, ids: Vec<Uuid>) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct PgBookedDatesRepository {
    pool: Pool<Postgres>,
}

impl PgBookedDatesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BlockedDateRow {
    id: Uuid,
    date: String,
    cottage: String,
    source_enquiry_id: Option<Uuid>,
}

impl From<BlockedDateRow> for BlockedDate {
    fn from(row: BlockedDateRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            cottage: row.cottage,
            source_enquiry_id: row.source_enquiry_id,
        }
    }
}

#[async_trait]
impl BookedDatesRepository for PgBookedDatesRepository {
    async fn list(&self, cottage: Option<String>) -> AppResult<Vec<BlockedDate>> {
        let rows = sqlx::query_as::<_, BlockedDateRow>(
            r#"
            SELECT id, date, cottage, source_enquiry_id
            FROM booked_dates
            WHERE ($1::TEXT IS NULL OR cottage = $1)
            ORDER BY date, cottage
            "#,
        )
        .bind(cottage)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BlockedDate::from).collect())
    }

    async fn insert_batch(&self, rows: Vec<NewBlockedDate>) -> AppResult<Vec<BlockedDate>> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(rows.len());

        for row in rows {
            let stored = sqlx::query_as::<_, BlockedDateRow>(
                r#"
                INSERT INTO booked_dates (id, date, cottage, source_enquiry_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, date, cottage, source_enquiry_id
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&row.date)
            .bind(&row.cottage)
            .bind(row.source_enquiry_id)
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(stored.into());
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn find_by_cottage_and_dates(
        &self,
        cottage: &str,
        dates: &[String],
    ) -> AppResult<Vec<BlockedDate>> {
        let rows = sqlx::query_as::<_, BlockedDateRow>(
            r#"
            SELECT id, date, cottage, source_enquiry_id
            FROM booked_dates
            WHERE cottage = $1 AND date = ANY($2)
            "#,
        )
        .bind(cottage)
        .bind(dates)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BlockedDate::from).collect())
    }

    async fn delete_batch(&self, ids: Vec<Uuid>) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM booked_dates WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
