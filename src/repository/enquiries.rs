//! `contact_submissions` collection

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Enquiry, EnquiryStatus, NewEnquiry},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnquiriesRepository: Send + Sync {
    /// Store a new enquiry; the store assigns its id and timestamp
    async fn create(&self, enquiry: NewEnquiry) -> AppResult<Enquiry>;

    /// All enquiries in insertion order
    async fn list(&self) -> AppResult<Vec<Enquiry>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Enquiry>;

    /// Overwrite the `status` field only
    async fn update_status(&self, id: Uuid, status: EnquiryStatus) -> AppResult<()>;
}

#[derive(FromRow)]
struct EnquiryRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    message: String,
    accommodation: String,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    adults: i32,
    children: i32,
    guests: i32,
    status: String,
    submitted_at: Option<DateTime<Utc>>,
}

impl TryFrom<EnquiryRow> for Enquiry {
    type Error = AppError;

    fn try_from(row: EnquiryRow) -> Result<Self, Self::Error> {
        Ok(Enquiry {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            accommodation: row.accommodation,
            check_in: row.check_in,
            check_out: row.check_out,
            adults: row.adults,
            children: row.children,
            guests: row.guests,
            status: row.status.parse()?,
            timestamp: row.submitted_at,
        })
    }
}

#[derive(Clone)]
pub struct PgEnquiriesRepository {
    pool: Pool<Postgres>,
}

impl PgEnquiriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnquiriesRepository for PgEnquiriesRepository {
    async fn create(&self, enquiry: NewEnquiry) -> AppResult<Enquiry> {
        let row = sqlx::query_as::<_, EnquiryRow>(
            r#"
            INSERT INTO contact_submissions (
                id, name, email, phone, message, accommodation,
                check_in, check_out, adults, children, guests, status, submitted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW())
            RETURNING id, name, email, phone, message, accommodation,
                      check_in, check_out, adults, children, guests, status, submitted_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&enquiry.name)
        .bind(&enquiry.email)
        .bind(&enquiry.phone)
        .bind(&enquiry.message)
        .bind(&enquiry.accommodation)
        .bind(enquiry.check_in)
        .bind(enquiry.check_out)
        .bind(enquiry.adults)
        .bind(enquiry.children)
        .bind(enquiry.guests)
        .bind(enquiry.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list(&self) -> AppResult<Vec<Enquiry>> {
        let rows = sqlx::query_as::<_, EnquiryRow>(
            r#"
            SELECT id, name, email, phone, message, accommodation,
                   check_in, check_out, adults, children, guests, status, submitted_at
            FROM contact_submissions
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Enquiry::try_from).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Enquiry> {
        sqlx::query_as::<_, EnquiryRow>(
            r#"
            SELECT id, name, email, phone, message, accommodation,
                   check_in, check_out, adults, children, guests, status, submitted_at
            FROM contact_submissions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Enquiry with id {} not found", id)))?
        .try_into()
    }

    async fn update_status(&self, id: Uuid, status: EnquiryStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE contact_submissions SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Enquiry with id {} not found", id)));
        }

        Ok(())
    }
}
