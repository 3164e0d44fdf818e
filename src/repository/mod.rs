//! Repository layer: the document store behind the services.
//!
//! Each collection is reached through an async trait so the services work
//! against either PostgreSQL or the in-memory store.

pub mod booked_dates;
pub mod enquiries;
pub mod memory;
pub mod rates;
pub mod ratings;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

pub use booked_dates::BookedDatesRepository;
pub use enquiries::EnquiriesRepository;
pub use memory::MemoryStore;
pub use rates::RatesRepository;
pub use ratings::RatingsRepository;

/// Main repository struct holding one handle per collection
#[derive(Clone)]
pub struct Repository {
    /// Set when backed by PostgreSQL
    pub pool: Option<Pool<Postgres>>,
    pub enquiries: Arc<dyn EnquiriesRepository>,
    pub booked_dates: Arc<dyn BookedDatesRepository>,
    pub ratings: Arc<dyn RatingsRepository>,
    pub rates: Arc<dyn RatesRepository>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            enquiries: Arc::new(enquiries::PgEnquiriesRepository::new(pool.clone())),
            booked_dates: Arc::new(booked_dates::PgBookedDatesRepository::new(pool.clone())),
            ratings: Arc::new(ratings::PgRatingsRepository::new(pool.clone())),
            rates: Arc::new(rates::PgRatesRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a repository backed by a fresh in-memory store
    pub fn in_memory(in_query_limit: usize) -> Self {
        let store = MemoryStore::new(in_query_limit);
        Self {
            pool: None,
            enquiries: Arc::new(store.clone()),
            booked_dates: Arc::new(store.clone()),
            ratings: Arc::new(store.clone()),
            rates: Arc::new(store),
        }
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
