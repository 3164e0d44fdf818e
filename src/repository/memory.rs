//! In-memory document store for development and tests.
//!
//! Collections live behind one async lock; every batch runs inside a single
//! write guard so it is applied completely or not at all. Equality-set
//! lookups reject more values than `in_query_limit`, like hosted document
//! stores do.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BookedDatesRepository, EnquiriesRepository, RatesRepository, RatingsRepository};
use crate::{
    error::{AppError, AppResult},
    models::{
        BlockedDate, Enquiry, EnquiryStatus, NewBlockedDate, NewEnquiry, NewRating, Rate, Rating,
        RatingStatus, UpdateRate,
    },
};

#[derive(Default)]
struct Collections {
    enquiries: Vec<Enquiry>,
    booked_dates: Vec<BlockedDate>,
    ratings: Vec<Rating>,
    rates: Vec<Rate>,
}

#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
    in_query_limit: usize,
}

impl MemoryStore {
    pub fn new(in_query_limit: usize) -> Self {
        let collections = Collections {
            rates: default_rates(),
            ..Default::default()
        };

        Self {
            inner: Arc::new(RwLock::new(collections)),
            in_query_limit: in_query_limit.max(1),
        }
    }
}

fn default_rates() -> Vec<Rate> {
    vec![
        Rate {
            accommodation: "1 BHK".to_string(),
            price_per_night: 1800,
            capacity: 2,
            updated_at: None,
        },
        Rate {
            accommodation: "2 BHK".to_string(),
            price_per_night: 3600,
            capacity: 4,
            updated_at: None,
        },
    ]
}

#[async_trait]
impl EnquiriesRepository for MemoryStore {
    async fn create(&self, enquiry: NewEnquiry) -> AppResult<Enquiry> {
        let stored = Enquiry {
            id: Uuid::new_v4(),
            name: enquiry.name,
            email: enquiry.email,
            phone: enquiry.phone,
            message: enquiry.message,
            accommodation: enquiry.accommodation,
            check_in: enquiry.check_in,
            check_out: enquiry.check_out,
            adults: enquiry.adults,
            children: enquiry.children,
            guests: enquiry.guests,
            status: enquiry.status,
            timestamp: Some(Utc::now()),
        };

        self.inner.write().await.enquiries.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> AppResult<Vec<Enquiry>> {
        Ok(self.inner.read().await.enquiries.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Enquiry> {
        self.inner
            .read()
            .await
            .enquiries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Enquiry with id {} not found", id)))
    }

    async fn update_status(&self, id: Uuid, status: EnquiryStatus) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let enquiry = inner
            .enquiries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Enquiry with id {} not found", id)))?;
        enquiry.status = status;
        Ok(())
    }
}

#[async_trait]
impl BookedDatesRepository for MemoryStore {
    async fn list(&self, cottage: Option<String>) -> AppResult<Vec<BlockedDate>> {
        let inner = self.inner.read().await;
        let mut rows: Vec<BlockedDate> = inner
            .booked_dates
            .iter()
            .filter(|row| cottage.as_deref().map_or(true, |c| row.cottage == c))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (&a.date, &a.cottage).cmp(&(&b.date, &b.cottage)));
        Ok(rows)
    }

    async fn insert_batch(&self, rows: Vec<NewBlockedDate>) -> AppResult<Vec<BlockedDate>> {
        let stored: Vec<BlockedDate> = rows
            .into_iter()
            .map(|row| BlockedDate {
                id: Uuid::new_v4(),
                date: row.date,
                cottage: row.cottage,
                source_enquiry_id: row.source_enquiry_id,
            })
            .collect();

        self.inner
            .write()
            .await
            .booked_dates
            .extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn find_by_cottage_and_dates(
        &self,
        cottage: &str,
        dates: &[String],
    ) -> AppResult<Vec<BlockedDate>> {
        if dates.len() > self.in_query_limit {
            return Err(AppError::Store(format!(
                "'in' lookup supports at most {} values, got {}",
                self.in_query_limit,
                dates.len()
            )));
        }

        Ok(self
            .inner
            .read()
            .await
            .booked_dates
            .iter()
            .filter(|row| row.cottage == cottage && dates.contains(&row.date))
            .cloned()
            .collect())
    }

    async fn delete_batch(&self, ids: Vec<Uuid>) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.booked_dates.len();
        inner.booked_dates.retain(|row| !ids.contains(&row.id));
        Ok((before - inner.booked_dates.len()) as u64)
    }
}

#[async_trait]
impl RatingsRepository for MemoryStore {
    async fn create(&self, rating: NewRating) -> AppResult<Rating> {
        let stored = Rating {
            id: Uuid::new_v4(),
            name: rating.name,
            place: rating.place,
            state: rating.state,
            rating: rating.rating,
            description: rating.description,
            status: rating.status,
            created_at: Some(Utc::now()),
        };

        self.inner.write().await.ratings.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> AppResult<Vec<Rating>> {
        Ok(self.inner.read().await.ratings.clone())
    }

    async fn list_by_status(&self, status: RatingStatus) -> AppResult<Vec<Rating>> {
        Ok(self
            .inner
            .read()
            .await
            .ratings
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: RatingStatus) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let rating = inner
            .ratings
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Rating with id {} not found", id)))?;
        rating.status = status;
        Ok(())
    }
}

#[async_trait]
impl RatesRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Rate>> {
        let mut rates = self.inner.read().await.rates.clone();
        rates.sort_by(|a, b| a.accommodation.cmp(&b.accommodation));
        Ok(rates)
    }

    async fn upsert(&self, accommodation: String, rate: UpdateRate) -> AppResult<Rate> {
        let stored = Rate {
            accommodation,
            price_per_night: rate.price_per_night,
            capacity: rate.capacity,
            updated_at: Some(Utc::now()),
        };

        let mut inner = self.inner.write().await;
        let position = inner
            .rates
            .iter()
            .position(|r| r.accommodation == stored.accommodation);
        match position {
            Some(index) => inner.rates[index] = stored.clone(),
            None => inner.rates.push(stored.clone()),
        }
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, cottage: &str) -> NewBlockedDate {
        NewBlockedDate {
            date: date.to_string(),
            cottage: cottage.to_string(),
            source_enquiry_id: None,
        }
    }

    #[tokio::test]
    async fn in_lookup_is_capped() {
        let store = MemoryStore::new(2);
        let dates: Vec<String> = ["2024-06-10", "2024-06-11", "2024-06-12"]
            .iter()
            .map(|d| d.to_string())
            .collect();

        let result = store.find_by_cottage_and_dates("1 BHK", &dates).await;
        assert!(matches!(result, Err(AppError::Store(_))));
        assert!(store.find_by_cottage_and_dates("1 BHK", &dates[..2]).await.is_ok());
    }

    #[tokio::test]
    async fn lookup_matches_cottage_and_date() {
        let store = MemoryStore::new(10);
        store
            .insert_batch(vec![
                row("2024-06-10", "1 BHK"),
                row("2024-06-10", "2 BHK"),
                row("2024-06-11", "1 BHK"),
            ])
            .await
            .unwrap();

        let found = store
            .find_by_cottage_and_dates("1 BHK", &["2024-06-10".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].cottage, "1 BHK");

        let removed = store.delete_batch(vec![found[0].id]).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(BookedDatesRepository::list(&store, None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn rates_are_seeded_and_upserted() {
        let store = MemoryStore::new(10);
        assert_eq!(RatesRepository::list(&store).await.unwrap().len(), 2);

        let updated = store
            .upsert(
                "1 BHK".to_string(),
                UpdateRate {
                    price_per_night: 2000,
                    capacity: 3,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price_per_night, 2000);

        let rates = RatesRepository::list(&store).await.unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].price_per_night, 2000);
    }
}
