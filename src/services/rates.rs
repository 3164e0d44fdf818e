//! Nightly rates per accommodation

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Rate, UpdateRate},
    repository::Repository,
};

#[derive(Clone)]
pub struct RatesService {
    repository: Repository,
}

impl RatesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Rate>> {
        self.repository.rates.list().await
    }

    pub async fn upsert(&self, accommodation: &str, update: UpdateRate) -> AppResult<Rate> {
        update.validate()?;

        let accommodation = accommodation.trim();
        if accommodation.is_empty() {
            return Err(AppError::Validation("Accommodation is required".to_string()));
        }

        let rate = self
            .repository
            .rates
            .upsert(accommodation.to_string(), update)
            .await?;
        tracing::info!(
            accommodation = %rate.accommodation,
            price = rate.price_per_night,
            "Rate updated"
        );
        Ok(rate)
    }
}
