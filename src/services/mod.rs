//! Business logic services

pub mod auth;
pub mod bookings;
pub mod email;
pub mod enquiries;
pub mod rates;
pub mod ratings;
pub mod stats;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

use email::EnquiryNotifier;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub enquiries: enquiries::EnquiriesService,
    pub bookings: bookings::BookingService,
    pub ratings: ratings::RatingsService,
    pub rates: rates::RatesService,
    pub stats: stats::StatsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository and enquiry notifier
    pub fn new(
        repository: Repository,
        config: &AppConfig,
        notifier: Arc<dyn EnquiryNotifier>,
    ) -> Self {
        let page_size = config.listing.page_size;
        Self {
            auth: auth::AuthService::new(config.auth.clone()),
            enquiries: enquiries::EnquiriesService::new(repository.clone(), notifier, page_size),
            bookings: bookings::BookingService::new(
                repository.clone(),
                config.booking.in_query_limit,
            ),
            ratings: ratings::RatingsService::new(repository.clone(), page_size),
            rates: rates::RatesService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
