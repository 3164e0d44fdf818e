//! Statistics service

use crate::{
    api::stats::{DashboardStats, StatusCounts},
    error::AppResult,
    models::{EnquiryStatus, RatingStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Counters shown on the admin dashboard
    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let enquiries = self.repository.enquiries.list().await?;
        let ratings = self.repository.ratings.list().await?;
        let blocked = self.repository.booked_dates.list(None).await?;

        let mut by_status = StatusCounts::default();
        for enquiry in &enquiries {
            match enquiry.status {
                EnquiryStatus::New => by_status.new += 1,
                EnquiryStatus::Contacted => by_status.contacted += 1,
                EnquiryStatus::Booked => by_status.booked += 1,
                EnquiryStatus::Cancelled => by_status.cancelled += 1,
            }
        }

        Ok(DashboardStats {
            total_enquiries: enquiries.len() as i64,
            by_status,
            total_ratings: ratings.len() as i64,
            pending_ratings: ratings
                .iter()
                .filter(|r| r.status == RatingStatus::New)
                .count() as i64,
            blocked_dates: blocked.len() as i64,
        })
    }
}
