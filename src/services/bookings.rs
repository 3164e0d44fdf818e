//! Booking lifecycle: enquiry status transitions and the blocked-date calendar.
//!
//! Moving an enquiry to `booked` writes one `booked_dates` row per day of its
//! stay; moving it to `cancelled` re-derives the same days from the enquiry and
//! deletes the matching rows written for it. Rows without a source enquiry are
//! matched on accommodation and day alone, so the expansion in
//! [`crate::calendar`] must stay deterministic.
//!
//! Overlapping bookings for the same accommodation are not rejected and
//! produce duplicate rows for the shared days.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{BlockedDate, Enquiry, EnquiryStatus, NewBlockedDate, Stay},
    repository::Repository,
};

/// Result of one status transition
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOutcome {
    pub enquiry: Enquiry,
    pub previous_status: EnquiryStatus,
    pub blocked_dates_written: usize,
    pub blocked_dates_removed: u64,
}

#[derive(Clone)]
pub struct BookingService {
    repository: Repository,
    in_query_limit: usize,
}

impl BookingService {
    pub fn new(repository: Repository, in_query_limit: usize) -> Self {
        Self {
            repository,
            in_query_limit: in_query_limit.max(1),
        }
    }

    /// Move an enquiry to `target` and apply the calendar effect of that status.
    ///
    /// Only the target decides what happens; the current status is not checked
    /// beyond a warning when the step is not one the admin console offers.
    pub async fn transition(&self, id: Uuid, target: EnquiryStatus) -> AppResult<TransitionOutcome> {
        let current = self.repository.enquiries.get_by_id(id).await?;
        let previous_status = current.status;

        if target != EnquiryStatus::New && !previous_status.admin_actions().contains(&target) {
            tracing::warn!(
                enquiry_id = %id,
                from = %previous_status,
                to = %target,
                "Status transition outside the admin workflow"
            );
        }

        let outcome = match target {
            EnquiryStatus::Contacted => {
                self.repository.enquiries.update_status(id, target).await?;
                TransitionOutcome {
                    enquiry: Enquiry { status: target, ..current },
                    previous_status,
                    blocked_dates_written: 0,
                    blocked_dates_removed: 0,
                }
            }
            EnquiryStatus::Booked => {
                let stay = current.stay()?;
                self.repository.enquiries.update_status(id, target).await?;

                let written = self
                    .block_dates(id, &stay)
                    .await
                    .map_err(|e| partial_failure(id, target, e))?;

                TransitionOutcome {
                    enquiry: Enquiry { status: target, ..current },
                    previous_status,
                    blocked_dates_written: written,
                    blocked_dates_removed: 0,
                }
            }
            EnquiryStatus::Cancelled => {
                current.stay()?;
                self.repository.enquiries.update_status(id, target).await?;

                let (enquiry, removed) = self
                    .release_dates(id)
                    .await
                    .map_err(|e| partial_failure(id, target, e))?;

                TransitionOutcome {
                    enquiry,
                    previous_status,
                    blocked_dates_written: 0,
                    blocked_dates_removed: removed,
                }
            }
            EnquiryStatus::New => {
                return Err(AppError::Validation(
                    "Enquiries cannot be moved back to 'New'".to_string(),
                ))
            }
        };

        tracing::info!(
            enquiry_id = %id,
            from = %previous_status,
            to = %target,
            written = outcome.blocked_dates_written,
            removed = outcome.blocked_dates_removed,
            "Enquiry status changed"
        );

        Ok(outcome)
    }

    /// Blocked days, optionally for one accommodation
    pub async fn booked_dates(&self, cottage: Option<String>) -> AppResult<Vec<BlockedDate>> {
        self.repository.booked_dates.list(cottage).await
    }

    /// Write one blocked day per night of the stay in a single batch
    async fn block_dates(&self, enquiry_id: Uuid, stay: &Stay) -> AppResult<usize> {
        let rows: Vec<NewBlockedDate> = stay
            .days()
            .into_iter()
            .map(|date| NewBlockedDate {
                date,
                cottage: stay.cottage.clone(),
                source_enquiry_id: Some(enquiry_id),
            })
            .collect();

        let written = self.repository.booked_dates.insert_batch(rows).await?;
        Ok(written.len())
    }

    /// Re-read the enquiry, re-derive its days and delete the matching rows.
    ///
    /// Lookups are split into chunks of `in_query_limit` dates so ranges longer
    /// than the store's equality-set limit are fully covered. Rows written for
    /// another enquiry are kept; rows without a source are released.
    async fn release_dates(&self, enquiry_id: Uuid) -> AppResult<(Enquiry, u64)> {
        let enquiry = self.repository.enquiries.get_by_id(enquiry_id).await?;
        let stay = enquiry.stay()?;
        let days = stay.days();

        let mut ids = Vec::new();
        for chunk in days.chunks(self.in_query_limit) {
            let rows = self
                .repository
                .booked_dates
                .find_by_cottage_and_dates(&stay.cottage, chunk)
                .await?;
            ids.extend(
                rows.into_iter()
                    .filter(|row| row.source_enquiry_id.map_or(true, |source| source == enquiry_id))
                    .map(|row| row.id),
            );
        }

        if ids.is_empty() {
            return Ok((enquiry, 0));
        }

        let removed = self.repository.booked_dates.delete_batch(ids).await?;
        Ok((enquiry, removed))
    }
}

fn partial_failure(enquiry_id: Uuid, status: EnquiryStatus, error: AppError) -> AppError {
    tracing::error!(
        enquiry_id = %enquiry_id,
        status = %status,
        "Calendar update failed after status change: {}",
        error
    );
    AppError::PartialFailure {
        enquiry_id,
        status,
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::NewEnquiry,
        repository::booked_dates::MockBookedDatesRepository,
    };
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    async fn enquiry(
        repository: &Repository,
        accommodation: &str,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> Enquiry {
        repository
            .enquiries
            .create(NewEnquiry {
                name: "Guest".to_string(),
                email: "guest@example.com".to_string(),
                phone: "9847012345".to_string(),
                message: String::new(),
                accommodation: accommodation.to_string(),
                check_in,
                check_out,
                adults: 2,
                children: 0,
                guests: 2,
                status: EnquiryStatus::New,
            })
            .await
            .unwrap()
    }

    async fn rows(repository: &Repository) -> Vec<BlockedDate> {
        repository.booked_dates.list(None).await.unwrap()
    }

    fn pairs(rows: &[BlockedDate]) -> Vec<(String, String)> {
        rows.iter()
            .map(|r| (r.date.clone(), r.cottage.clone()))
            .collect()
    }

    #[tokio::test]
    async fn booking_blocks_each_day_of_the_stay() {
        let repository = Repository::in_memory(10);
        let service = BookingService::new(repository.clone(), 10);
        let e = enquiry(&repository, "1 BHK", Some(date(6, 10)), Some(date(6, 12))).await;

        service.transition(e.id, EnquiryStatus::Contacted).await.unwrap();
        let outcome = service.transition(e.id, EnquiryStatus::Booked).await.unwrap();

        assert_eq!(outcome.previous_status, EnquiryStatus::Contacted);
        assert_eq!(outcome.enquiry.status, EnquiryStatus::Booked);
        assert_eq!(outcome.blocked_dates_written, 3);

        let stored = rows(&repository).await;
        assert_eq!(
            pairs(&stored),
            vec![
                ("2024-06-10".to_string(), "1 BHK".to_string()),
                ("2024-06-11".to_string(), "1 BHK".to_string()),
                ("2024-06-12".to_string(), "1 BHK".to_string()),
            ]
        );
        assert!(stored.iter().all(|r| r.source_enquiry_id == Some(e.id)));
    }

    #[tokio::test]
    async fn cancelling_removes_exactly_the_booked_days() {
        let repository = Repository::in_memory(10);
        let service = BookingService::new(repository.clone(), 10);
        let e = enquiry(&repository, "1 BHK", Some(date(6, 10)), Some(date(6, 12))).await;
        let other = enquiry(&repository, "2 BHK", Some(date(6, 10)), Some(date(6, 11))).await;
        let later = enquiry(&repository, "1 BHK", Some(date(6, 13)), Some(date(6, 14))).await;

        for id in [e.id, other.id, later.id] {
            service.transition(id, EnquiryStatus::Contacted).await.unwrap();
            service.transition(id, EnquiryStatus::Booked).await.unwrap();
        }
        assert_eq!(rows(&repository).await.len(), 7);

        let outcome = service.transition(e.id, EnquiryStatus::Cancelled).await.unwrap();
        assert_eq!(outcome.blocked_dates_removed, 3);
        assert_eq!(outcome.enquiry.status, EnquiryStatus::Cancelled);

        let remaining = rows(&repository).await;
        assert_eq!(remaining.len(), 4);
        assert!(!remaining
            .iter()
            .any(|r| r.cottage == "1 BHK" && r.date.as_str() <= "2024-06-12"));
    }

    #[tokio::test]
    async fn cancelling_an_unbooked_enquiry_keeps_other_bookings() {
        let repository = Repository::in_memory(10);
        let service = BookingService::new(repository.clone(), 10);
        let booked = enquiry(&repository, "1 BHK", Some(date(6, 10)), Some(date(6, 12))).await;
        let enquired = enquiry(&repository, "1 BHK", Some(date(6, 10)), Some(date(6, 12))).await;

        service.transition(booked.id, EnquiryStatus::Contacted).await.unwrap();
        service.transition(booked.id, EnquiryStatus::Booked).await.unwrap();
        service.transition(enquired.id, EnquiryStatus::Contacted).await.unwrap();

        let outcome = service
            .transition(enquired.id, EnquiryStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(outcome.blocked_dates_removed, 0);

        let stored = rows(&repository).await;
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|r| r.source_enquiry_id == Some(booked.id)));
    }

    #[tokio::test]
    async fn rows_without_source_are_released_by_day() {
        let repository = Repository::in_memory(10);
        let service = BookingService::new(repository.clone(), 10);
        let e = enquiry(&repository, "1 BHK", Some(date(6, 10)), Some(date(6, 11))).await;
        repository
            .booked_dates
            .insert_batch(
                ["2024-06-10", "2024-06-11"]
                    .iter()
                    .map(|day| NewBlockedDate {
                        date: day.to_string(),
                        cottage: "1 BHK".to_string(),
                        source_enquiry_id: None,
                    })
                    .collect(),
            )
            .await
            .unwrap();

        let outcome = service.transition(e.id, EnquiryStatus::Cancelled).await.unwrap();
        assert_eq!(outcome.blocked_dates_removed, 2);
        assert!(rows(&repository).await.is_empty());
    }

    #[tokio::test]
    async fn overlapping_bookings_create_duplicate_rows() {
        let repository = Repository::in_memory(10);
        let service = BookingService::new(repository.clone(), 10);
        let first = enquiry(&repository, "1 BHK", Some(date(6, 10)), Some(date(6, 12))).await;
        let second = enquiry(&repository, "1 BHK", Some(date(6, 11)), Some(date(6, 13))).await;

        service.transition(first.id, EnquiryStatus::Booked).await.unwrap();
        service.transition(second.id, EnquiryStatus::Booked).await.unwrap();

        let stored = rows(&repository).await;
        assert_eq!(stored.len(), 6);
        for day in ["2024-06-11", "2024-06-12"] {
            assert_eq!(stored.iter().filter(|r| r.date == day).count(), 2);
        }
    }

    #[tokio::test]
    async fn long_stays_are_released_across_chunked_lookups() {
        let repository = Repository::in_memory(10);
        let service = BookingService::new(repository.clone(), 10);
        let e = enquiry(&repository, "2 BHK", Some(date(6, 1)), Some(date(6, 25))).await;

        let booked = service.transition(e.id, EnquiryStatus::Booked).await.unwrap();
        assert_eq!(booked.blocked_dates_written, 25);

        let cancelled = service.transition(e.id, EnquiryStatus::Cancelled).await.unwrap();
        assert_eq!(cancelled.blocked_dates_removed, 25);
        assert!(rows(&repository).await.is_empty());
    }

    #[tokio::test]
    async fn contacted_is_idempotent() {
        let repository = Repository::in_memory(10);
        let service = BookingService::new(repository.clone(), 10);
        let e = enquiry(&repository, "1 BHK", Some(date(6, 10)), Some(date(6, 12))).await;

        let once = service.transition(e.id, EnquiryStatus::Contacted).await.unwrap();
        let twice = service.transition(e.id, EnquiryStatus::Contacted).await.unwrap();

        assert_eq!(once.enquiry, twice.enquiry);
        assert_eq!(twice.blocked_dates_written, 0);
        assert!(rows(&repository).await.is_empty());
        assert_eq!(
            repository.enquiries.get_by_id(e.id).await.unwrap().status,
            EnquiryStatus::Contacted
        );
    }

    #[tokio::test]
    async fn new_is_not_a_valid_target() {
        let repository = Repository::in_memory(10);
        let service = BookingService::new(repository.clone(), 10);
        let e = enquiry(&repository, "1 BHK", Some(date(6, 10)), Some(date(6, 12))).await;

        let result = service.transition(e.id, EnquiryStatus::New).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn unknown_enquiry_is_not_found() {
        let service = BookingService::new(Repository::in_memory(10), 10);
        let result = service.transition(Uuid::new_v4(), EnquiryStatus::Booked).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn missing_dates_fail_before_status_changes() {
        let repository = Repository::in_memory(10);
        let service = BookingService::new(repository.clone(), 10);
        let e = enquiry(&repository, "1 BHK", Some(date(6, 10)), None).await;

        for target in [EnquiryStatus::Booked, EnquiryStatus::Cancelled] {
            let result = service.transition(e.id, target).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }

        let stored = repository.enquiries.get_by_id(e.id).await.unwrap();
        assert_eq!(stored.status, EnquiryStatus::New);
        assert!(rows(&repository).await.is_empty());
    }

    #[tokio::test]
    async fn inverted_stay_is_rejected() {
        let repository = Repository::in_memory(10);
        let service = BookingService::new(repository.clone(), 10);
        let e = enquiry(&repository, "1 BHK", Some(date(6, 12)), Some(date(6, 10))).await;

        let result = service.transition(e.id, EnquiryStatus::Booked).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn out_of_workflow_booking_still_applies() {
        let repository = Repository::in_memory(10);
        let service = BookingService::new(repository.clone(), 10);
        let e = enquiry(&repository, "1 BHK", Some(date(6, 10)), Some(date(6, 10))).await;

        let outcome = service.transition(e.id, EnquiryStatus::Booked).await.unwrap();
        assert_eq!(outcome.previous_status, EnquiryStatus::New);
        assert_eq!(outcome.blocked_dates_written, 1);
    }

    #[tokio::test]
    async fn calendar_failure_after_status_write_is_partial() {
        let mut repository = Repository::in_memory(10);
        let mut booked_dates = MockBookedDatesRepository::new();
        booked_dates
            .expect_insert_batch()
            .times(1)
            .returning(|_| Err(AppError::Store("write quota exceeded".to_string())));
        repository.booked_dates = Arc::new(booked_dates);

        let service = BookingService::new(repository.clone(), 10);
        let e = enquiry(&repository, "1 BHK", Some(date(6, 10)), Some(date(6, 12))).await;

        let result = service.transition(e.id, EnquiryStatus::Booked).await;
        match result {
            Err(AppError::PartialFailure {
                enquiry_id, status, ..
            }) => {
                assert_eq!(enquiry_id, e.id);
                assert_eq!(status, EnquiryStatus::Booked);
            }
            other => panic!("expected partial failure, got {:?}", other),
        }

        // The status write is visible; the caller must reconcile the calendar
        let stored = repository.enquiries.get_by_id(e.id).await.unwrap();
        assert_eq!(stored.status, EnquiryStatus::Booked);
    }

    #[tokio::test]
    async fn release_failure_is_partial() {
        let mut repository = Repository::in_memory(10);
        let mut booked_dates = MockBookedDatesRepository::new();
        booked_dates
            .expect_find_by_cottage_and_dates()
            .returning(|_, _| Err(AppError::Store("deadline exceeded".to_string())));
        booked_dates.expect_delete_batch().never();
        repository.booked_dates = Arc::new(booked_dates);

        let service = BookingService::new(repository.clone(), 10);
        let e = enquiry(&repository, "1 BHK", Some(date(6, 10)), Some(date(6, 12))).await;

        let result = service.transition(e.id, EnquiryStatus::Cancelled).await;
        assert!(matches!(result, Err(AppError::PartialFailure { .. })));
    }
}
