//! Guest enquiry submission and admin listing

use std::sync::Arc;

use uuid::Uuid;

use super::email::EnquiryNotifier;
use crate::{
    error::AppResult,
    listing::{self, EnquiryFilter, ListQuery, Page},
    models::{CreateEnquiry, Enquiry, NewEnquiry},
    repository::Repository,
};

#[derive(Clone)]
pub struct EnquiriesService {
    repository: Repository,
    notifier: Arc<dyn EnquiryNotifier>,
    page_size: usize,
}

impl EnquiriesService {
    pub fn new(repository: Repository, notifier: Arc<dyn EnquiryNotifier>, page_size: usize) -> Self {
        Self {
            repository,
            notifier,
            page_size,
        }
    }

    /// Store a guest enquiry with status `New` and notify the owner.
    ///
    /// The notification runs after the write and never affects its outcome.
    pub async fn submit(&self, request: CreateEnquiry) -> AppResult<Enquiry> {
        request.validate_submission()?;

        let enquiry = self
            .repository
            .enquiries
            .create(NewEnquiry::from(request))
            .await?;

        tracing::info!(
            enquiry_id = %enquiry.id,
            accommodation = %enquiry.accommodation,
            "Enquiry submitted"
        );

        self.dispatch_notification(enquiry.clone());
        Ok(enquiry)
    }

    fn dispatch_notification(&self, enquiry: Enquiry) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.notify_new_enquiry(&enquiry).await {
                tracing::error!(enquiry_id = %enquiry.id, "Enquiry notification failed: {}", e);
            }
        });
    }

    /// All enquiries, newest submission first
    pub async fn list_all(&self) -> AppResult<Vec<Enquiry>> {
        let mut enquiries = self.repository.enquiries.list().await?;
        listing::sort_newest_first(&mut enquiries);
        Ok(enquiries)
    }

    /// Filtered page of enquiries, newest submission first
    pub async fn list(&self, query: &ListQuery<EnquiryFilter>) -> AppResult<Page<Enquiry>> {
        let enquiries = self.list_all().await?;
        Ok(listing::apply(&enquiries, query, self.page_size))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Enquiry> {
        self.repository.enquiries.get_by_id(id).await
    }
}
