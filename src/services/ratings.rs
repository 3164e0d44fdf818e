//! Guest ratings and public testimonials

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    listing::{self, ListQuery, Page, RatingFilter},
    models::{CreateRating, NewRating, Rating, RatingStatus, Testimonials},
    repository::Repository,
};

#[derive(Clone)]
pub struct RatingsService {
    repository: Repository,
    page_size: usize,
}

impl RatingsService {
    pub fn new(repository: Repository, page_size: usize) -> Self {
        Self {
            repository,
            page_size,
        }
    }

    /// Store a guest rating awaiting moderation
    pub async fn submit(&self, request: CreateRating) -> AppResult<Rating> {
        request.validate_submission()?;
        let rating = self.repository.ratings.create(NewRating::from(request)).await?;
        tracing::info!(rating_id = %rating.id, "Rating submitted");
        Ok(rating)
    }

    /// Filtered page of ratings, newest first
    pub async fn list(&self, query: &ListQuery<RatingFilter>) -> AppResult<Page<Rating>> {
        let mut ratings = self.repository.ratings.list().await?;
        listing::sort_newest_first(&mut ratings);
        Ok(listing::apply(&ratings, query, self.page_size))
    }

    /// Approve or reject a rating
    pub async fn set_status(&self, id: Uuid, status: RatingStatus) -> AppResult<()> {
        if status == RatingStatus::New {
            return Err(AppError::Validation(
                "Ratings can only be approved or rejected".to_string(),
            ));
        }
        self.repository.ratings.update_status(id, status).await?;
        tracing::info!(rating_id = %id, status = %status, "Rating moderated");
        Ok(())
    }

    /// Approved ratings for the public site, newest first
    pub async fn testimonials(&self) -> AppResult<Testimonials> {
        let mut approved = self
            .repository
            .ratings
            .list_by_status(RatingStatus::Approved)
            .await?;
        listing::sort_newest_first(&mut approved);
        Ok(Testimonials::from_approved(approved))
    }
}
