//! Guest rating (testimonial) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::RatingStatus;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub name: String,
    pub place: String,
    pub state: String,
    /// Star rating between 0 and 5 in half-star steps
    pub rating: f32,
    pub description: String,
    pub status: RatingStatus,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    pub name: String,
    pub place: String,
    pub state: String,
    pub rating: f32,
    pub description: String,
    pub status: RatingStatus,
}

/// Guest rating submission
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRating {
    #[validate(length(min = 1, max = 24))]
    pub name: String,
    #[validate(length(max = 50))]
    pub place: String,
    #[validate(length(max = 50))]
    pub state: String,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f32,
    #[validate(length(max = 500))]
    pub description: String,
}

impl CreateRating {
    pub fn validate_submission(&self) -> AppResult<()> {
        self.validate()?;

        if (self.rating * 2.0).fract() != 0.0 {
            return Err(AppError::Validation(
                "Rating must be given in half-star steps".to_string(),
            ));
        }

        Ok(())
    }
}

impl From<CreateRating> for NewRating {
    fn from(request: CreateRating) -> Self {
        Self {
            name: request.name.trim().to_string(),
            place: request.place.trim().to_string(),
            state: request.state.trim().to_string(),
            rating: request.rating,
            description: request.description.trim().to_string(),
            status: RatingStatus::New,
        }
    }
}

/// Approved ratings shown on the public site, with summary figures
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Testimonials {
    pub testimonials: Vec<Rating>,
    pub count: usize,
    /// Mean star rating, 0 when there are no testimonials
    pub average_rating: f32,
    /// Share of testimonials rated 4 stars or more, in percent
    pub recommend_percent: u32,
}

impl Testimonials {
    pub fn from_approved(testimonials: Vec<Rating>) -> Self {
        let count = testimonials.len();
        let (average_rating, recommend_percent) = if count == 0 {
            (0.0, 0)
        } else {
            let sum: f32 = testimonials.iter().map(|t| t.rating).sum();
            let recommended = testimonials.iter().filter(|t| t.rating >= 4.0).count();
            (
                sum / count as f32,
                ((recommended as f32 / count as f32) * 100.0).round() as u32,
            )
        };

        Self {
            testimonials,
            count,
            average_rating,
            recommend_percent,
        }
    }
}
