//! Enquiry (contact submission) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::EnquiryStatus;
use crate::{
    calendar,
    error::{AppError, AppResult},
};

/// Guest enquiry as stored in `contact_submissions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    /// Accommodation label, e.g. "1 BHK"
    pub accommodation: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub adults: i32,
    pub children: i32,
    /// Informational only, never used for capacity checks
    pub guests: i32,
    pub status: EnquiryStatus,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Enquiry fields written on creation; the store assigns `id` and `timestamp`
#[derive(Debug, Clone, PartialEq)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub accommodation: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub adults: i32,
    pub children: i32,
    pub guests: i32,
    pub status: EnquiryStatus,
}

/// Guest enquiry submission
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnquiry {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 20, message = "Invalid phone number"))]
    pub phone: String,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Accommodation is required"))]
    pub accommodation: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    #[validate(range(min = 1, max = 20))]
    pub adults: i32,
    #[validate(range(min = 0, max = 20))]
    pub children: i32,
    /// Defaults to adults + children when omitted
    pub guests: Option<i32>,
}

/// The part of an enquiry that drives the booking calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stay {
    pub cottage: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl Stay {
    /// Day tokens blocked by this stay, check-in and check-out inclusive
    pub fn days(&self) -> Vec<String> {
        calendar::expand(self.check_in, self.check_out)
    }
}

impl Enquiry {
    /// Extract the stay, failing instead of producing an empty or wrong range
    pub fn stay(&self) -> AppResult<Stay> {
        let cottage = self.accommodation.trim();
        if cottage.is_empty() {
            return Err(AppError::Validation(format!(
                "Enquiry {} has no accommodation",
                self.id
            )));
        }

        let (check_in, check_out) = match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => (check_in, check_out),
            _ => {
                return Err(AppError::Validation(format!(
                    "Enquiry {} is missing its check-in or check-out date",
                    self.id
                )))
            }
        };

        if check_in > check_out {
            return Err(AppError::Validation(format!(
                "Enquiry {} checks out ({}) before it checks in ({})",
                self.id, check_out, check_in
            )));
        }

        Ok(Stay {
            cottage: cottage.to_string(),
            check_in,
            check_out,
        })
    }
}

/// Longest stay a guest can request, in nights
pub const MAX_STAY_NIGHTS: i64 = 366;

impl CreateEnquiry {
    /// Validate field rules, the check-in/check-out order and the stay length
    pub fn validate_submission(&self) -> AppResult<()> {
        self.validate()?;

        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_in > check_out {
                return Err(AppError::Validation(
                    "Check-out date must not be before check-in date".to_string(),
                ));
            }
            if (check_out - check_in).num_days() > MAX_STAY_NIGHTS {
                return Err(AppError::Validation(format!(
                    "Stays are limited to {} nights",
                    MAX_STAY_NIGHTS
                )));
            }
        }

        if matches!(self.guests, Some(guests) if guests < 0) {
            return Err(AppError::Validation("Guests must not be negative".to_string()));
        }

        Ok(())
    }
}

impl From<CreateEnquiry> for NewEnquiry {
    fn from(request: CreateEnquiry) -> Self {
        let guests = request
            .guests
            .unwrap_or(request.adults + request.children);

        Self {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            message: request.message.unwrap_or_default(),
            accommodation: request.accommodation.trim().to_string(),
            check_in: request.check_in,
            check_out: request.check_out,
            adults: request.adults,
            children: request.children,
            guests,
            status: EnquiryStatus::New,
        }
    }
}
