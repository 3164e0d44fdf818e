//! Nightly rate per accommodation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub accommodation: String,
    /// Price per night in rupees
    pub price_per_night: i32,
    /// Maximum number of guests
    pub capacity: i32,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRate {
    #[validate(range(min = 0, max = 1_000_000))]
    pub price_per_night: i32,
    #[validate(range(min = 1, max = 50))]
    pub capacity: i32,
}
