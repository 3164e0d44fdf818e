//! Blocked calendar day model

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// One calendar day made unavailable for one accommodation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockedDate {
    pub id: Uuid,
    /// `YYYY-MM-DD` day token
    pub date: String,
    /// Accommodation label the day is blocked for
    pub cottage: String,
    /// Enquiry whose booking wrote this row, when known
    pub source_enquiry_id: Option<Uuid>,
}

/// Row written by a booking batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlockedDate {
    pub date: String,
    pub cottage: String,
    pub source_enquiry_id: Option<Uuid>,
}

/// Query parameters for the public calendar
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookedDatesQuery {
    /// Restrict to one accommodation label
    pub cottage: Option<String>,
}
