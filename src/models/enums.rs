//! Shared domain enums

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// EnquiryStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a guest enquiry.
///
/// The stored literals are case-sensitive: the initial state is `New`,
/// the others are lowercase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EnquiryStatus {
    #[default]
    #[serde(rename = "New")]
    New,
    #[serde(rename = "contacted")]
    Contacted,
    #[serde(rename = "booked")]
    Booked,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl EnquiryStatus {
    pub const ALL: [EnquiryStatus; 4] = [
        EnquiryStatus::New,
        EnquiryStatus::Contacted,
        EnquiryStatus::Booked,
        EnquiryStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::New => "New",
            EnquiryStatus::Contacted => "contacted",
            EnquiryStatus::Booked => "booked",
            EnquiryStatus::Cancelled => "cancelled",
        }
    }

    /// Transitions the admin console offers from this status
    pub fn admin_actions(&self) -> &'static [EnquiryStatus] {
        match self {
            EnquiryStatus::New => &[EnquiryStatus::Contacted],
            EnquiryStatus::Contacted => &[EnquiryStatus::Booked, EnquiryStatus::Cancelled],
            EnquiryStatus::Booked => &[EnquiryStatus::Cancelled],
            EnquiryStatus::Cancelled => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.admin_actions().is_empty()
    }
}

impl FromStr for EnquiryStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnquiryStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown enquiry status '{}'", s)))
    }
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RatingStatus
// ---------------------------------------------------------------------------

/// Moderation status of a guest rating; only `approved` ratings are public
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RatingStatus {
    #[default]
    #[serde(rename = "New")]
    New,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "rejected")]
    Rejected,
}

impl RatingStatus {
    pub const ALL: [RatingStatus; 3] = [
        RatingStatus::New,
        RatingStatus::Approved,
        RatingStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingStatus::New => "New",
            RatingStatus::Approved => "approved",
            RatingStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for RatingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RatingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown rating status '{}'", s)))
    }
}

impl std::fmt::Display for RatingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enquiry_status_literals() {
        assert_eq!(serde_json::to_string(&EnquiryStatus::New).unwrap(), "\"New\"");
        assert_eq!(serde_json::to_string(&EnquiryStatus::Booked).unwrap(), "\"booked\"");
        assert_eq!("cancelled".parse::<EnquiryStatus>().unwrap(), EnquiryStatus::Cancelled);
        assert!("new".parse::<EnquiryStatus>().is_err());
        assert!("Booked".parse::<EnquiryStatus>().is_err());
    }

    #[test]
    fn admin_workflow() {
        assert_eq!(EnquiryStatus::New.admin_actions(), &[EnquiryStatus::Contacted]);
        assert!(EnquiryStatus::Booked.admin_actions().contains(&EnquiryStatus::Cancelled));
        assert!(EnquiryStatus::Cancelled.is_terminal());
        assert!(!EnquiryStatus::Contacted.is_terminal());
    }

    #[test]
    fn rating_status_literals() {
        let status: RatingStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(status, RatingStatus::Approved);
        assert_eq!(RatingStatus::default().as_str(), "New");
        assert!("Approved".parse::<RatingStatus>().is_err());
    }
}
