//! Data models for the homestay server

pub mod admin;
pub mod booked_date;
pub mod enquiry;
pub mod enums;
pub mod rate;
pub mod rating;

// Re-export commonly used types
pub use booked_date::{BlockedDate, NewBlockedDate};
pub use enquiry::{CreateEnquiry, Enquiry, NewEnquiry, Stay};
pub use enums::{EnquiryStatus, RatingStatus};
pub use rate::{Rate, UpdateRate};
pub use rating::{CreateRating, NewRating, Rating, Testimonials};
