//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, booked_dates, enquiries, health, rates, ratings, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Homestay API",
        version = "0.1.0",
        description = "Booking enquiries, availability calendar and guest ratings for a homestay",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Enquiries
        enquiries::create_enquiry,
        enquiries::list_enquiries,
        enquiries::get_enquiry,
        enquiries::update_enquiry_status,
        // Calendar
        booked_dates::list_booked_dates,
        // Ratings
        ratings::create_rating,
        ratings::list_ratings,
        ratings::update_rating_status,
        ratings::testimonials,
        // Rates
        rates::list_rates,
        rates::update_rate,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::admin::AdminClaims,
            // Enquiries
            crate::models::Enquiry,
            crate::models::CreateEnquiry,
            crate::models::EnquiryStatus,
            enquiries::UpdateStatusRequest,
            crate::services::bookings::TransitionOutcome,
            // Calendar
            crate::models::BlockedDate,
            // Ratings
            crate::models::Rating,
            crate::models::CreateRating,
            crate::models::RatingStatus,
            crate::models::Testimonials,
            ratings::UpdateRatingStatusRequest,
            // Rates
            crate::models::Rate,
            crate::models::UpdateRate,
            // Stats
            stats::DashboardStats,
            stats::StatusCounts,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Admin authentication"),
        (name = "enquiries", description = "Booking enquiries and status workflow"),
        (name = "booked_dates", description = "Public availability calendar"),
        (name = "ratings", description = "Guest ratings and testimonials"),
        (name = "rates", description = "Nightly rates"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
