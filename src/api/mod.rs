//! API handlers for the homestay REST endpoints

pub mod auth;
pub mod booked_dates;
pub mod enquiries;
pub mod health;
pub mod openapi;
pub mod rates;
pub mod ratings;
pub mod stats;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{error::AppError, listing::Page, models::admin::AdminClaims, AppState};

/// Extractor for the authenticated admin from a JWT token
pub struct AuthenticatedAdmin(pub AdminClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = state.services.auth.verify_token(token)?;

        Ok(AuthenticatedAdmin(claims))
    }
}

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Records on this page
    pub items: Vec<T>,
    /// Number of records matching the filter
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Records per page
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T> From<Page<T>> for PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    fn from(page: Page<T>) -> Self {
        Self {
            items: page.items,
            total: page.total as i64,
            page: page.page as i64,
            per_page: page.per_page as i64,
            total_pages: page.total_pages as i64,
        }
    }
}

/// Treat a blank query parameter as absent
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Enquiries
        .route("/enquiries", post(enquiries::create_enquiry))
        .route("/enquiries", get(enquiries::list_enquiries))
        .route("/enquiries/:id", get(enquiries::get_enquiry))
        .route("/enquiries/:id/status", put(enquiries::update_enquiry_status))
        // Booked dates (public calendar)
        .route("/booked-dates", get(booked_dates::list_booked_dates))
        // Ratings
        .route("/ratings", post(ratings::create_rating))
        .route("/ratings", get(ratings::list_ratings))
        .route("/ratings/:id/status", put(ratings::update_rating_status))
        .route("/testimonials", get(ratings::testimonials))
        // Rates
        .route("/rates", get(rates::list_rates))
        .route("/rates/:accommodation", put(rates::update_rate))
        // Statistics
        .route("/stats", get(stats::get_stats))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
