//! Guest rating endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::AppResult,
    listing::{ListQuery, RatingFilter},
    models::{CreateRating, Rating, RatingStatus, Testimonials},
};

use super::{non_empty, AuthenticatedAdmin, PaginatedResponse};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RatingListQuery {
    /// Exact status: New, approved or rejected
    pub status: Option<String>,
    /// Page number (default: 1)
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRatingStatusRequest {
    /// approved or rejected
    pub status: String,
}

/// Submit a guest rating
#[utoipa::path(
    post,
    path = "/ratings",
    tag = "ratings",
    request_body = CreateRating,
    responses(
        (status = 201, description = "Rating stored for moderation", body = Rating),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_rating(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateRating>,
) -> AppResult<(StatusCode, Json<Rating>)> {
    let rating = state.services.ratings.submit(request).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

/// List ratings for moderation
#[utoipa::path(
    get,
    path = "/ratings",
    tag = "ratings",
    security(("bearer_auth" = [])),
    params(RatingListQuery),
    responses(
        (status = 200, description = "Page of ratings", body = PaginatedResponse<Rating>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_ratings(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_claims): AuthenticatedAdmin,
    Query(query): Query<RatingListQuery>,
) -> AppResult<Json<PaginatedResponse<Rating>>> {
    let status = non_empty(query.status)
        .map(|s| s.parse::<RatingStatus>())
        .transpose()?;
    let query = ListQuery::new(RatingFilter { status }).with_page(query.page.unwrap_or(1));

    let page = state.services.ratings.list(&query).await?;
    Ok(Json(page.into()))
}

/// Approve or reject a rating
#[utoipa::path(
    put,
    path = "/ratings/{id}/status",
    tag = "ratings",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Rating ID")
    ),
    request_body = UpdateRatingStatusRequest,
    responses(
        (status = 204, description = "Status changed"),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Rating not found")
    )
)]
pub async fn update_rating_status(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_claims): AuthenticatedAdmin,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRatingStatusRequest>,
) -> AppResult<StatusCode> {
    let status: RatingStatus = request.status.trim().parse()?;
    state.services.ratings.set_status(id, status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Approved ratings with summary figures
#[utoipa::path(
    get,
    path = "/testimonials",
    tag = "ratings",
    responses(
        (status = 200, description = "Approved testimonials", body = Testimonials)
    )
)]
pub async fn testimonials(State(state): State<crate::AppState>) -> AppResult<Json<Testimonials>> {
    let testimonials = state.services.ratings.testimonials().await?;
    Ok(Json(testimonials))
}
