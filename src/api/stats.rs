//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::AuthenticatedAdmin;

/// Admin dashboard counters
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_enquiries: i64,
    /// Enquiries per status
    pub by_status: StatusCounts,
    pub total_ratings: i64,
    /// Ratings awaiting moderation
    pub pending_ratings: i64,
    /// Rows in the blocked-date calendar, duplicates included
    pub blocked_dates: i64,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct StatusCounts {
    #[serde(rename = "New")]
    pub new: i64,
    pub contacted: i64,
    pub booked: i64,
    pub cancelled: i64,
}

/// Get dashboard statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_claims): AuthenticatedAdmin,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.stats.dashboard().await?;
    Ok(Json(stats))
}
